// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::PipelineError;
use crate::feed::{generate_feed, latest_episode_date};
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::series::{SeriesData, SeriesEndpoint, fetch_series};
use crate::storage::{ObjectStore, StorageLocation, upload_feed, write_feed_file};

/// Where a generated feed ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Bucket(StorageLocation),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File(path) => write!(f, "{}", path.display()),
            Destination::Bucket(location) => write!(f, "{location}"),
        }
    }
}

/// Result of a generate-and-store run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub destination: Destination,
    pub title: String,
    pub author: String,
    pub episode_count: usize,
}

impl PublishOutcome {
    fn new(destination: Destination, series: &SeriesData) -> Self {
        Self {
            destination,
            title: series.title.clone(),
            author: series.author.clone(),
            episode_count: series.episodes.len(),
        }
    }

    /// One-line status message
    pub fn summary(&self) -> String {
        let verb = match self.destination {
            Destination::File(_) => "written to",
            Destination::Bucket(_) => "uploaded to",
        };
        format!(
            "RSS feed {verb} {} ({} by {}, {} episodes)",
            self.destination, self.title, self.author, self.episode_count
        )
    }
}

/// Fetch a series and render its feed
pub async fn fetch_and_render<C: HttpClient>(
    client: &C,
    endpoint: &SeriesEndpoint,
    guid: &str,
    reporter: &SharedProgressReporter,
) -> Result<(SeriesData, String), PipelineError> {
    let series = fetch_reported(client, endpoint, guid, reporter).await?;

    let feed = generate_feed(&series)?;
    reporter.report(ProgressEvent::FeedGenerated { bytes: feed.len() });

    Ok((series, feed))
}

/// Fetch a series, render it and write `output_dir/filename`
pub async fn generate_to_file<C: HttpClient>(
    client: &C,
    endpoint: &SeriesEndpoint,
    guid: &str,
    output_dir: &Path,
    filename: &str,
    reporter: &SharedProgressReporter,
) -> Result<PublishOutcome, PipelineError> {
    let (series, feed) = fetch_and_render(client, endpoint, guid, reporter).await?;

    let path = write_feed_file(output_dir, filename, &feed).await?;
    reporter.report(ProgressEvent::FeedWritten {
        path: path.display().to_string(),
    });

    let outcome = PublishOutcome::new(Destination::File(path), &series);
    info!("{}", outcome.summary());
    Ok(outcome)
}

/// Fetch a series, render it and upload it to object storage
pub async fn generate_and_upload<C: HttpClient, S: ObjectStore + ?Sized>(
    client: &C,
    endpoint: &SeriesEndpoint,
    store: &S,
    guid: &str,
    location: &StorageLocation,
    reporter: &SharedProgressReporter,
) -> Result<PublishOutcome, PipelineError> {
    let (series, feed) = fetch_and_render(client, endpoint, guid, reporter).await?;

    reporter.report(ProgressEvent::UploadingFeed {
        location: location.to_string(),
    });
    upload_feed(store, location, &feed).await?;
    reporter.report(ProgressEvent::FeedUploaded {
        location: location.to_string(),
    });

    let outcome = PublishOutcome::new(Destination::Bucket(location.clone()), &series);
    info!("{}", outcome.summary());
    Ok(outcome)
}

/// Fetch a series and report the date of its latest episode
pub async fn latest_for_series<C: HttpClient>(
    client: &C,
    endpoint: &SeriesEndpoint,
    guid: &str,
    reporter: &SharedProgressReporter,
) -> Result<String, PipelineError> {
    let series = fetch_reported(client, endpoint, guid, reporter).await?;
    Ok(latest_episode_date(&series.episodes)?)
}

async fn fetch_reported<C: HttpClient>(
    client: &C,
    endpoint: &SeriesEndpoint,
    guid: &str,
    reporter: &SharedProgressReporter,
) -> Result<SeriesData, PipelineError> {
    reporter.report(ProgressEvent::FetchingSeries {
        guid: guid.to_string(),
    });

    let series = fetch_series(client, endpoint, guid).await?;

    reporter.report(ProgressEvent::SeriesFetched {
        title: series.title.clone(),
        author: series.author.clone(),
        episode_count: series.episodes.len(),
    });

    Ok(series)
}
