// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local};
use log::warn;
use rss::extension::itunes::{
    self, ITunesChannelExtensionBuilder, ITunesItemExtension, ITunesItemExtensionBuilder,
};
use rss::{Channel, ChannelBuilder, Enclosure, EnclosureBuilder, GuidBuilder, Item, ItemBuilder};

use crate::error::FeedError;
use crate::series::{Episode, SeriesData};

/// MIME type used for every enclosure
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Render a series as an RSS 2.0 / iTunes podcast document
///
/// Episodes with an unparseable publication date are dated at the current
/// local time instead of failing the whole document.
pub fn generate_feed(series: &SeriesData) -> Result<String, FeedError> {
    generate_feed_at(series, Local::now().fixed_offset())
}

/// Same as [`generate_feed`], with `now` used as the fallback publication date
pub fn generate_feed_at(
    series: &SeriesData,
    now: DateTime<FixedOffset>,
) -> Result<String, FeedError> {
    let channel = build_channel(series, now);

    let buf = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(String::from_utf8(buf)?)
}

/// Build the in-memory channel for a series
pub fn build_channel(series: &SeriesData, now: DateTime<FixedOffset>) -> Channel {
    let mut namespaces = BTreeMap::new();
    namespaces.insert("itunes".to_string(), itunes::NAMESPACE.to_string());

    let itunes_ext = ITunesChannelExtensionBuilder::default()
        .author(Some(series.author.clone()))
        .image(Some(series.cover_url.clone()))
        .build();

    let items: Vec<Item> = series
        .episodes
        .iter()
        .map(|episode| build_item(episode, now))
        .collect();

    ChannelBuilder::default()
        .namespaces(namespaces)
        .title(series.title.clone())
        .link(series.link.clone())
        .description(series.description.clone())
        .itunes_ext(Some(itunes_ext))
        .items(items)
        .build()
}

fn build_item(episode: &Episode, now: DateTime<FixedOffset>) -> Item {
    let guid = GuidBuilder::default()
        .value(episode.guid.clone())
        .permalink(false)
        .build();

    ItemBuilder::default()
        .title(Some(episode.title.clone()))
        .description(Some(episode.description.clone()))
        .pub_date(Some(format_pub_date(&episode.publication_date, now)))
        .guid(Some(guid))
        .enclosure(Some(build_enclosure(episode)))
        .itunes_ext(Some(build_itunes_item(episode)))
        .build()
}

fn build_enclosure(episode: &Episode) -> Enclosure {
    EnclosureBuilder::default()
        .url(episode.audio_url.clone())
        .length(episode.audio_length.to_string())
        .mime_type(AUDIO_MIME_TYPE.to_string())
        .build()
}

fn build_itunes_item(episode: &Episode) -> ITunesItemExtension {
    ITunesItemExtensionBuilder::default()
        .duration(Some(format_duration(episode.audio_duration)))
        .build()
}

/// Format an RFC 3339 timestamp for `pubDate`, falling back to `now`
pub fn format_pub_date(date: &str, now: DateTime<FixedOffset>) -> String {
    let date = DateTime::parse_from_rfc3339(date).unwrap_or_else(|e| {
        warn!("invalid publication date '{date}' ({e}), using current time");
        now
    });
    date.format(PUB_DATE_FORMAT).to_string()
}

/// Format a duration in seconds as `H:MM:SS`, or `M:SS` below one hour
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
