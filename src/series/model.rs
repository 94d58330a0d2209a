// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SeriesError;

/// Decode `null` as the field's empty value, like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by the series API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub data: SeriesData,
}

/// A podcast series as published by the series API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesData {
    #[serde(deserialize_with = "null_as_default")]
    pub guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_modified: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rss_feed_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub html_description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    /// ISO-8601 timestamp, not validated
    #[serde(deserialize_with = "null_as_default")]
    pub publication_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub copyright: String,
    #[serde(deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// Kept in source order; the feed is emitted in this order
    #[serde(deserialize_with = "null_as_default")]
    pub episodes: Vec<Episode>,
    #[serde(deserialize_with = "null_as_default")]
    pub rankings: Rankings,
    #[serde(deserialize_with = "null_as_default")]
    pub cover_url: String,
}

impl SeriesData {
    /// Check the invariants the rest of the crate relies on
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.guid.trim().is_empty() {
            return Err(SeriesError::MissingGuid);
        }
        Ok(())
    }
}

/// A single episode of a series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    #[serde(deserialize_with = "null_as_default")]
    pub source_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub series_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub series_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photo_author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_article_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub html_description: Option<String>,
    /// ISO-8601 timestamp; may be malformed
    #[serde(deserialize_with = "null_as_default")]
    pub publication_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rss_guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub audio_url: String,
    /// Duration in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub audio_duration: u64,
    /// Size of the audio file in bytes
    #[serde(deserialize_with = "null_as_default")]
    pub audio_length: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub audio_sample: AudioSample,
    #[serde(deserialize_with = "null_as_default")]
    pub audio_pkgs: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub last_modified: String,
    #[serde(deserialize_with = "null_as_default")]
    pub audio_slices: Vec<AudioSlice>,
    #[serde(deserialize_with = "null_as_default")]
    pub series_tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub availability_periods: Vec<AvailabilityPeriod>,
    #[serde(deserialize_with = "null_as_default")]
    pub rankings: Rankings,
    pub analytics_data: Option<String>,
    pub ad_tags: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cover_url: String,
    pub square_cover_url: Option<String>,
    pub square_photo_author: Option<String>,
    pub h: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSample {
    #[serde(deserialize_with = "null_as_default")]
    pub audio_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub audio_duration: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub audio_length: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSlice {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub end: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityPeriod {
    pub product: Option<String>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rankings {
    #[serde(deserialize_with = "null_as_default")]
    pub daily: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub weekly: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub monthly: i64,
}
