// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::error::StorageError;

const S3_SCHEME: &str = "s3://";
const FEED_EXTENSION: &str = ".rss";

/// A parsed `s3://bucket/key` address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub bucket: String,
    pub key: String,
}

impl StorageLocation {
    /// Parse an `s3://bucket/key` path; the key may contain further slashes
    pub fn parse(path: &str) -> Result<Self, StorageError> {
        let rest = path
            .strip_prefix(S3_SCHEME)
            .ok_or_else(|| StorageError::MissingScheme {
                path: path.to_string(),
            })?;

        let (bucket, key) = rest.split_once('/').ok_or_else(|| StorageError::MissingKey {
            path: path.to_string(),
        })?;

        if bucket.is_empty() {
            return Err(StorageError::MissingBucket {
                path: path.to_string(),
            });
        }
        if key.is_empty() {
            return Err(StorageError::MissingKey {
                path: path.to_string(),
            });
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Public HTTPS URL of the object
    pub fn public_url(&self) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, self.key)
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", S3_SCHEME, self.bucket, self.key)
    }
}

/// Display name for a configured storage path
///
/// Falls back to the whole path when it has no usable final segment.
pub fn display_name(storage_path: &str) -> &str {
    match storage_path.trim_end_matches('/').rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." => name,
        _ => storage_path,
    }
}

/// Local filename for a generated feed
///
/// Uses the storage path's file name when it is an `.rss` file, otherwise
/// `<guid>.rss`.
pub fn local_feed_filename(guid: &str, storage_path: Option<&str>) -> String {
    if let Some(name) = storage_path.map(display_name)
        && name.ends_with(FEED_EXTENSION)
    {
        return sanitize_filename::sanitize(name);
    }

    format!("{}{}", sanitize_filename::sanitize(guid), FEED_EXTENSION)
}
