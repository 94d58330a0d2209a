// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rusoto_core::Region;
use rusoto_core::credential::{ChainProvider, ProvideAwsCredentials};
use rusoto_s3::{PutObjectRequest, S3, S3Client};

use crate::error::StorageError;

use super::location::StorageLocation;

/// Content type of uploaded feeds
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml";

/// Canned ACL applied to uploaded feeds
pub const PUBLIC_READ_ACL: &str = "public-read";

/// Upper bound for each credential source, instance metadata included
const CREDENTIALS_TIMEOUT: Duration = Duration::from_secs(2);

/// A single object upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest {
    pub location: StorageLocation,
    pub body: Vec<u8>,
    pub content_type: String,
    pub acl: Option<String>,
}

/// Object storage abstraction for testability
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object, replacing any existing one at the same location
    async fn put_object(&self, request: PutRequest) -> Result<(), StorageError>;
}

/// S3 implementation of [`ObjectStore`]
///
/// Credentials come from the standard AWS provider chain.
#[derive(Clone)]
pub struct S3Store {
    client: S3Client,
}

impl S3Store {
    /// Create a store once the default AWS credential chain resolves
    pub async fn connect(region: Option<&str>) -> Result<Self, StorageError> {
        let mut provider = ChainProvider::new();
        provider.set_timeout(CREDENTIALS_TIMEOUT);
        Self::connect_with(region, provider).await
    }

    /// Create a store with an explicit credential provider
    ///
    /// Fails when the provider yields no credentials, so callers learn up
    /// front that uploads cannot work.
    pub async fn connect_with<P>(region: Option<&str>, provider: P) -> Result<Self, StorageError>
    where
        P: ProvideAwsCredentials + Send + Sync + 'static,
    {
        let region = parse_region(region)?;
        debug!("using S3 region {}", region.name());

        provider
            .credentials()
            .await
            .map_err(|e| StorageError::MissingCredentials { source: e })?;

        let dispatcher =
            rusoto_core::HttpClient::new().map_err(|e| StorageError::ClientInit { source: e })?;

        Ok(Self::with_client(S3Client::new_with(dispatcher, provider, region)))
    }

    /// Create a store from a preconfigured client
    pub fn with_client(client: S3Client) -> Self {
        Self { client }
    }
}

/// Explicit region, or the region from the environment
fn parse_region(region: Option<&str>) -> Result<Region, StorageError> {
    match region {
        Some(name) => Region::from_str(name).map_err(|e| StorageError::InvalidRegion {
            region: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(Region::default()),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, request: PutRequest) -> Result<(), StorageError> {
        let location = request.location.to_string();

        let input = PutObjectRequest {
            bucket: request.location.bucket,
            key: request.location.key,
            body: Some(request.body.into()),
            content_type: Some(request.content_type),
            acl: request.acl,
            ..Default::default()
        };

        self.client
            .put_object(input)
            .await
            .map_err(|e| StorageError::UploadFailed {
                location: location.clone(),
                source: e,
            })?;

        debug!("uploaded {location}");
        Ok(())
    }
}

/// Upload feed text as a publicly readable RSS object
pub async fn upload_feed<S: ObjectStore + ?Sized>(
    store: &S,
    location: &StorageLocation,
    content: &str,
) -> Result<(), StorageError> {
    store
        .put_object(PutRequest {
            location: location.clone(),
            body: content.as_bytes().to_vec(),
            content_type: RSS_CONTENT_TYPE.to_string(),
            acl: Some(PUBLIC_READ_ACL.to_string()),
        })
        .await
}

/// Write feed text to `dir/filename`, returning the written path
pub async fn write_feed_file(
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, StorageError> {
    let path = dir.join(filename);
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

    debug!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use rusoto_core::RusotoError;
    use rusoto_core::credential::{AwsCredentials, CredentialsError, StaticProvider};
    use tempfile::tempdir;

    #[derive(Default)]
    struct MockStore {
        puts: Mutex<Vec<PutRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl ObjectStore for MockStore {
        async fn put_object(&self, request: PutRequest) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::UploadFailed {
                    location: request.location.to_string(),
                    source: RusotoError::Validation("access denied".to_string()),
                });
            }
            self.puts.lock().unwrap().push(request);
            Ok(())
        }
    }

    fn location() -> StorageLocation {
        StorageLocation::parse("s3://bucket/feeds/show.rss").unwrap()
    }

    #[tokio::test]
    async fn upload_sets_content_type_and_acl() {
        let store = MockStore::default();

        upload_feed(&store, &location(), "<rss/>").await.unwrap();

        let puts = store.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].location, location());
        assert_eq!(puts[0].body, b"<rss/>");
        assert_eq!(puts[0].content_type, "application/rss+xml");
        assert_eq!(puts[0].acl.as_deref(), Some("public-read"));
    }

    #[tokio::test]
    async fn upload_failure_names_location() {
        let store = MockStore {
            fail: true,
            ..Default::default()
        };

        let err = upload_feed(&store, &location(), "<rss/>").await.unwrap_err();

        assert!(err.to_string().contains("s3://bucket/feeds/show.rss"));
    }

    #[tokio::test]
    async fn write_creates_file() {
        let dir = tempdir().unwrap();

        let path = write_feed_file(dir.path(), "show.rss", "<rss/>").await.unwrap();

        assert_eq!(path, dir.path().join("show.rss"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<rss/>");
    }

    #[tokio::test]
    async fn write_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = write_feed_file(&missing, "show.rss", "<rss/>").await;

        assert!(matches!(result, Err(StorageError::WriteFailed { .. })));
    }

    struct NoCredentials;

    #[async_trait]
    impl ProvideAwsCredentials for NoCredentials {
        async fn credentials(&self) -> Result<AwsCredentials, CredentialsError> {
            Err(CredentialsError::new("no credentials in environment"))
        }
    }

    fn static_credentials() -> StaticProvider {
        StaticProvider::new_minimal("access-key".to_string(), "secret-key".to_string())
    }

    #[tokio::test]
    async fn connect_rejects_unknown_region() {
        let result = S3Store::connect_with(Some("moon-base-1"), static_credentials()).await;
        assert!(matches!(result, Err(StorageError::InvalidRegion { .. })));
    }

    #[tokio::test]
    async fn connect_fails_without_credentials() {
        let result = S3Store::connect_with(Some("eu-north-1"), NoCredentials).await;

        let err = result.err().unwrap();
        assert!(matches!(err, StorageError::MissingCredentials { .. }));
        assert!(err.to_string().contains("no credentials in environment"));
    }

    #[tokio::test]
    async fn connect_succeeds_with_credentials() {
        let result = S3Store::connect_with(Some("eu-north-1"), static_credentials()).await;
        assert!(result.is_ok());
    }
}
