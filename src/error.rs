use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a decoded series violates the data model contract
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Series has an empty GUID")]
    MissingGuid,
}

/// Errors that can occur when fetching series data from the API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Series GUID must not be empty")]
    EmptyGuid,

    #[error("Invalid series URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to fetch series data from {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned status code {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode JSON response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid series data from {url}: {source}")]
    Invalid {
        url: String,
        #[source]
        source: SeriesError,
    },
}

/// Errors that can occur while rendering a feed document
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to serialize RSS feed: {0}")]
    Serialize(#[from] rss::Error),

    #[error("RSS feed is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Errors from the latest-episode query
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LatestEpisodeError {
    #[error("no episodes found")]
    NoEpisodes,

    #[error("no valid episodes found")]
    NoValidEpisodes,
}

/// Errors that can occur when writing or uploading a feed
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid S3 path '{path}': must start with s3://")]
    MissingScheme { path: String },

    #[error("Invalid S3 path '{path}': missing bucket")]
    MissingBucket { path: String },

    #[error("Invalid S3 path '{path}': must be in format s3://bucket/key")]
    MissingKey { path: String },

    #[error("Invalid AWS region '{region}': {reason}")]
    InvalidRegion { region: String, reason: String },

    #[error("No AWS credentials found: {source}")]
    MissingCredentials {
        #[source]
        source: rusoto_core::credential::CredentialsError,
    },

    #[error("Failed to create S3 HTTP client: {source}")]
    ClientInit {
        #[source]
        source: rusoto_core::request::TlsError,
    },

    #[error("Failed to write feed file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to upload to {location}: {source}")]
    UploadFailed {
        location: String,
        #[source]
        source: rusoto_core::RusotoError<rusoto_s3::PutObjectError>,
    },
}

/// Errors that can occur when loading the series configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file {0} lists no series")]
    NoSeries(PathBuf),
}

/// Top-level errors for a fetch, transform and store run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Error fetching series data: {0}")]
    Fetch(#[from] FetchError),

    #[error("Error generating RSS feed: {0}")]
    Feed(#[from] FeedError),

    #[error("Error storing RSS feed: {0}")]
    Storage(#[from] StorageError),

    #[error("Error finding latest episode: {0}")]
    Latest(#[from] LatestEpisodeError),
}

/// Errors from the interactive terminal menu
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Error copying to clipboard: {0}")]
    Clipboard(#[from] arboard::Error),
}
