pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod menu;
pub mod pipeline;
pub mod progress;
pub mod series;
pub mod storage;

// Re-export main types for convenience
pub use config::{Config, SeriesEntry};
pub use error::{
    ConfigError, FeedError, FetchError, LatestEpisodeError, MenuError, PipelineError,
    SeriesError, StorageError,
};
pub use feed::{format_duration, generate_feed, latest_episode_date};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use pipeline::{
    Destination, PublishOutcome, generate_and_upload, generate_to_file, latest_for_series,
};
pub use progress::{
    LogReporter, NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter,
};
pub use series::{Episode, SeriesData, SeriesEndpoint, fetch_series};
pub use storage::{ObjectStore, S3Store, StorageLocation, local_feed_filename};
