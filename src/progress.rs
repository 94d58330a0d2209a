use std::sync::Arc;

/// Events emitted while fetching, rendering and storing a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Series data is being requested
    FetchingSeries { guid: String },

    /// Series data has been decoded
    SeriesFetched {
        title: String,
        author: String,
        episode_count: usize,
    },

    /// The RSS document has been rendered
    FeedGenerated { bytes: usize },

    /// The feed was written to a local file
    FeedWritten { path: String },

    /// The feed is being uploaded
    UploadingFeed { location: String },

    /// The feed was uploaded to object storage
    FeedUploaded { location: String },
}

/// Trait for reporting progress events.
///
/// Implementations can use this to drive spinners, log messages,
/// or collect events in tests.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests, quiet mode and the terminal menu.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

/// Reporter that forwards events to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, event: ProgressEvent) {
        log::debug!("{event:?}");
    }
}

impl LogReporter {
    /// Create a new LogReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
