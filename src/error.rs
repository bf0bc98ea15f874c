//! Custom error types for the trade watcher
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

/// Errors raised while talking to the listing endpoint
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid page index {0} (pages are 1-indexed)")]
    InvalidPage(u32),

    #[error("Invalid page size {0} (must be positive)")]
    InvalidPageSize(u32),

    /// Failure reported by a non-HTTP listing backend
    #[error("Listing backend error: {0}")]
    Backend(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Poller scheduling errors
#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}
