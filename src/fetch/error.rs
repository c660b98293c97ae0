//! Error types for artifact transfers and fetch runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::artifacts::FeedError;

/// Errors from a single byte transfer. The caller knows the URL.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-level failure.
    #[error("network error: {source}")]
    Network {
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// Writing the destination file failed.
    #[error("IO error writing {}: {source}", .path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl TransferError {
    /// Classifies a reqwest error as a timeout or a network error.
    #[must_use]
    pub fn from_reqwest(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout
        } else {
            Self::Network { source }
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors creating or running one download task.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The URL is not an absolute http(s) URL naming a file.
    #[error("{url} is not a valid download URL: {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The destination exists and is not a directory.
    #[error("{} is not a directory, cannot download files into it", .path.display())]
    NotADirectory {
        /// The destination directory.
        path: PathBuf,
    },

    /// The transfer failed; the partial file was removed.
    #[error("problem downloading {url}: {source}")]
    Transfer {
        /// Source URL.
        url: String,
        /// Underlying transfer error.
        #[source]
        source: TransferError,
    },

    /// The run was cancelled while the transfer was in flight.
    #[error("download of {url} was cancelled")]
    Cancelled {
        /// Source URL.
        url: String,
    },

    /// The task panicked or was aborted by the runtime.
    #[error("download task for {url} did not complete: {message}")]
    Panicked {
        /// Source URL.
        url: String,
        /// Join error description.
        message: String,
    },
}

/// One failure contributing to a failed fetch run.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// A requested release could not be resolved to a URL.
    #[error("resolution failed: {0}")]
    Resolution(#[source] FeedError),

    /// A task could not be created or did not succeed.
    #[error(transparent)]
    Task(TaskError),

    /// The worker pool refused the task (closed after cancellation).
    #[error("problem submitting download task for {url}: worker pool is closed")]
    Submission {
        /// URL of the refused task.
        url: String,
    },

    /// The download directory could not be created.
    #[error("could not create download directory {}: {source}", .path.display())]
    Directory {
        /// The download directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors configuring a fetch orchestrator.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Worker count outside the accepted range.
    #[error("invalid worker count {value}: must be between {min} and {max}")]
    InvalidWorkers {
        /// The rejected value.
        value: usize,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },
}
