//! Concurrent retrieval of release archives.
//!
//! - [`Transfer`] - object-safe byte transfer seam, [`HttpTransfer`] streams with reqwest
//! - [`DownloadTask`] - one URL into one directory, skipped when already present
//! - [`FetchOrchestrator`] - resolves releases and runs tasks on a bounded pool

mod error;
mod orchestrator;
mod task;
mod transfer;

pub use error::{FetchError, FetchFailure, TaskError, TransferError};
pub use orchestrator::{
    FetchOptions, FetchOrchestrator, FetchReport, MAX_WORKERS, MIN_WORKERS, default_workers,
};
pub use task::{DownloadTask, TaskOutcome};
pub use transfer::{HttpTransfer, Transfer};
