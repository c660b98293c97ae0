//! Concurrent download of a batch of releases.
//!
//! [`FetchOrchestrator::run`] resolves releases through the feed, submits one
//! [`DownloadTask`] per archive URL to a worker pool bounded by a semaphore,
//! waits for every task, and reports all failures together.
//!
//! # Concurrency Model
//!
//! - Each task runs in its own Tokio task holding one semaphore permit
//! - Submission waits for a free permit, so at most `workers` tasks run
//! - The pool is created per run and closed when the run is cancelled;
//!   submissions after that are recorded as failures, in-flight transfers
//!   are aborted

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::{DownloadTask, FetchError, FetchFailure, TaskError, TaskOutcome, Transfer};
use crate::artifacts::ArtifactsFeed;
use crate::build::BuildOptions;
use crate::error::{AggregateError, ErrorCollector};

/// Minimum allowed worker count.
pub const MIN_WORKERS: usize = 1;

/// Maximum allowed worker count.
pub const MAX_WORKERS: usize = 256;

const FAILURE_CONTEXT: &str = "problem fetching releases";

/// Settings for one fetch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Number of concurrent downloads.
    pub workers: usize,
    /// Download even when the destination file already exists.
    pub force: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            force: false,
        }
    }
}

/// Worker count matching the host's available parallelism.
#[must_use]
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map_or(MIN_WORKERS, NonZeroUsize::get)
        .min(MAX_WORKERS)
}

/// Counts from a successful fetch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Archives downloaded.
    pub succeeded: usize,
    /// Archives already present.
    pub skipped: usize,
}

impl FetchReport {
    /// Total tasks that reached a successful terminal state.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped
    }
}

/// Downloads the archives of a batch of releases into one directory.
#[derive(Debug)]
pub struct FetchOrchestrator {
    feed: Arc<ArtifactsFeed>,
    transfer: Arc<dyn Transfer>,
    options: FetchOptions,
}

impl FetchOrchestrator {
    /// Creates an orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidWorkers`] when the worker count is outside
    /// `MIN_WORKERS..=MAX_WORKERS`.
    pub fn new(
        feed: Arc<ArtifactsFeed>,
        transfer: Arc<dyn Transfer>,
        options: FetchOptions,
    ) -> Result<Self, FetchError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&options.workers) {
            return Err(FetchError::InvalidWorkers {
                value: options.workers,
                min: MIN_WORKERS,
                max: MAX_WORKERS,
            });
        }

        Ok(Self {
            feed,
            transfer,
            options,
        })
    }

    /// Returns the run settings.
    #[must_use]
    pub fn options(&self) -> FetchOptions {
        self.options
    }

    /// Downloads the archive of every release for `build` into `directory`.
    ///
    /// Resolution, submission and task failures never stop sibling work.
    ///
    /// # Errors
    ///
    /// Returns an aggregate naming every failure when at least one release
    /// was not resolved, submitted, skipped or downloaded.
    #[instrument(skip(self, releases, cancel), fields(directory = %directory.display(), releases = releases.len()))]
    pub async fn run(
        &self,
        releases: &[String],
        directory: &Path,
        build: &BuildOptions,
        cancel: &CancellationToken,
    ) -> Result<FetchReport, AggregateError<FetchFailure>> {
        if let Err(source) = tokio::fs::create_dir_all(directory).await {
            let failure = FetchFailure::Directory {
                path: directory.to_path_buf(),
                source,
            };
            return Err(AggregateError::new(FAILURE_CONTEXT, vec![failure]));
        }

        let mut errors = ErrorCollector::new();

        let semaphore = Arc::new(Semaphore::new(self.options.workers));
        let closer = {
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                cancel.cancelled().await;
                semaphore.close();
            })
        };

        info!(workers = self.options.workers, force = self.options.force, "starting fetch run");

        let (mut urls, mut resolution_errors) =
            self.feed.get_archive_urls(releases.to_vec(), build.clone());

        let mut handles: Vec<(String, JoinHandle<TaskOutcome>)> = Vec::new();
        while let Some(url) = urls.recv().await {
            let task = match DownloadTask::new(&url, directory, self.options.force) {
                Ok(task) => task,
                Err(e) => {
                    errors.add(FetchFailure::Task(e));
                    continue;
                }
            };

            if cancel.is_cancelled() {
                semaphore.close();
            }
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                debug!(%url, "pool is closed, rejecting task");
                errors.add(FetchFailure::Submission { url });
                continue;
            };

            debug!(%url, "submitting download task");
            let transfer = Arc::clone(&self.transfer);
            let cancel = cancel.clone();
            handles.push((
                url,
                tokio::spawn(async move {
                    let _permit = permit;
                    task.run(transfer.as_ref(), &cancel).await
                }),
            ));
        }

        while let Some(batch) = resolution_errors.recv().await {
            errors.extend(batch.into_iter().map(FetchFailure::Resolution));
        }

        debug!(task_count = handles.len(), "waiting for downloads to complete");

        let mut report = FetchReport::default();
        for (url, handle) in handles {
            match handle.await {
                Ok(TaskOutcome::Succeeded { .. }) => report.succeeded += 1,
                Ok(TaskOutcome::Skipped { .. }) => report.skipped += 1,
                Ok(TaskOutcome::Failed(e)) => errors.add(FetchFailure::Task(e)),
                Err(e) => {
                    warn!(%url, error = %e, "download task panicked");
                    errors.add(FetchFailure::Task(TaskError::Panicked {
                        url,
                        message: e.to_string(),
                    }));
                }
            }
        }
        closer.abort();

        info!(
            succeeded = report.succeeded,
            skipped = report.skipped,
            failed = errors.len(),
            "fetch run complete"
        );

        errors.resolve(FAILURE_CONTEXT)?;
        Ok(report)
    }
}
