//! A single download of one URL into a directory.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::{TaskError, Transfer};

/// Terminal state of a [`DownloadTask`]. A task is pending until `run`
/// returns one of these.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The destination already existed and the download was not forced.
    Skipped {
        /// Existing destination file.
        path: PathBuf,
    },
    /// The archive was written to disk.
    Succeeded {
        /// Destination file.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The download failed; no partial file remains.
    Failed(TaskError),
}

/// Download of one archive URL into a directory, named after the URL's last
/// path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    url: String,
    directory: PathBuf,
    file_name: String,
    force: bool,
}

impl DownloadTask {
    /// Creates a task for `url`, downloading into `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidUrl`] when `url` is not an absolute
    /// http(s) URL ending in a file name, and [`TaskError::NotADirectory`]
    /// when `directory` exists but is not a directory.
    pub fn new(url: &str, directory: impl AsRef<Path>, force: bool) -> Result<Self, TaskError> {
        let invalid = |reason: &str| TaskError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }

        let file_name = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| invalid("URL does not name a file"))?
            .to_string();

        let directory = directory.as_ref();
        if directory.exists() && !directory.is_dir() {
            return Err(TaskError::NotADirectory {
                path: directory.to_path_buf(),
            });
        }

        Ok(Self {
            url: url.to_string(),
            directory: directory.to_path_buf(),
            file_name,
            force,
        })
    }

    /// Source URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Destination file path.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Returns true when the destination exists and the task is not forced.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        !self.force && self.destination().exists()
    }

    /// Runs the task to a terminal state.
    ///
    /// The skip check happens before any transfer is attempted. On failure
    /// or cancellation the destination file is removed.
    pub async fn run(self, transfer: &dyn Transfer, cancel: &CancellationToken) -> TaskOutcome {
        let path = self.destination();

        if self.is_satisfied() {
            info!(path = %path.display(), "file is already downloaded");
            return TaskOutcome::Skipped { path };
        }

        if cancel.is_cancelled() {
            return TaskOutcome::Failed(TaskError::Cancelled { url: self.url });
        }

        debug!(url = %self.url, path = %path.display(), "starting download");
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(TaskError::Cancelled { url: self.url.clone() }),
            result = transfer.download_to_file(&self.url, &path) => {
                result.map_err(|source| TaskError::Transfer { url: self.url.clone(), source })
            }
        };

        match result {
            Ok(bytes) => {
                info!(path = %path.display(), bytes, "downloaded file");
                TaskOutcome::Succeeded { path, bytes }
            }
            Err(error) => {
                warn!(url = %self.url, error = %error, "download failed");
                remove_partial(&path).await;
                TaskOutcome::Failed(error)
            }
        }
    }
}

async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed partial file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial file"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::fetch::TransferError;

    #[derive(Debug, Default)]
    struct RecordingTransfer {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Transfer for RecordingTransfer {
        async fn download_to_file(&self, _url: &str, destination: &Path) -> Result<u64, TransferError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::fs::write(destination, b"partial")
                .await
                .map_err(|e| TransferError::io(destination, e))?;
            if self.fail {
                return Err(TransferError::HttpStatus { status: 500 });
            }
            Ok(7)
        }
    }

    const URL: &str = "https://fastdl.example.com/linux/mongodb-linux-x86_64-3.2.6.tgz";

    #[test]
    fn test_file_name_comes_from_url() {
        let task = DownloadTask::new(URL, "/tmp/builds", false).unwrap();
        assert_eq!(
            task.destination(),
            PathBuf::from("/tmp/builds/mongodb-linux-x86_64-3.2.6.tgz")
        );
    }

    #[test]
    fn test_rejects_non_http_and_nameless_urls() {
        for url in ["ftp://example.com/a.tgz", "not a url", "https://example.com/"] {
            assert!(
                matches!(DownloadTask::new(url, "/tmp", false), Err(TaskError::InvalidUrl { .. })),
                "{url}"
            );
        }
    }

    #[test]
    fn test_rejects_file_as_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, b"").unwrap();

        assert!(matches!(
            DownloadTask::new(URL, &file, false),
            Err(TaskError::NotADirectory { .. })
        ));
    }

    #[tokio::test]
    async fn test_existing_file_is_skipped_without_transfer() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mongodb-linux-x86_64-3.2.6.tgz"), b"done").unwrap();
        let transfer = RecordingTransfer::default();

        let outcome = DownloadTask::new(URL, dir.path(), false)
            .unwrap()
            .run(&transfer, &CancellationToken::new())
            .await;

        assert!(matches!(outcome, TaskOutcome::Skipped { .. }));
        assert_eq!(transfer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_forced_task_downloads_over_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mongodb-linux-x86_64-3.2.6.tgz"), b"old").unwrap();
        let transfer = RecordingTransfer::default();

        let outcome = DownloadTask::new(URL, dir.path(), true)
            .unwrap()
            .run(&transfer, &CancellationToken::new())
            .await;

        assert!(matches!(outcome, TaskOutcome::Succeeded { bytes: 7, .. }));
        assert_eq!(transfer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_transfer_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let transfer = RecordingTransfer {
            fail: true,
            ..RecordingTransfer::default()
        };
        let task = DownloadTask::new(URL, dir.path(), false).unwrap();
        let destination = task.destination();

        let outcome = task.run(&transfer, &CancellationToken::new()).await;

        assert!(matches!(
            outcome,
            TaskOutcome::Failed(TaskError::Transfer {
                source: TransferError::HttpStatus { status: 500 },
                ..
            })
        ));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_cancelled_task_does_not_start() {
        let dir = TempDir::new().unwrap();
        let transfer = RecordingTransfer::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = DownloadTask::new(URL, dir.path(), false)
            .unwrap()
            .run(&transfer, &cancel)
            .await;

        assert!(matches!(outcome, TaskOutcome::Failed(TaskError::Cancelled { .. })));
        assert_eq!(transfer.calls.load(Ordering::SeqCst), 0);
    }
}
