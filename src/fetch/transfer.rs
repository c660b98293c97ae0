//! Byte transfer from a URL to a local file.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::TransferError;
use crate::http::{HttpTimeouts, build_client};

/// Downloads one URL into one destination file.
#[async_trait]
pub trait Transfer: Send + Sync + fmt::Debug {
    /// Writes the body of `url` to `destination`, returning the byte count.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] when the request or the write fails.
    async fn download_to_file(&self, url: &str, destination: &Path) -> Result<u64, TransferError>;
}

/// Streaming HTTP transfer backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    client: Client,
}

impl HttpTransfer {
    /// Creates a transfer with its own client.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Network`] when the client cannot be built.
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, TransferError> {
        let client = build_client(timeouts).map_err(|source| TransferError::Network { source })?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    #[instrument(skip(self), fields(destination = %destination.display()))]
    async fn download_to_file(&self, url: &str, destination: &Path) -> Result<u64, TransferError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransferError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let mut file = File::create(destination)
            .await
            .map_err(|e| TransferError::io(destination, e))?;

        let result = stream_to_file(&mut file, response, destination).await;
        if result.is_err() {
            debug!("cleaning up partial file after error");
            let _ = tokio::fs::remove_file(destination).await;
        }
        result
    }
}

/// Streams the response body into `file`, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    destination: &Path,
) -> Result<u64, TransferError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(TransferError::from_reqwest)?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| TransferError::io(destination, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| TransferError::io(destination, e))?;

    Ok(bytes_written)
}
