//! The release feed: every published version with its downloads.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{ArtifactVersion, FeedError};
use crate::build::BuildOptions;
use crate::http::{HttpTimeouts, build_client};
use crate::version::{MongoVersion, ReleaseVersion, compare_numeric};

/// Public feed of MongoDB releases.
pub const DEFAULT_FEED_URL: &str = "https://downloads.mongodb.org/full.json";

#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    versions: Vec<ArtifactVersion>,
}

/// Parsed release feed with a version-string index.
#[derive(Debug, Default)]
pub struct ArtifactsFeed {
    versions: Vec<ArtifactVersion>,
    by_version: HashMap<String, usize>,
}

impl ArtifactsFeed {
    /// Builds a feed from already-parsed releases and indexes every release.
    #[must_use]
    pub fn from_versions(versions: Vec<ArtifactVersion>) -> Self {
        let mut by_version = HashMap::with_capacity(versions.len());
        for (position, release) in versions.iter().enumerate() {
            release.build_index();
            by_version.insert(release.version.clone(), position);
        }
        Self {
            versions,
            by_version,
        }
    }

    /// Parses a feed document of the form `{"versions": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Parse`] when the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        let document: FeedDocument =
            serde_json::from_str(json).map_err(|source| FeedError::Parse { source })?;
        Ok(Self::from_versions(document.versions))
    }

    /// Reads and parses a feed document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Io`] when the file cannot be read and
    /// [`FeedError::Parse`] when it is malformed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FeedError::io(path, e))?;
        let feed = Self::from_json(&json)?;
        info!(versions = feed.len(), "Loaded release feed");
        Ok(feed)
    }

    /// Downloads and parses the feed document. Nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Network`] or [`FeedError::HttpStatus`] when the
    /// request fails and [`FeedError::Parse`] when the body is malformed.
    #[instrument(skip(timeouts))]
    pub async fn fetch(url: &str, timeouts: HttpTimeouts) -> Result<Self, FeedError> {
        let client = build_client(timeouts).map_err(|e| FeedError::network(url, e))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::network(url, e))?;
        let feed = Self::from_json(&body)?;
        info!(versions = feed.len(), "Fetched release feed");
        Ok(feed)
    }

    /// Number of releases in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true when the feed lists no releases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterates releases in feed order.
    pub fn versions(&self) -> impl Iterator<Item = &ArtifactVersion> {
        self.versions.iter()
    }

    /// Finds a release by exact version string, or by series (`3.2`), in
    /// which case the newest generally available release of that series is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::UnknownRelease`] when nothing matches.
    pub fn get_version(&self, release: &str) -> Result<&ArtifactVersion, FeedError> {
        if let Some(&position) = self.by_version.get(release) {
            return Ok(&self.versions[position]);
        }

        if is_series(release) {
            let prefix = format!("{release}.");
            let newest = self
                .versions
                .iter()
                .filter(|candidate| candidate.version.starts_with(&prefix))
                .filter_map(|candidate| {
                    let parsed = MongoVersion::parse(&candidate.version).ok()?;
                    (parsed.is_release() && !parsed.is_release_candidate())
                        .then_some((parsed, candidate))
                })
                .max_by(|(a, _), (b, _)| compare_numeric(a.parsed(), b.parsed()));

            if let Some((parsed, candidate)) = newest {
                debug!(series = release, version = %parsed, "Resolved release series");
                return Ok(candidate);
            }
        }

        Err(FeedError::unknown_release(release))
    }

    /// Resolves the archive URL of one release for a variant.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::UnknownRelease`] or [`FeedError::Build`].
    pub fn archive_url(&self, release: &str, options: &BuildOptions) -> Result<String, FeedError> {
        self.get_version(release)?
            .archive_url(options)
            .map_err(|source| FeedError::Build {
                release: release.to_string(),
                source,
            })
    }

    /// Resolves every release to an archive URL on a background task.
    ///
    /// URLs arrive on the first channel as they resolve; it closes once all
    /// releases are processed. The second channel then yields exactly one
    /// batch holding every resolution error. Must be called inside a Tokio
    /// runtime.
    pub fn get_archive_urls(
        self: &Arc<Self>,
        releases: Vec<String>,
        options: BuildOptions,
    ) -> (mpsc::Receiver<String>, mpsc::Receiver<Vec<FeedError>>) {
        let (url_tx, url_rx) = mpsc::channel(releases.len().max(1));
        let (error_tx, error_rx) = mpsc::channel(1);
        let feed = Arc::clone(self);

        tokio::spawn(async move {
            let mut errors = Vec::new();
            for release in releases {
                match feed.archive_url(&release, &options) {
                    Ok(url) => {
                        if url_tx.send(url).await.is_err() {
                            warn!(%release, "URL consumer went away, stopping resolution");
                            break;
                        }
                    }
                    Err(e) => {
                        debug!(%release, error = %e, "Release did not resolve");
                        errors.push(e);
                    }
                }
            }
            drop(url_tx);
            if let Err(unsent) = error_tx.send(errors).await {
                debug!(errors = unsent.0.len(), "Error consumer went away, dropping resolution errors");
            }
        });

        (url_rx, error_rx)
    }
}

fn is_series(release: &str) -> bool {
    let mut parts = release.split('.');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(major), Some(minor), None)
            if !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
    )
}
