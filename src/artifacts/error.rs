//! Error types for artifact lookup and the release feed.

use std::path::PathBuf;

use thiserror::Error;

use crate::build::{Arch, Edition};

/// Errors resolving a build within one artifact version.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArtifactError {
    /// The version has no download for the requested variant.
    #[error("there is no build for {target} ({arch}) in edition {edition}")]
    NoMatchingBuild {
        /// Requested target platform.
        target: String,
        /// Requested architecture.
        arch: Arch,
        /// Requested edition.
        edition: Edition,
    },

    /// The feed version string is not `major.minor.patch`.
    #[error("could not parse version '{version}': {reason}")]
    InvalidVersion {
        /// The feed version string.
        version: String,
        /// Which component failed.
        reason: String,
    },
}

/// Errors loading the release feed or resolving releases against it.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level failure fetching the feed.
    #[error("network error fetching feed {url}: {source}")]
    Network {
        /// Feed URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The feed server answered with a non-success status.
    #[error("HTTP {status} fetching feed {url}")]
    HttpStatus {
        /// Feed URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The feed file could not be read.
    #[error("IO error reading feed {}: {source}", .path.display())]
    Io {
        /// Feed file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The feed document is not valid JSON of the expected shape.
    #[error("could not parse feed document: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No feed entry matches the requested release.
    #[error("release '{release}' is not in the feed")]
    UnknownRelease {
        /// The requested release identifier.
        release: String,
    },

    /// The release exists but has no usable build for the requested variant.
    #[error("problem resolving release '{release}': {source}")]
    Build {
        /// The requested release identifier.
        release: String,
        /// Underlying lookup error.
        #[source]
        source: ArtifactError,
    },
}

impl FeedError {
    /// Creates a network error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an unknown-release error.
    pub fn unknown_release(release: impl Into<String>) -> Self {
        Self::UnknownRelease {
            release: release.into(),
        }
    }
}
