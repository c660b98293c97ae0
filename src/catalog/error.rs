//! Error types for the local build catalog.

use std::path::PathBuf;

use thiserror::Error;

use crate::build::{Arch, BuildError, Edition};

/// Errors building or querying a [`BuildCatalog`](super::BuildCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The path does not exist.
    #[error("path {} does not exist", .path.display())]
    MissingPath {
        /// The missing path.
        path: PathBuf,
    },

    /// The directory exists but holds nothing.
    #[error("path {} is empty", .path.display())]
    EmptyDirectory {
        /// The empty directory.
        path: PathBuf,
    },

    /// Filesystem error while reading a directory.
    #[error("problem reading {}: {source}", .path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The directory name could not be classified as a build.
    #[error("problem collecting information about build {}: {source}", .path.display())]
    Naming {
        /// The candidate directory.
        path: PathBuf,
        /// Underlying naming error.
        #[source]
        source: BuildError,
    },

    /// Required binaries are missing from the build's `bin` directory.
    #[error("binaries {} are missing from {} for {version}", .missing.join(", "), .path.display())]
    ValidationFailure {
        /// The `bin` directory that was checked.
        path: PathBuf,
        /// Version derived for the build.
        version: String,
        /// Names of the missing binaries.
        missing: Vec<String>,
    },

    /// A build with the same identity is already registered.
    #[error("path {} duplicates build at {}", .path.display(), .existing.display())]
    DuplicateArtifact {
        /// The rejected path.
        path: PathBuf,
        /// The path already registered for this identity.
        existing: PathBuf,
    },

    /// No registered build matches the lookup.
    #[error(
        "could not find version {version}, edition {edition}, target {target}, arch {arch} in {}",
        .root.display()
    )]
    NotFound {
        /// Requested version.
        version: String,
        /// Requested edition.
        edition: Edition,
        /// Requested target.
        target: String,
        /// Requested architecture.
        arch: Arch,
        /// Catalog root.
        root: PathBuf,
    },
}

impl CatalogError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
