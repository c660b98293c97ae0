//! Read-only listing of a catalog directory.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{CatalogError, contents, validate_build_artifacts};
use crate::build::{ARTIFACT_PREFIX, listing_version};

/// One build directory found by [`list_contents`].
#[derive(Debug)]
pub struct ListingEntry {
    /// Version derived from the directory name.
    pub version: String,
    /// Absolute directory path.
    pub path: PathBuf,
    /// Outcome of checking the required binaries.
    pub validation: Result<(), CatalogError>,
}

impl ListingEntry {
    /// Returns true when the directory holds every required binary.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }
}

/// Lists every `mongodb-` directory under `path` with its version and
/// validation result. Invalid builds are reported, not rejected. Archives
/// and other files are skipped.
///
/// # Errors
///
/// Returns an error only when `path` itself is missing, empty or unreadable.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn list_contents(path: impl AsRef<Path>) -> Result<Vec<ListingEntry>, CatalogError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let root = std::path::absolute(path).map_err(|e| CatalogError::io(path, e))?;

    let mut listing = Vec::new();
    for entry in contents::read_contents(&root)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(ARTIFACT_PREFIX) {
            debug!(%name, "Skipping non-artifact entry");
            continue;
        }
        let full_path = entry.path();
        if !full_path.is_dir() {
            debug!(%name, "Skipping file, likely an archive");
            continue;
        }

        let version = listing_version(&name);
        debug!(%name, %version, "Found build directory");
        let validation = validate_build_artifacts(&full_path, &version);
        listing.push(ListingEntry {
            version,
            path: full_path,
            validation,
        });
    }

    listing.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(listing)
}
