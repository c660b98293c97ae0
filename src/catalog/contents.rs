//! Directory reading and build-directory validation.

use std::collections::HashSet;
use std::fs::{self, DirEntry};
use std::path::Path;

use super::CatalogError;

/// Binaries every build must ship in its `bin` directory.
pub const REQUIRED_BINARIES: [&str; 2] = ["mongod", "mongos"];

/// Returns the required binary names for the host platform.
#[must_use]
pub fn required_binaries() -> Vec<String> {
    REQUIRED_BINARIES
        .iter()
        .map(|bin| {
            if cfg!(windows) {
                format!("{bin}.exe")
            } else {
                (*bin).to_string()
            }
        })
        .collect()
}

/// Lists the entries of a directory that must exist and be non-empty.
pub(crate) fn read_contents(path: &Path) -> Result<Vec<DirEntry>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::MissingPath {
            path: path.to_path_buf(),
        });
    }

    let entries = fs::read_dir(path)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(|e| CatalogError::io(path, e))?;

    if entries.is_empty() {
        return Err(CatalogError::EmptyDirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(entries)
}

/// Checks that `build_dir/bin` holds every required binary.
///
/// # Errors
///
/// Returns the directory-reading error when `bin` is missing or empty, and
/// [`CatalogError::ValidationFailure`] naming every missing binary.
pub fn validate_build_artifacts(build_dir: &Path, version: &str) -> Result<(), CatalogError> {
    let bin = build_dir.join("bin");
    let present: HashSet<String> = read_contents(&bin)?
        .into_iter()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    let missing: Vec<String> = required_binaries()
        .into_iter()
        .filter(|bin| !present.contains(bin))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::ValidationFailure {
            path: bin,
            version: version.to_string(),
            missing,
        })
    }
}
