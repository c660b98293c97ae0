//! Registry of builds already present on the local filesystem.
//!
//! A catalog root holds one directory per build, named after the artifact
//! (`mongodb-linux-x86_64-3.2.6`). [`BuildCatalog::scan`] registers every
//! such directory whose `bin` holds the required binaries; [`list_contents`]
//! reports the same directories without registering them.

mod contents;
mod error;
mod listing;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, instrument};

use crate::build::{ARTIFACT_PREFIX, Arch, BuildInfo, BuildOptions, Edition, build_info_from_file_name};
use crate::error::{AggregateError, ErrorCollector};

pub use contents::{REQUIRED_BINARIES, required_binaries, validate_build_artifacts};
pub use error::CatalogError;
pub use listing::{ListingEntry, list_contents};

/// Thread-safe map from build identity to the directory holding the build.
#[derive(Debug)]
pub struct BuildCatalog {
    root: PathBuf,
    table: RwLock<HashMap<BuildInfo, PathBuf>>,
}

impl BuildCatalog {
    /// Creates an empty catalog rooted at `root` (made absolute).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the current directory is needed to
    /// absolutize `root` and cannot be read.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let root = root.as_ref();
        let root = std::path::absolute(root).map_err(|e| CatalogError::io(root, e))?;
        Ok(Self {
            root,
            table: RwLock::new(HashMap::new()),
        })
    }

    /// Builds a catalog from every `mongodb-` directory directly under
    /// `root`.
    ///
    /// Every candidate is attempted; failures do not stop the scan.
    ///
    /// # Errors
    ///
    /// Returns an aggregate of every candidate failure, or a single-entry
    /// aggregate when `root` itself cannot be read.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn scan(root: impl AsRef<Path>) -> Result<Self, AggregateError<CatalogError>> {
        let root = root.as_ref();
        let context = format!("problem building build catalog from path {}", root.display());

        let catalog = Self::new(root).map_err(|e| AggregateError::new(&context, vec![e]))?;
        let entries = contents::read_contents(&catalog.root)
            .map_err(|e| AggregateError::new(&context, vec![e]))?;

        let mut errors = ErrorCollector::new();
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(ARTIFACT_PREFIX) || !entry.path().is_dir() {
                continue;
            }
            errors.check(catalog.add(entry.path()));
        }

        errors.resolve(context)?;
        info!(builds = catalog.len(), "Scanned build catalog");
        Ok(catalog)
    }

    /// Registers one build directory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Naming`] when the name cannot be classified,
    /// the validation error when required binaries are missing, and
    /// [`CatalogError::DuplicateArtifact`] when the identity is already
    /// registered. A rejected add leaves the catalog unchanged. Relative
    /// paths are stored resolved against the working directory.
    pub fn add(&self, path: impl AsRef<Path>) -> Result<BuildInfo, CatalogError> {
        let path = path.as_ref();
        let path = &std::path::absolute(path).map_err(|e| CatalogError::io(path, e))?;
        let name = path.to_string_lossy();
        let info = build_info_from_file_name(&name).map_err(|source| CatalogError::Naming {
            path: path.to_path_buf(),
            source,
        })?;

        validate_build_artifacts(path, &info.version)?;

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = table.get(&info) {
            return Err(CatalogError::DuplicateArtifact {
                path: path.to_path_buf(),
                existing: existing.clone(),
            });
        }

        debug!(path = %path.display(), version = %info.version, "Registered build");
        table.insert(info.clone(), path.to_path_buf());
        Ok(info)
    }

    /// Finds the directory of a registered build.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] naming the lookup and the root.
    pub fn lookup(
        &self,
        version: &str,
        edition: Edition,
        target: &str,
        arch: Arch,
        debug: bool,
    ) -> Result<PathBuf, CatalogError> {
        let info = BuildOptions::new(target, arch, edition)
            .with_debug(debug)
            .build_info(version);

        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table.get(&info).cloned().ok_or_else(|| CatalogError::NotFound {
            version: version.to_string(),
            edition,
            target: target.to_string(),
            arch,
            root: self.root.clone(),
        })
    }

    /// Absolute catalog root.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Number of registered builds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when no build is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every registered build, ordered by path.
    #[must_use]
    pub fn entries(&self) -> Vec<(BuildInfo, PathBuf)> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<_> = table
            .iter()
            .map(|(info, path)| (info.clone(), path.clone()))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        entries
    }
}
