//! Host operating-system release information from `/etc/*release` files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::error::{AggregateError, ErrorCollector};

/// Directory searched by [`ReleaseInfo::collect`].
pub const RELEASE_DIR: &str = "/etc";

/// Errors collecting host release information.
#[derive(Debug, Error)]
pub enum DistroError {
    /// No `*release` file exists in the directory.
    #[error("found no release file in {}", .dir.display())]
    NoReleaseFile {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// A release file or the directory could not be read.
    #[error("problem reading {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A line is not of the form `KEY=value`.
    #[error("found invalid line '{line}' in {}", .path.display())]
    InvalidLine {
        /// File holding the line.
        path: PathBuf,
        /// The offending line.
        line: String,
    },
}

/// Key/value pairs describing the host distribution (`id`, `version_id`,
/// `pretty_name`, ...). Keys are lower-cased and values unquoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    data: BTreeMap<String, String>,
}

impl ReleaseInfo {
    /// Reads every `/etc/*release` file.
    ///
    /// # Errors
    ///
    /// See [`Self::collect_from`].
    pub fn collect() -> Result<Self, AggregateError<DistroError>> {
        Self::collect_from(RELEASE_DIR)
    }

    /// Reads every file in `dir` whose name ends in `release`.
    ///
    /// Blank lines and `#` comments are ignored.
    ///
    /// # Errors
    ///
    /// Returns an aggregate of every unreadable file and invalid line, or a
    /// single [`DistroError::NoReleaseFile`] when nothing matches.
    pub fn collect_from(dir: impl AsRef<Path>) -> Result<Self, AggregateError<DistroError>> {
        let dir = dir.as_ref();
        let context = "problem collecting release information";

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
            .map_err(|source| {
                AggregateError::new(
                    context,
                    vec![DistroError::Io {
                        path: dir.to_path_buf(),
                        source,
                    }],
                )
            })?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .is_some_and(|name| name.to_string_lossy().ends_with("release"))
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(AggregateError::new(
                context,
                vec![DistroError::NoReleaseFile {
                    dir: dir.to_path_buf(),
                }],
            ));
        }

        let mut info = Self::default();
        let mut errors = ErrorCollector::new();
        for path in files {
            match fs::read_to_string(&path) {
                Ok(text) => info.parse_into(&path, &text, &mut errors),
                Err(source) => errors.add(DistroError::Io { path, source }),
            }
        }

        errors.resolve(context)?;
        debug!(fields = info.len(), "Collected host release info");
        Ok(info)
    }

    fn parse_into(&mut self, path: &Path, text: &str, errors: &mut ErrorCollector<DistroError>) {
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match trimmed.split_once('=') {
                Some((key, value)) => {
                    self.data.insert(
                        key.trim().to_lowercase(),
                        value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string(),
                    );
                }
                None => errors.add(DistroError::InvalidLine {
                    path: path.to_path_buf(),
                    line: line.to_string(),
                }),
            }
        }
    }

    /// Looks up a field by (case-insensitive) key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when no field was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
