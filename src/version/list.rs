//! Sortable, printable collections of versions.

use std::fmt;
use std::ops::Deref;

use super::{MongoVersion, ReleaseVersion, compare_numeric};

/// An ordered list of versions.
///
/// Sorting is stable and uses only the numeric `(major, minor, patch)`
/// triple, so versions sharing a triple keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionList(Vec<MongoVersion>);

impl VersionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a version.
    pub fn push(&mut self, version: MongoVersion) {
        self.0.push(version);
    }

    /// Sorts ascending by numeric triple.
    pub fn sort(&mut self) {
        self.0
            .sort_by(|left, right| compare_numeric(left.parsed(), right.parsed()));
    }

    /// Consumes the list, returning the versions.
    #[must_use]
    pub fn into_inner(self) -> Vec<MongoVersion> {
        self.0
    }
}

impl Deref for VersionList {
    type Target = [MongoVersion];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<MongoVersion>> for VersionList {
    fn from(versions: Vec<MongoVersion>) -> Self {
        Self(versions)
    }
}

impl FromIterator<MongoVersion> for VersionList {
    fn from_iter<I: IntoIterator<Item = MongoVersion>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for VersionList {
    type Item = MongoVersion;
    type IntoIter = std::vec::IntoIter<MongoVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Comma-separated; entries with an empty string form are skipped.
impl fmt::Display for VersionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<&str> = self
            .0
            .iter()
            .map(|version| version.source())
            .filter(|s| !s.is_empty())
            .collect();
        f.write_str(&rendered.join(", "))
    }
}
