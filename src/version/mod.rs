//! MongoDB release versions.
//!
//! A [`MongoVersion`] is parsed once from a release string and answers the
//! common questions about it: is it a release candidate, a nightly, part of a
//! stable or development series, and how does it order against other
//! versions.
//!
//! Two numbering schemes exist. Versions before [`END_OF_LEGACY`] use the
//! legacy odd/even scheme implemented by [`LegacyVersion`]. Versions at or
//! after the cutover belong to the modern scheme, which has no parser yet and
//! is rejected with [`VersionError::ModernSchemeNotImplemented`].
//!
//! # Example
//!
//! ```
//! use bond_core::version::{MongoVersion, ReleaseVersion};
//!
//! let version = MongoVersion::parse("3.2.6-rc0").unwrap();
//! assert!(version.is_release_candidate());
//! assert_eq!(version.rc_number(), Some(0));
//! assert_eq!(version.series(), "3.2");
//! ```

mod error;
mod legacy;
mod list;
mod modern;

pub use error::VersionError;
pub use legacy::LegacyVersion;
pub use list::VersionList;
pub use modern::ModernVersion;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;

/// First version number governed by the modern numbering scheme.
pub const END_OF_LEGACY: Version = Version::new(4, 5, 0);

/// Classification and comparison interface shared by every numbering scheme.
pub trait ReleaseVersion {
    /// The exact string the version was parsed from.
    fn source(&self) -> &str;
    /// The parsed semantic version.
    fn parsed(&self) -> &Version;
    /// The release series, e.g. `3.2` for `3.2.6`.
    fn series(&self) -> &str;
    /// Free-form pre-release or nightly tag, if any.
    fn tag(&self) -> Option<&str>;
    /// True for release candidates that are not development builds.
    fn is_release_candidate(&self) -> bool;
    /// True when the minor component is even.
    fn is_stable_series(&self) -> bool;
    /// True when the minor component is odd.
    fn is_development_series(&self) -> bool;
    /// The stable series this version belongs to or leads into.
    fn stable_release_series(&self) -> String;
    /// True for GA and release-candidate builds.
    fn is_release(&self) -> bool;
    /// True for nightlies and other non-release builds.
    fn is_development_build(&self) -> bool;
    /// True for release candidates of the first release of a stable series.
    fn is_initial_stable_release_candidate(&self) -> bool;
    /// The release-candidate ordinal, `None` when not a release candidate.
    fn rc_number(&self) -> Option<u32>;

    /// Numeric precedence only; pre-release tags are ignored.
    fn is_less_than(&self, other: &dyn ReleaseVersion) -> bool;
    /// Textual identity or numeric precedence.
    fn is_less_than_or_equal_to(&self, other: &dyn ReleaseVersion) -> bool;
    /// Numeric precedence only; pre-release tags are ignored.
    fn is_greater_than(&self, other: &dyn ReleaseVersion) -> bool;
    /// Textual identity or numeric precedence.
    fn is_greater_than_or_equal_to(&self, other: &dyn ReleaseVersion) -> bool;
    /// Textual identity of the source strings.
    fn is_equal_to(&self, other: &dyn ReleaseVersion) -> bool;
    /// Negation of [`ReleaseVersion::is_equal_to`].
    fn is_not_equal_to(&self, other: &dyn ReleaseVersion) -> bool;
}

/// Which numbering scheme governs a parsed version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionScheme {
    /// Odd/even minor-version scheme used before 4.5.0.
    Legacy,
    /// Scheme used from 4.5.0 onwards.
    Modern,
}

impl VersionScheme {
    /// Selects the scheme for a parsed version by comparing it to the cutover.
    #[must_use]
    pub fn for_version(parsed: &Version) -> Self {
        if *parsed < END_OF_LEGACY {
            Self::Legacy
        } else {
            Self::Modern
        }
    }
}

/// A parsed MongoDB version, tagged by numbering scheme.
#[derive(Debug, Clone)]
pub enum MongoVersion {
    /// A version before the cutover.
    Legacy(LegacyVersion),
    /// A version at or after the cutover.
    Modern(ModernVersion),
}

impl MongoVersion {
    /// Parses a release string, choosing the scheme from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersionString`] for malformed input and
    /// [`VersionError::ModernSchemeNotImplemented`] for versions at or after
    /// [`END_OF_LEGACY`].
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let mut to_parse = version.to_string();
        if version.ends_with('-') && !version.contains("pre") {
            to_parse.push_str("pre-");
        }
        if let Some((prefix, _)) = version.split_once('~') {
            to_parse = prefix.to_string();
        }

        let parsed =
            Version::parse(&to_parse).map_err(|source| VersionError::invalid(version, source))?;

        match VersionScheme::for_version(&parsed) {
            VersionScheme::Legacy => LegacyVersion::parse(version).map(Self::Legacy),
            VersionScheme::Modern => ModernVersion::parse(version).map(Self::Modern),
        }
    }

    /// The numbering scheme this version belongs to.
    #[must_use]
    pub fn scheme(&self) -> VersionScheme {
        match self {
            Self::Legacy(_) => VersionScheme::Legacy,
            Self::Modern(_) => VersionScheme::Modern,
        }
    }

    fn inner(&self) -> &dyn ReleaseVersion {
        match self {
            Self::Legacy(version) => version,
            Self::Modern(version) => version,
        }
    }
}

impl ReleaseVersion for MongoVersion {
    fn source(&self) -> &str {
        self.inner().source()
    }

    fn parsed(&self) -> &Version {
        self.inner().parsed()
    }

    fn series(&self) -> &str {
        self.inner().series()
    }

    fn tag(&self) -> Option<&str> {
        self.inner().tag()
    }

    fn is_release_candidate(&self) -> bool {
        self.inner().is_release_candidate()
    }

    fn is_stable_series(&self) -> bool {
        self.inner().is_stable_series()
    }

    fn is_development_series(&self) -> bool {
        self.inner().is_development_series()
    }

    fn stable_release_series(&self) -> String {
        self.inner().stable_release_series()
    }

    fn is_release(&self) -> bool {
        self.inner().is_release()
    }

    fn is_development_build(&self) -> bool {
        self.inner().is_development_build()
    }

    fn is_initial_stable_release_candidate(&self) -> bool {
        self.inner().is_initial_stable_release_candidate()
    }

    fn rc_number(&self) -> Option<u32> {
        self.inner().rc_number()
    }

    fn is_less_than(&self, other: &dyn ReleaseVersion) -> bool {
        self.inner().is_less_than(other)
    }

    fn is_less_than_or_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.inner().is_less_than_or_equal_to(other)
    }

    fn is_greater_than(&self, other: &dyn ReleaseVersion) -> bool {
        self.inner().is_greater_than(other)
    }

    fn is_greater_than_or_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.inner().is_greater_than_or_equal_to(other)
    }

    fn is_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.inner().is_equal_to(other)
    }

    fn is_not_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.inner().is_not_equal_to(other)
    }
}

// Equality is textual: "3.2.0-rc0" and "3.2.0" share a numeric triple but are
// different versions.
impl PartialEq for MongoVersion {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Eq for MongoVersion {}

impl fmt::Display for MongoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}

impl FromStr for MongoVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MongoVersion {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for MongoVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<Version> for MongoVersion {
    type Error = VersionError;

    fn try_from(value: Version) -> Result<Self, Self::Error> {
        Self::parse(&value.to_string())
    }
}

/// Compares two parsed versions by their `(major, minor, patch)` triple only.
#[must_use]
pub fn compare_numeric(left: &Version, right: &Version) -> Ordering {
    (left.major, left.minor, left.patch).cmp(&(right.major, right.minor, right.patch))
}

pub(crate) fn is_even_minor(parsed: &Version) -> bool {
    parsed.minor % 2 == 0
}

/// The stable series following a development series; a minor of 9 rolls
/// over into the next major.
pub(crate) fn next_stable_series(parsed: &Version) -> String {
    if parsed.minor < 9 {
        format!("{}.{}", parsed.major, parsed.minor + 1)
    } else {
        format!("{}.0", parsed.major + 1)
    }
}
