//! Modern (4.5.0 and later) MongoDB version numbering.
//!
//! No parser exists for this scheme yet, so the type has no values:
//! [`ModernVersion::parse`] always fails and every trait method is statically
//! unreachable. Adding the scheme means adding fields here and a real parser;
//! the legacy rules must not be reused for these versions.

use semver::Version;

use super::{ReleaseVersion, VersionError};

/// A version parsed under the modern numbering scheme.
#[derive(Debug, Clone)]
pub enum ModernVersion {}

impl ModernVersion {
    /// Parses a modern release string.
    ///
    /// # Errors
    ///
    /// Always returns [`VersionError::ModernSchemeNotImplemented`].
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        Err(VersionError::ModernSchemeNotImplemented {
            version: version.to_string(),
        })
    }
}

impl ReleaseVersion for ModernVersion {
    fn source(&self) -> &str {
        match *self {}
    }

    fn parsed(&self) -> &Version {
        match *self {}
    }

    fn series(&self) -> &str {
        match *self {}
    }

    fn tag(&self) -> Option<&str> {
        match *self {}
    }

    fn is_release_candidate(&self) -> bool {
        match *self {}
    }

    fn is_stable_series(&self) -> bool {
        match *self {}
    }

    fn is_development_series(&self) -> bool {
        match *self {}
    }

    fn stable_release_series(&self) -> String {
        match *self {}
    }

    fn is_release(&self) -> bool {
        match *self {}
    }

    fn is_development_build(&self) -> bool {
        match *self {}
    }

    fn is_initial_stable_release_candidate(&self) -> bool {
        match *self {}
    }

    fn rc_number(&self) -> Option<u32> {
        match *self {}
    }

    fn is_less_than(&self, _other: &dyn ReleaseVersion) -> bool {
        match *self {}
    }

    fn is_less_than_or_equal_to(&self, _other: &dyn ReleaseVersion) -> bool {
        match *self {}
    }

    fn is_greater_than(&self, _other: &dyn ReleaseVersion) -> bool {
        match *self {}
    }

    fn is_greater_than_or_equal_to(&self, _other: &dyn ReleaseVersion) -> bool {
        match *self {}
    }

    fn is_equal_to(&self, _other: &dyn ReleaseVersion) -> bool {
        match *self {}
    }

    fn is_not_equal_to(&self, _other: &dyn ReleaseVersion) -> bool {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports_not_implemented() {
        let err = ModernVersion::parse("5.0.0").unwrap_err();
        assert!(matches!(
            err,
            VersionError::ModernSchemeNotImplemented { ref version } if version == "5.0.0"
        ));
    }
}
