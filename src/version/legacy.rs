//! Legacy (pre-4.5) MongoDB version numbering.
//!
//! Legacy versions follow the odd/even convention: even minor versions are
//! stable series, odd minor versions are development series. Release
//! candidates carry an `-rcN` tag, nightlies carry a `~suffix` or a trailing
//! hyphen, and any other pre-release tag marks a development build.

use std::cmp::Ordering;

use semver::Version;

use super::{ReleaseVersion, VersionError, compare_numeric, is_even_minor, next_stable_series};

/// A version parsed under the legacy numbering scheme.
#[derive(Debug, Clone)]
pub struct LegacyVersion {
    source: String,
    parsed: Version,
    is_rc: bool,
    is_dev: bool,
    rc_number: Option<u32>,
    series: String,
    tag: Option<String>,
}

impl LegacyVersion {
    /// Parses a legacy release string.
    ///
    /// The scheme is not checked here; callers normally go through
    /// [`MongoVersion::parse`](super::MongoVersion::parse), which routes
    /// versions by cutover.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersionString`] when the (possibly
    /// rewritten) string is not a semantic version, and
    /// [`VersionError::InvalidReleaseCandidate`] when an `rc` tag has no
    /// ordinal.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let mut to_parse = version.to_string();
        let mut is_dev = false;
        let mut nightly_tag = None;

        if to_parse.ends_with('-') {
            is_dev = true;
            if !to_parse.contains("pre") {
                to_parse.push_str("pre-");
            }
        }

        if to_parse.contains('~') {
            let mut parts = to_parse.split('~');
            let prefix = parts.next().unwrap_or_default().to_string();
            nightly_tag = Some(parts.collect::<String>());
            to_parse = format!("{prefix}-pre-");
            is_dev = true;
        }

        let parsed =
            Version::parse(&to_parse).map_err(|source| VersionError::invalid(version, source))?;

        let is_rc = parsed.pre.as_str().contains("rc");
        let mut rc_number = None;
        let mut tag = nightly_tag;

        let tag_parts: Vec<&str> = to_parse.split('-').collect();
        if tag_parts.len() > 1 {
            if tag.is_none() {
                tag = Some(tag_parts[1..].join("-"));
            }

            if is_rc {
                // The first identifier may carry build metadata: 1.0.0-rc0+build
                let rc_tag = tag_parts[1].split('+').next().unwrap_or_default();
                rc_number = Some(rc_ordinal(version, rc_tag)?);
                if tag_parts.len() > 2 {
                    is_dev = true;
                }
            } else {
                is_dev = true;
            }
        }

        let series = to_parse.get(..3).unwrap_or(&to_parse).to_string();

        Ok(Self {
            source: version.to_string(),
            parsed,
            is_rc,
            is_dev,
            rc_number,
            series,
            tag,
        })
    }
}

fn rc_ordinal(version: &str, rc_tag: &str) -> Result<u32, VersionError> {
    let invalid = || VersionError::InvalidReleaseCandidate {
        version: version.to_string(),
        tag: rc_tag.to_string(),
    };
    let start = rc_tag.find("rc").ok_or_else(invalid)? + 2;
    rc_tag[start..].parse::<u32>().map_err(|_| invalid())
}

impl ReleaseVersion for LegacyVersion {
    fn source(&self) -> &str {
        &self.source
    }

    fn parsed(&self) -> &Version {
        &self.parsed
    }

    fn series(&self) -> &str {
        &self.series
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn is_release_candidate(&self) -> bool {
        self.is_release() && self.is_rc
    }

    fn is_stable_series(&self) -> bool {
        is_even_minor(&self.parsed)
    }

    fn is_development_series(&self) -> bool {
        !self.is_stable_series()
    }

    fn stable_release_series(&self) -> String {
        if self.is_stable_series() {
            return self.series.clone();
        }
        next_stable_series(&self.parsed)
    }

    fn is_release(&self) -> bool {
        !self.is_dev
    }

    fn is_development_build(&self) -> bool {
        self.is_dev
    }

    fn is_initial_stable_release_candidate(&self) -> bool {
        self.is_stable_series() && self.parsed.patch == 0 && self.is_release_candidate()
    }

    fn rc_number(&self) -> Option<u32> {
        self.rc_number
    }

    fn is_less_than(&self, other: &dyn ReleaseVersion) -> bool {
        compare_numeric(&self.parsed, other.parsed()) == Ordering::Less
    }

    fn is_less_than_or_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.is_equal_to(other) || self.is_less_than(other)
    }

    fn is_greater_than(&self, other: &dyn ReleaseVersion) -> bool {
        compare_numeric(&self.parsed, other.parsed()) == Ordering::Greater
    }

    fn is_greater_than_or_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.is_equal_to(other) || self.is_greater_than(other)
    }

    fn is_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        self.source == other.source()
    }

    fn is_not_equal_to(&self, other: &dyn ReleaseVersion) -> bool {
        !self.is_equal_to(other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn legacy(s: &str) -> LegacyVersion {
        LegacyVersion::parse(s).unwrap()
    }

    #[test]
    fn test_ga_release() {
        let version = legacy("3.2.6");
        assert!(version.is_release());
        assert!(!version.is_release_candidate());
        assert_eq!(version.rc_number(), None);
        assert_eq!(version.tag(), None);
        assert_eq!(version.series(), "3.2");
        assert_eq!(version.source(), "3.2.6");
    }

    #[test]
    fn test_release_candidate_with_build_metadata() {
        let version = legacy("3.4.0-rc12+buildinfo");
        assert!(version.is_release_candidate());
        assert_eq!(version.rc_number(), Some(12));
        assert!(version.is_initial_stable_release_candidate());
    }

    #[test]
    fn test_initial_stable_release_candidate_requires_patch_zero_and_stable() {
        assert!(!legacy("3.4.1-rc0").is_initial_stable_release_candidate());
        assert!(!legacy("3.5.0-rc0").is_initial_stable_release_candidate());
        assert!(!legacy("3.4.0").is_initial_stable_release_candidate());
        assert!(legacy("3.4.0-rc0").is_initial_stable_release_candidate());
    }

    #[test]
    fn test_git_describe_tag_is_development_build() {
        let version = legacy("3.3.1-123-g1234abc");
        assert!(version.is_development_build());
        assert!(!version.is_release_candidate());
        assert_eq!(version.tag(), Some("123-g1234abc"));
    }

    #[test]
    fn test_trailing_hyphen_synthesizes_pre_tag() {
        let version = legacy("3.0.0-");
        assert!(version.is_development_build());
        assert_eq!(version.parsed().pre.as_str(), "pre-");
        assert_eq!(version.source(), "3.0.0-");
    }

    #[test]
    fn test_nightly_suffix_becomes_tag() {
        let version = legacy("3.1.0~rc0");
        assert!(version.is_development_build());
        assert_eq!(version.tag(), Some("rc0"));
        assert_eq!(version.rc_number(), None);
        assert_eq!(version.series(), "3.1");
    }

    #[test]
    fn test_nightly_of_release_candidate_is_development_build() {
        let version = legacy("3.2.0-rc2~nightly");
        assert!(version.is_development_build());
        assert!(!version.is_release_candidate());
        assert_eq!(version.rc_number(), Some(2));
    }

    #[test]
    fn test_superseded_release_candidate_is_development_build() {
        let version = legacy("2.6.12-rc3-pre-");
        assert!(version.is_development_build());
        assert_eq!(version.rc_number(), Some(3));
    }

    #[test]
    fn test_rc_without_ordinal_is_rejected() {
        let err = LegacyVersion::parse("3.2.0-rcx").unwrap_err();
        assert!(matches!(err, VersionError::InvalidReleaseCandidate { .. }));
    }

    #[test]
    fn test_series_is_three_character_slice() {
        assert_eq!(legacy("2.4.14").series(), "2.4");
        assert_eq!(legacy("3.10.1").series(), "3.1");
    }
}
