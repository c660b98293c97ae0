//! Error types for release version parsing.

use thiserror::Error;

/// Errors that can occur while parsing a release version string.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The string is not a valid `major.minor.patch[-pre][+build]` version.
    #[error("invalid version string '{version}': {source}")]
    InvalidVersionString {
        /// The rejected input.
        version: String,
        /// The underlying semantic-version parse error.
        #[source]
        source: semver::Error,
    },

    /// The version carries an `rc` tag without a numeric ordinal after it.
    #[error("invalid version string '{version}': release candidate tag '{tag}' has no ordinal")]
    InvalidReleaseCandidate {
        /// The rejected input.
        version: String,
        /// The pre-release identifier holding the `rc` token.
        tag: String,
    },

    /// The version is at or past the legacy cutover and the modern numbering
    /// scheme has no parser.
    #[error("version '{version}' uses the modern numbering scheme, which is not implemented")]
    ModernSchemeNotImplemented {
        /// The rejected input.
        version: String,
    },
}

impl VersionError {
    /// Creates an invalid-version error from a semver parse failure.
    pub fn invalid(version: impl Into<String>, source: semver::Error) -> Self {
        Self::InvalidVersionString {
            version: version.into(),
            source,
        }
    }

    /// Returns the input string that failed to parse.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::InvalidVersionString { version, .. }
            | Self::InvalidReleaseCandidate { version, .. }
            | Self::ModernSchemeNotImplemented { version } => version,
        }
    }
}
