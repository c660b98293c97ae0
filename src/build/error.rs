//! Error types for build options and artifact file-name classification.

use thiserror::Error;

/// Errors describing build options or artifact names that cannot be
/// classified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Edition spelling is not one of the known feed editions.
    #[error("unknown edition '{value}' (expected enterprise, targeted, or base)")]
    UnknownEdition {
        /// The rejected spelling.
        value: String,
    },

    /// Architecture spelling is not one of the known feed architectures.
    #[error("unknown architecture '{value}' (expected x86_64, i686, ppc64le, or s390x)")]
    UnknownArch {
        /// The rejected spelling.
        value: String,
    },

    /// Build options are incomplete.
    #[error("invalid build options: {}", .problems.join("; "))]
    InvalidOptions {
        /// Every problem found, in field order.
        problems: Vec<String>,
    },

    /// No architecture token was found in an artifact name.
    #[error("artifact name '{name}' does not contain a recognized architecture")]
    UnrecognizedArch {
        /// The artifact file or directory name.
        name: String,
    },

    /// No edition could be derived from an artifact name.
    #[error("artifact name '{name}' does not have a recognized edition")]
    UnrecognizedEdition {
        /// The artifact file or directory name.
        name: String,
    },

    /// No target platform could be derived from an artifact name.
    #[error("could not determine target platform for '{name}'")]
    UnrecognizedTarget {
        /// The artifact file or directory name.
        name: String,
    },

    /// No version segment was found in an artifact name.
    #[error("artifact name '{name}' does not contain a version")]
    MissingVersion {
        /// The artifact file or directory name.
        name: String,
    },
}
