//! Build variant descriptions: edition, architecture, target, debug.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BuildError;

/// Distribution flavor of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edition {
    /// MongoDB Enterprise.
    #[serde(rename = "enterprise")]
    Enterprise,
    /// Community builds targeted at a specific distribution.
    #[serde(rename = "targeted")]
    CommunityTargeted,
    /// Generic community builds.
    #[serde(rename = "base")]
    Base,
    /// Source tarballs; never resolved as a build.
    #[serde(rename = "source")]
    Source,
    /// Any edition this crate does not model, e.g. `subscription`.
    #[serde(rename = "other", other)]
    Other,
}

impl Edition {
    /// Returns the feed spelling of the edition.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::CommunityTargeted => "targeted",
            Self::Base => "base",
            Self::Source => "source",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enterprise" => Ok(Self::Enterprise),
            "targeted" => Ok(Self::CommunityTargeted),
            "base" => Ok(Self::Base),
            "source" => Ok(Self::Source),
            _ => Err(BuildError::UnknownEdition {
                value: s.to_string(),
            }),
        }
    }
}

/// CPU architecture of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    /// 64-bit x86.
    #[serde(rename = "x86_64")]
    X86_64,
    /// 32-bit x86.
    #[serde(rename = "i686")]
    I686,
    /// 64-bit little-endian POWER.
    #[serde(rename = "ppc64le")]
    Ppc64le,
    /// IBM Z.
    #[serde(rename = "s390x")]
    S390x,
    /// Any architecture this crate does not model, e.g. `arm64`.
    #[serde(rename = "other", other)]
    Other,
}

impl Arch {
    /// Every modeled architecture, in file-name detection order.
    pub const KNOWN: [Self; 4] = [Self::X86_64, Self::I686, Self::Ppc64le, Self::S390x];

    /// Returns the feed spelling of the architecture.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::I686 => "i686",
            Self::Ppc64le => "ppc64le",
            Self::S390x => "s390x",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| BuildError::UnknownArch {
                value: s.to_string(),
            })
    }
}

/// One build flavor of a version: `{target, arch, edition, debug}`.
///
/// Equality and hashing cover all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Target platform, e.g. `linux_x86_64`, `osx`, `rhel62`.
    pub target: String,
    /// CPU architecture.
    pub arch: Arch,
    /// Distribution edition.
    pub edition: Edition,
    /// Debug-symbols build.
    pub debug: bool,
}

impl BuildOptions {
    /// Creates non-debug build options.
    pub fn new(target: impl Into<String>, arch: Arch, edition: Edition) -> Self {
        Self {
            target: target.into(),
            arch,
            edition,
            debug: false,
        }
    }

    /// Sets the debug flag (builder pattern).
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Pairs these options with a version to form a catalog identity.
    #[must_use]
    pub fn build_info(&self, version: impl Into<String>) -> BuildInfo {
        BuildInfo {
            version: version.into(),
            options: self.clone(),
        }
    }

    /// Checks that every field names a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidOptions`] listing every problem found.
    pub fn validate(&self) -> Result<(), BuildError> {
        let mut problems = Vec::new();
        if self.target.is_empty() {
            problems.push("missing target".to_string());
        }
        if self.arch == Arch::Other {
            problems.push("missing arch".to_string());
        }
        if matches!(self.edition, Edition::Other | Edition::Source) {
            problems.push(format!("unsupported edition '{}'", self.edition));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(BuildError::InvalidOptions { problems })
        }
    }
}

impl fmt::Display for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("{}"),
        }
    }
}

/// A resolved build identity: version plus build options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildInfo {
    /// Version string as it appears in the artifact name or feed.
    pub version: String,
    /// Build flavor.
    pub options: BuildOptions,
}
