//! A feed entry for one release and its per-variant download index.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ArtifactDownload, ArtifactError};
use crate::build::{Arch, BuildOptions, Edition};

/// Every variant a release was published in, source tarballs excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTypes {
    /// Release version.
    pub version: String,
    /// Distinct targets, in feed order.
    pub targets: Vec<String>,
    /// Distinct editions, in feed order.
    pub editions: Vec<Edition>,
    /// Distinct architectures, in feed order.
    pub architectures: Vec<Arch>,
}

/// One release in the feed.
///
/// Lookups go through a lock-guarded index keyed by [`BuildOptions`], so
/// resolution may run from many tasks while the index is rebuilt.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArtifactVersion {
    /// Release version string.
    pub version: String,
    /// Published builds.
    #[serde(default)]
    pub downloads: Vec<ArtifactDownload>,
    /// Git commit of the release.
    #[serde(default, rename = "githash")]
    pub git_hash: String,
    /// Production release flag.
    #[serde(default)]
    pub production_release: bool,
    /// Development release flag.
    #[serde(default)]
    pub development_release: bool,
    /// Current release flag.
    #[serde(default)]
    pub current: bool,
    #[serde(skip)]
    index: RwLock<HashMap<BuildOptions, ArtifactDownload>>,
}

impl ArtifactVersion {
    /// Creates a release with the given downloads and a built index.
    pub fn new(version: impl Into<String>, downloads: Vec<ArtifactDownload>) -> Self {
        let release = Self {
            version: version.into(),
            downloads,
            ..Self::default()
        };
        release.build_index();
        release
    }

    /// Rebuilds the lookup index from `downloads` under the write lock.
    /// Later downloads with the same key replace earlier ones.
    pub fn build_index(&self) {
        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
        index.clear();
        for download in &self.downloads {
            index.insert(download.build_options(), download.clone());
        }
        debug!(version = %self.version, entries = index.len(), "Rebuilt download index");
    }

    /// Resolves the download for a variant.
    ///
    /// Requests for a base linux build are keyed by the arch-qualified target
    /// (`linux_x86_64`), macOS builds switched from `osx` to `macos` in 4.1,
    /// and debug builds are never indexed.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NoMatchingBuild`] when no download matches, or
    /// [`ArtifactError::InvalidVersion`] when an `osx` request cannot read
    /// this release's version.
    #[instrument(skip(self), fields(version = %self.version, target = %options.target))]
    pub fn get_download(&self, options: &BuildOptions) -> Result<ArtifactDownload, ArtifactError> {
        let mut key = options.clone();

        if key.edition == Edition::Base && key.target == "linux" {
            key.target = format!("linux_{}", key.arch);
        }

        if key.target == "osx" {
            let (major, minor, _) = version_parts(&self.version)?;
            if major > 4 || (major == 4 && minor >= 1) {
                key.target = "macos".to_string();
            }
        }

        key.debug = false;

        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        index
            .get(&key)
            .cloned()
            .ok_or_else(|| ArtifactError::NoMatchingBuild {
                target: options.target.clone(),
                arch: options.arch,
                edition: options.edition,
            })
    }

    /// Returns the archive URL for a variant.
    ///
    /// # Errors
    ///
    /// See [`Self::get_download`].
    pub fn archive_url(&self, options: &BuildOptions) -> Result<String, ArtifactError> {
        Ok(self.get_download(options)?.archive.url)
    }

    /// Returns the installable packages for a variant.
    ///
    /// # Errors
    ///
    /// See [`Self::get_download`].
    pub fn installable_packages(&self, options: &BuildOptions) -> Result<Vec<String>, ArtifactError> {
        Ok(self.get_download(options)?.installable_packages())
    }

    /// Summarizes the targets, editions and architectures of this release.
    #[must_use]
    pub fn build_types(&self) -> BuildTypes {
        let mut types = BuildTypes {
            version: self.version.clone(),
            ..BuildTypes::default()
        };

        for download in &self.downloads {
            if download.edition == Edition::Source {
                continue;
            }
            if !types.targets.contains(&download.target) {
                types.targets.push(download.target.clone());
            }
            if !types.editions.contains(&download.edition) {
                types.editions.push(download.edition);
            }
            if !types.architectures.contains(&download.arch) {
                types.architectures.push(download.arch);
            }
        }

        types
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.version)?;
        for download in self.downloads.iter().filter(|d| d.edition != Edition::Source) {
            writeln!(
                f,
                "\ttarget='{}', edition='{}', arch='{}'",
                download.target, download.edition, download.arch
            )?;
        }
        Ok(())
    }
}

/// Splits a feed version into its numeric `major.minor.patch` parts. Any
/// suffix after the patch number (`-rc0`, `-pre-`) is ignored.
fn version_parts(version: &str) -> Result<(u64, u64, u64), ArtifactError> {
    let invalid = |reason: String| ArtifactError::InvalidVersion {
        version: version.to_string(),
        reason,
    };

    let mut parts = version.splitn(3, '.');
    let mut next = |name: &str| {
        parts
            .next()
            .ok_or_else(|| invalid(format!("missing {name} component")))
    };

    let major = next("major")?;
    let minor = next("minor")?;
    let patch = next("patch")?;

    let patch_digits: String = patch.chars().take_while(char::is_ascii_digit).collect();

    let parse = |name: &str, value: &str| {
        value
            .parse::<u64>()
            .map_err(|e| invalid(format!("{name} component '{value}': {e}")))
    };

    Ok((
        parse("major", major)?,
        parse("minor", minor)?,
        parse("patch", &patch_digits)?,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::artifacts::ArchiveLink;

    fn download(target: &str, arch: Arch, edition: Edition) -> ArtifactDownload {
        ArtifactDownload {
            edition,
            target: target.to_string(),
            arch,
            archive: ArchiveLink {
                url: format!("https://example.com/{target}-{arch}-{edition}.tgz"),
            },
            packages: Vec::new(),
            msi: None,
        }
    }

    #[test]
    fn test_base_linux_resolves_arch_qualified_target() {
        let release = ArtifactVersion::new(
            "3.2.6",
            vec![download("linux_x86_64", Arch::X86_64, Edition::Base)],
        );

        let generic = release
            .get_download(&BuildOptions::new("linux", Arch::X86_64, Edition::Base))
            .unwrap();
        let qualified = release
            .get_download(&BuildOptions::new("linux_x86_64", Arch::X86_64, Edition::Base))
            .unwrap();
        assert_eq!(generic.target, "linux_x86_64");
        assert_eq!(generic, qualified);
    }

    #[test]
    fn test_osx_switches_to_macos_from_4_1() {
        let old = ArtifactVersion::new("4.0.0", vec![download("osx", Arch::X86_64, Edition::Base)]);
        let new = ArtifactVersion::new("4.1.0", vec![download("macos", Arch::X86_64, Edition::Base)]);
        let request = BuildOptions::new("osx", Arch::X86_64, Edition::Base);

        assert_eq!(old.get_download(&request).unwrap().target, "osx");
        assert_eq!(new.get_download(&request).unwrap().target, "macos");
    }

    #[test]
    fn test_debug_requests_resolve_non_debug_build() {
        let release = ArtifactVersion::new("3.2.6", vec![download("rhel62", Arch::X86_64, Edition::Enterprise)]);
        let request = BuildOptions::new("rhel62", Arch::X86_64, Edition::Enterprise).with_debug(true);

        assert!(release.get_download(&request).is_ok());
    }

    #[test]
    fn test_missing_build_names_request() {
        let release = ArtifactVersion::new("3.2.6", vec![download("rhel62", Arch::X86_64, Edition::Enterprise)]);
        let err = release
            .get_download(&BuildOptions::new("ubuntu1604", Arch::S390x, Edition::Enterprise))
            .unwrap_err();

        assert_eq!(
            err,
            ArtifactError::NoMatchingBuild {
                target: "ubuntu1604".to_string(),
                arch: Arch::S390x,
                edition: Edition::Enterprise,
            }
        );
    }

    #[test]
    fn test_later_duplicate_download_wins() {
        let mut second = download("osx", Arch::X86_64, Edition::Base);
        second.archive.url = "https://example.com/second.tgz".to_string();
        let release = ArtifactVersion::new(
            "3.0.0",
            vec![download("osx", Arch::X86_64, Edition::Base), second],
        );

        let url = release
            .archive_url(&BuildOptions::new("osx", Arch::X86_64, Edition::Base))
            .unwrap();
        assert_eq!(url, "https://example.com/second.tgz");
    }

    #[test]
    fn test_index_is_rebuilt_after_mutation() {
        let mut release = ArtifactVersion::new("3.2.6", Vec::new());
        let request = BuildOptions::new("sunos5", Arch::X86_64, Edition::Base);
        assert!(release.get_download(&request).is_err());

        release.downloads.push(download("sunos5", Arch::X86_64, Edition::Base));
        release.build_index();
        assert!(release.get_download(&request).is_ok());
    }

    #[test]
    fn test_unparseable_version_fails_osx_lookup() {
        let release = ArtifactVersion::new("latest", vec![download("osx", Arch::X86_64, Edition::Base)]);
        let err = release
            .get_download(&BuildOptions::new("osx", Arch::X86_64, Edition::Base))
            .unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidVersion { .. }));
    }

    #[test]
    fn test_build_types_skips_source_and_deduplicates() {
        let release = ArtifactVersion::new(
            "3.4.2",
            vec![
                download("src", Arch::Other, Edition::Source),
                download("rhel62", Arch::X86_64, Edition::Enterprise),
                download("rhel62", Arch::Ppc64le, Edition::Enterprise),
                download("osx", Arch::X86_64, Edition::Base),
            ],
        );

        let types = release.build_types();
        assert_eq!(types.version, "3.4.2");
        assert_eq!(types.targets, vec!["rhel62", "osx"]);
        assert_eq!(types.editions, vec![Edition::Enterprise, Edition::Base]);
        assert_eq!(types.architectures, vec![Arch::X86_64, Arch::Ppc64le]);
    }

    #[test]
    fn test_display_lists_downloads() {
        let release = ArtifactVersion::new("3.2.6", vec![download("osx", Arch::X86_64, Edition::Base)]);
        assert_eq!(
            release.to_string(),
            "3.2.6\n\ttarget='osx', edition='base', arch='x86_64'\n"
        );
    }

    #[test]
    fn test_version_parts_ignores_suffix() {
        assert_eq!(version_parts("4.1.0-rc2").unwrap(), (4, 1, 0));
        assert!(version_parts("4.1").is_err());
    }
}
