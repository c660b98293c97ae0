//! One downloadable build of a version, as published in the feed.

use serde::{Deserialize, Serialize};

use crate::build::{Arch, BuildOptions, Edition};

/// Link to the archive of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveLink {
    /// Absolute http(s) URL of the archive.
    pub url: String,
}

/// A single build flavor of a release with its archive and packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDownload {
    /// Distribution edition.
    pub edition: Edition,
    /// Target platform.
    pub target: String,
    /// CPU architecture.
    pub arch: Arch,
    /// Archive link.
    pub archive: ArchiveLink,
    /// OS packages (deb/rpm) for this build.
    #[serde(default)]
    pub packages: Vec<String>,
    /// Single installer package (Windows msi).
    #[serde(default, alias = "package", skip_serializing_if = "Option::is_none")]
    pub msi: Option<String>,
}

impl ArtifactDownload {
    /// Returns the key this download is indexed under. Feed entries are
    /// never debug builds.
    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::new(self.target.clone(), self.arch, self.edition)
    }

    /// Returns the archive URL.
    #[must_use]
    pub fn archive_url(&self) -> &str {
        &self.archive.url
    }

    /// Returns installable packages: the package list, or the single
    /// installer when no list is published.
    #[must_use]
    pub fn installable_packages(&self) -> Vec<String> {
        if !self.packages.is_empty() {
            return self.packages.clone();
        }
        self.msi.iter().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_feed_download() {
        let json = r#"{
            "edition": "targeted",
            "target": "ubuntu1604",
            "arch": "x86_64",
            "archive": {"url": "https://example.com/mongodb-linux-x86_64-ubuntu1604-3.4.2.tgz", "sha1": "ignored"},
            "packages": ["https://example.com/mongodb-org-server_3.4.2_amd64.deb"]
        }"#;
        let download: ArtifactDownload = serde_json::from_str(json).unwrap();

        assert_eq!(download.edition, Edition::CommunityTargeted);
        assert_eq!(
            download.archive_url(),
            "https://example.com/mongodb-linux-x86_64-ubuntu1604-3.4.2.tgz"
        );
        assert_eq!(
            download.build_options(),
            BuildOptions::new("ubuntu1604", Arch::X86_64, Edition::CommunityTargeted)
        );
    }

    #[test]
    fn test_installable_packages_falls_back_to_installer() {
        let json = r#"{
            "edition": "base",
            "target": "windows_x86_64",
            "arch": "x86_64",
            "archive": {"url": "https://example.com/mongodb-win32-x86_64-3.4.2.zip"},
            "package": "https://example.com/mongodb-win32-x86_64-3.4.2-signed.msi"
        }"#;
        let download: ArtifactDownload = serde_json::from_str(json).unwrap();

        assert_eq!(
            download.installable_packages(),
            vec!["https://example.com/mongodb-win32-x86_64-3.4.2-signed.msi"]
        );
    }

    #[test]
    fn test_installable_packages_empty_without_packages() {
        let download = ArtifactDownload {
            edition: Edition::Base,
            target: "osx".to_string(),
            arch: Arch::X86_64,
            archive: ArchiveLink {
                url: "https://example.com/a.tgz".to_string(),
            },
            packages: Vec::new(),
            msi: None,
        };
        assert!(download.installable_packages().is_empty());
    }
}
