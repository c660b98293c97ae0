//! Build identity heuristics for MongoDB artifact file and directory names.
//!
//! Artifact names follow the downloads-site convention, for example
//! `mongodb-linux-x86_64-enterprise-rhel62-3.2.6` or
//! `mongodb-win32-x86_64-2008plus-ssl-3.4.2.zip`. Two independent version
//! heuristics live here: [`version_from_file_name`] feeds the build identity
//! used by the catalog, and [`listing_version`] is the looser form used when
//! listing a directory. They are not guaranteed to agree.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{Arch, BuildError, BuildInfo, BuildOptions, Edition};

/// Prefix carried by every artifact name.
pub const ARTIFACT_PREFIX: &str = "mongodb-";

const ARCHIVE_EXTENSIONS: [&str; 5] = [".tar.gz", ".tgz", ".zip", ".msi", ".tar"];

const TARGETED_DISTROS: [&str; 7] = [
    "rhel", "suse", "2008", "osx-ssl", "debian", "ubuntu", "amazon",
];

const BASE_PLATFORMS: [&str; 5] = ["osx", "macos", "win32", "sunos5", "linux"];

const LINUX_DISTROS: [&str; 5] = ["rhel", "suse", "debian", "ubuntu", "amazon"];

#[allow(clippy::expect_used)]
static VERSION_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?\d+\.\d+").expect("version segment regex is valid") // Static pattern, safe to panic
});

/// Derives the build identity (version and build options) from an artifact
/// file or directory name. Only the final path component is considered.
///
/// # Errors
///
/// Returns a [`BuildError`] naming the first component (architecture,
/// edition, target, version) that could not be classified.
pub fn build_info_from_file_name(file_name: &str) -> Result<BuildInfo, BuildError> {
    let name = base_name(file_name);

    let debug = name.contains("debugsymbols");
    let arch = arch_from_name(&name)?;
    let edition = edition_from_name(&name)?;
    let target = target_from_name(&name)?;
    let version = version_from_file_name(&name)?;

    Ok(BuildInfo {
        version,
        options: BuildOptions {
            target,
            arch,
            edition,
            debug,
        },
    })
}

/// Extracts the version from an artifact name: everything from the first
/// `-`-separated segment that looks like `X.Y` onwards, with archive
/// extensions and a leading `v` removed.
///
/// # Errors
///
/// Returns [`BuildError::MissingVersion`] when no segment looks like a
/// version.
pub fn version_from_file_name(file_name: &str) -> Result<String, BuildError> {
    let name = strip_archive_extension(&base_name(file_name)).to_string();
    let parts: Vec<&str> = name.split('-').collect();

    let start = parts
        .iter()
        .position(|part| VERSION_SEGMENT.is_match(part))
        .ok_or_else(|| BuildError::MissingVersion { name: name.clone() })?;

    let version = parts[start..].join("-");
    Ok(version.strip_prefix('v').unwrap_or(&version).to_string())
}

/// Extracts a version from a directory name the way catalog listings do.
///
/// GA releases end in the version; release candidates end in `X.Y.Z-rcN`;
/// nightlies end in `X.Y.Z-N-gHASH`; nightlies of release candidates end in
/// `X.Y.Z-rcN-N-gHASH`; 2.4 nightlies end in `v2.4-YYYY-MM-DD`.
#[must_use]
pub fn listing_version(name: &str) -> String {
    let parts: Vec<&str> = name.split('-').collect();
    let tail = |count: usize| parts[parts.len().saturating_sub(count)..].join("-");

    let second_to_last_is_numeric = parts.len() >= 2
        && parts[parts.len() - 2].parse::<i64>().is_ok();

    if name.contains("rc") {
        if second_to_last_is_numeric {
            // nightly of an rc
            return tail(4);
        }
        return tail(2);
    }
    if name.contains("v2.4") {
        let joined = tail(4);
        return joined.get(1..).unwrap_or_default().to_string();
    }
    if second_to_last_is_numeric {
        return tail(3);
    }
    parts.last().copied().unwrap_or_default().to_string()
}

fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map_or_else(|| file_name.to_string(), |n| n.to_string_lossy().into_owned())
}

fn strip_archive_extension(name: &str) -> &str {
    ARCHIVE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

fn arch_from_name(name: &str) -> Result<Arch, BuildError> {
    if let Some(arch) = Arch::KNOWN
        .into_iter()
        .find(|arch| name.contains(arch.as_str()))
    {
        return Ok(arch);
    }
    // 32-bit archives are published as i386.
    if name.contains("i386") {
        return Ok(Arch::I686);
    }
    Err(BuildError::UnrecognizedArch {
        name: name.to_string(),
    })
}

fn edition_from_name(name: &str) -> Result<Edition, BuildError> {
    if name.contains("enterprise") {
        return Ok(Edition::Enterprise);
    }

    if TARGETED_DISTROS.iter().any(|distro| name.contains(distro)) {
        return Ok(Edition::CommunityTargeted);
    }

    if BASE_PLATFORMS
        .iter()
        .any(|platform| name.starts_with(&format!("{ARTIFACT_PREFIX}{platform}")))
    {
        return Ok(Edition::Base);
    }

    Err(BuildError::UnrecognizedEdition {
        name: name.to_string(),
    })
}

fn target_from_name(name: &str) -> Result<String, BuildError> {
    let parts: Vec<&str> = name.split('-').collect();

    if name.contains("enterprise") {
        for platform in ["osx", "macos", "windows"] {
            if name.contains(platform) {
                return Ok(platform.to_string());
            }
        }
        if name.contains("linux")
            && let Some(position) = parts.iter().position(|part| *part == "enterprise")
            && let Some(distro) = parts.get(position + 1)
        {
            return Ok((*distro).to_string());
        }
    }

    if name.contains("osx-ssl") {
        return Ok("osx-ssl".to_string());
    }
    if name.contains("macos") {
        return Ok("macos".to_string());
    }
    if name.contains("osx") {
        return Ok("osx".to_string());
    }

    if name.contains("2008plus-ssl") {
        return Ok("windows_x86_64-2008plus-ssl".to_string());
    }
    if name.contains("2008plus") {
        return Ok("windows_x86_64-2008plus".to_string());
    }
    if name.contains("win32-i386") {
        return Ok("windows_i686".to_string());
    }
    if name.contains("win32-x86_64") {
        return Ok("windows_x86_64".to_string());
    }

    // Targeted linux builds name the distro right after the architecture:
    // mongodb-linux-x86_64-ubuntu1604-3.4.2
    if parts.get(1) == Some(&"linux")
        && let Some(distro) = parts.get(3)
        && LINUX_DISTROS.iter().any(|d| distro.starts_with(d))
    {
        return Ok((*distro).to_string());
    }

    if name.contains("linux-x86_64") {
        return Ok("linux_x86_64".to_string());
    }
    if name.contains("linux-i386") || name.contains("linux-i686") {
        return Ok("linux_i686".to_string());
    }

    if name.contains("sunos5") {
        return Ok("sunos5".to_string());
    }

    Err(BuildError::UnrecognizedTarget {
        name: name.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn info(name: &str) -> BuildInfo {
        build_info_from_file_name(name).unwrap()
    }

    #[test]
    fn test_base_linux_directory() {
        let info = info("mongodb-linux-x86_64-3.2.6");
        assert_eq!(info.version, "3.2.6");
        assert_eq!(
            info.options,
            BuildOptions::new("linux_x86_64", Arch::X86_64, Edition::Base)
        );
    }

    #[test]
    fn test_enterprise_linux_uses_distro_target() {
        let info = info("/data/builds/mongodb-linux-x86_64-enterprise-rhel62-3.2.6.tgz");
        assert_eq!(info.version, "3.2.6");
        assert_eq!(info.options.edition, Edition::Enterprise);
        assert_eq!(info.options.target, "rhel62");
    }

    #[test]
    fn test_targeted_linux_uses_distro_target() {
        let info = info("mongodb-linux-x86_64-ubuntu1604-3.4.2-rc1");
        assert_eq!(info.version, "3.4.2-rc1");
        assert_eq!(info.options.edition, Edition::CommunityTargeted);
        assert_eq!(info.options.target, "ubuntu1604");
    }

    #[test]
    fn test_windows_and_osx_targets() {
        let windows = info("mongodb-win32-x86_64-2008plus-ssl-3.4.2.zip");
        assert_eq!(windows.options.target, "windows_x86_64-2008plus-ssl");
        assert_eq!(windows.options.edition, Edition::CommunityTargeted);

        let win32 = info("mongodb-win32-i386-3.0.4");
        assert_eq!(win32.options.arch, Arch::I686);
        assert_eq!(win32.options.target, "windows_i686");
        assert_eq!(win32.options.edition, Edition::Base);

        let osx = info("mongodb-osx-x86_64-3.2.6");
        assert_eq!(osx.options.target, "osx");
        assert_eq!(osx.options.edition, Edition::Base);

        let osx_ssl = info("mongodb-osx-ssl-x86_64-3.2.6");
        assert_eq!(osx_ssl.options.target, "osx-ssl");
        assert_eq!(osx_ssl.options.edition, Edition::CommunityTargeted);
    }

    #[test]
    fn test_debug_symbols_flag() {
        let info = info("mongodb-linux-x86_64-debugsymbols-3.2.6.tgz");
        assert!(info.options.debug);
        assert_eq!(info.version, "3.2.6");
    }

    #[test]
    fn test_nightly_version_forms() {
        assert_eq!(
            version_from_file_name("mongodb-linux-x86_64-3.3.1-123-g1234abc").unwrap(),
            "3.3.1-123-g1234abc"
        );
        assert_eq!(
            version_from_file_name("mongodb-linux-x86_64-v2.4-latest.tgz").unwrap(),
            "2.4-latest"
        );
    }

    #[test]
    fn test_unclassifiable_names_fail_descriptively() {
        assert!(matches!(
            build_info_from_file_name("mongodb-linux-arm64-3.2.6"),
            Err(BuildError::UnrecognizedArch { .. })
        ));
        assert!(matches!(
            build_info_from_file_name("mongodb-plan9-x86_64-3.2.6"),
            Err(BuildError::UnrecognizedEdition { .. })
        ));
        assert!(matches!(
            build_info_from_file_name("mongodb-linux-x86_64-latest"),
            Err(BuildError::MissingVersion { .. })
        ));
    }

    #[test]
    fn test_listing_version_forms() {
        assert_eq!(listing_version("mongodb-linux-x86_64-3.2.6"), "3.2.6");
        assert_eq!(listing_version("mongodb-linux-x86_64-3.2.6-rc0"), "3.2.6-rc0");
        assert_eq!(
            listing_version("mongodb-linux-x86_64-3.3.1-123-g1234abc"),
            "3.3.1-123-g1234abc"
        );
        assert_eq!(
            listing_version("mongodb-linux-x86_64-3.2.0-rc2-12-gabc1234"),
            "3.2.0-rc2-12-gabc1234"
        );
        assert_eq!(
            listing_version("mongodb-linux-x86_64-v2.4-2014-01-01"),
            "2.4-2014-01-01"
        );
    }

    #[test]
    fn test_heuristics_agree_on_common_forms() {
        for name in [
            "mongodb-linux-x86_64-3.2.6",
            "mongodb-linux-x86_64-3.2.6-rc0",
            "mongodb-linux-x86_64-3.3.1-123-g1234abc",
        ] {
            assert_eq!(
                version_from_file_name(name).unwrap(),
                listing_version(name),
                "{name}"
            );
        }
    }
}
