//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bond_core::fetch::{MAX_WORKERS, MIN_WORKERS};
use bond_core::{Arch, Edition};
use serde::Deserialize;

/// TOML-backed file configuration for bond defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Release feed URL.
    pub feed_url: Option<String>,
    /// Default download directory.
    pub download_dir: Option<PathBuf>,
    /// Default number of concurrent downloads.
    pub workers: Option<usize>,
    /// Default edition.
    pub edition: Option<String>,
    /// Default architecture.
    pub arch: Option<String>,
    /// Default target platform.
    pub target: Option<String>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers
            && !(MIN_WORKERS..=MAX_WORKERS).contains(&workers)
        {
            bail!(
                "Invalid config value for `workers`: {workers}. Expected range: {MIN_WORKERS}..={MAX_WORKERS}"
            );
        }

        if let Some(edition) = &self.edition {
            edition
                .parse::<Edition>()
                .with_context(|| "Invalid config value for `edition`")?;
        }
        if let Some(arch) = &self.arch {
            arch.parse::<Arch>()
                .with_context(|| "Invalid config value for `arch`")?;
        }
        if self.target.as_deref().is_some_and(str::is_empty) {
            bail!("Invalid config value for `target`: must not be empty");
        }

        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;

        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    /// Returns the file config, or an empty one when none was loaded.
    #[must_use]
    pub fn file(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/bond/config.toml`
/// 2. `$HOME/.config/bond/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("bond").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("bond")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from an explicit path (which must exist), or from the
/// default path if present.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    match path.as_deref() {
        Some(path_ref) if path_ref.exists() => {
            let config = load_file_config(path_ref)?;
            Ok(LoadedConfig {
                path,
                config: Some(config),
            })
        }
        _ => Ok(LoadedConfig { path, config: None }),
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}
