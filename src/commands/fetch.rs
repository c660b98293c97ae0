//! Fetch command handler: download release archives.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bond_core::fetch::{FetchOptions, FetchOrchestrator, HttpTransfer, default_workers};
use bond_core::{Arch, BuildOptions, Edition, HttpTimeouts};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::feed::{load_feed, timeouts};
use crate::app_config::FileConfig;
use crate::cli::FetchArgs;

/// Fetch settings after merging CLI flags over config over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchSettings {
    pub directory: PathBuf,
    pub build: BuildOptions,
    pub options: FetchOptions,
    pub timeouts: HttpTimeouts,
}

pub(crate) fn resolve_fetch_settings(args: &FetchArgs, config: &FileConfig) -> Result<FetchSettings> {
    let edition = match args.variant.edition {
        Some(edition) => edition,
        None => config
            .edition
            .as_deref()
            .map(str::parse::<Edition>)
            .transpose()?
            .unwrap_or(Edition::Base),
    };
    let arch = match args.variant.arch {
        Some(arch) => arch,
        None => config
            .arch
            .as_deref()
            .map(str::parse::<Arch>)
            .transpose()?
            .unwrap_or_else(host_arch),
    };
    let target = args
        .variant
        .target
        .clone()
        .or_else(|| config.target.clone())
        .unwrap_or_else(|| host_target(arch));

    let directory = args
        .dir
        .clone()
        .or_else(|| config.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let workers = args
        .workers
        .map(usize::from)
        .or(config.workers)
        .unwrap_or_else(default_workers);

    Ok(FetchSettings {
        directory,
        build: BuildOptions::new(target, arch, edition),
        options: FetchOptions {
            workers,
            force: args.force,
        },
        timeouts: timeouts(config),
    })
}

/// Architecture of the running host, x86_64 when not modeled.
fn host_arch() -> Arch {
    match std::env::consts::ARCH {
        "x86" => Arch::I686,
        "powerpc64" => Arch::Ppc64le,
        "s390x" => Arch::S390x,
        _ => Arch::X86_64,
    }
}

/// Generic target for the running host's operating system.
fn host_target(arch: Arch) -> String {
    match std::env::consts::OS {
        "macos" => "osx".to_string(),
        "windows" => format!("windows_{arch}"),
        _ => "linux".to_string(),
    }
}

pub async fn run_fetch_command(args: &FetchArgs, config: &FileConfig) -> Result<()> {
    let settings = resolve_fetch_settings(args, config)?;
    debug!(?settings, "Resolved fetch settings");

    let feed = Arc::new(load_feed(&args.feed, config).await?);
    let transfer = Arc::new(HttpTransfer::new(settings.timeouts).context("Failed to build HTTP client")?);
    let orchestrator = FetchOrchestrator::new(feed, transfer, settings.options)?;

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling downloads");
                cancel.cancel();
            }
        })
    };

    let result = orchestrator
        .run(&args.releases, &settings.directory, &settings.build, &cancel)
        .await;
    interrupt.abort();

    let report = result?;
    info!(
        succeeded = report.succeeded,
        skipped = report.skipped,
        directory = %settings.directory.display(),
        "Fetch complete"
    );
    println!(
        "downloaded {} archive(s), {} already present, in {}",
        report.succeeded,
        report.skipped,
        settings.directory.display()
    );
    Ok(())
}
