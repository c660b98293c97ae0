//! Read-only inspection commands: version classification, published builds
//! and host distribution info.

use std::fmt::Write as _;

use anyhow::Result;
use bond_core::distro::ReleaseInfo;
use bond_core::version::VersionScheme;
use bond_core::{MongoVersion, ReleaseVersion};

use super::feed::load_feed;
use crate::app_config::FileConfig;
use crate::cli::{BuildsArgs, VersionArgs};

pub fn run_version_command(args: &VersionArgs) -> Result<()> {
    let version = MongoVersion::parse(&args.version)?;
    print!("{}", render_version(&version));
    Ok(())
}

fn render_version(version: &MongoVersion) -> String {
    let scheme = match version.scheme() {
        VersionScheme::Legacy => "legacy",
        VersionScheme::Modern => "modern",
    };
    let rc_number = version
        .rc_number()
        .map_or_else(|| "-".to_string(), |n| n.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "version={}", version.source());
    let _ = writeln!(out, "scheme={scheme}");
    let _ = writeln!(out, "series={}", version.series());
    let _ = writeln!(out, "tag={}", version.tag().unwrap_or("-"));
    let _ = writeln!(out, "release={}", version.is_release());
    let _ = writeln!(out, "release_candidate={}", version.is_release_candidate());
    let _ = writeln!(out, "rc_number={rc_number}");
    let _ = writeln!(out, "development_build={}", version.is_development_build());
    let _ = writeln!(out, "stable_series={}", version.is_stable_series());
    let _ = writeln!(out, "stable_release_series={}", version.stable_release_series());
    out
}

pub async fn run_builds_command(args: &BuildsArgs, config: &FileConfig) -> Result<()> {
    let feed = load_feed(&args.feed, config).await?;
    let release = feed.get_version(&args.release)?;
    let types = release.build_types();

    print!("{release}");
    println!("targets: {}", types.targets.join(", "));
    println!(
        "editions: {}",
        types
            .editions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "architectures: {}",
        types
            .architectures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

pub fn run_host_command() -> Result<()> {
    let info = ReleaseInfo::collect()?;
    for (key, value) in info.iter() {
        println!("{key} = {value}");
    }
    Ok(())
}
