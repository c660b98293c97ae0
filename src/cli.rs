//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use bond_core::{Arch, Edition};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Catalog and fetch MongoDB release builds.
///
/// Bond resolves releases against the downloads feed, fetches their archives
/// concurrently, and keeps track of builds already on disk.
#[derive(Parser, Debug)]
#[command(name = "bond")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/bond/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download release archives into a directory
    Fetch(FetchArgs),

    /// Inspect a directory of unpacked builds
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Classify a version string
    Version(VersionArgs),

    /// List the builds published for a release
    Builds(BuildsArgs),

    /// Print host distribution release info
    Host,
}

/// Where the release feed comes from.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct FeedArgs {
    /// Release feed URL
    #[arg(long, value_name = "URL", conflicts_with = "feed_file")]
    pub feed_url: Option<String>,

    /// Read the release feed from a local JSON file
    #[arg(long, value_name = "PATH")]
    pub feed_file: Option<PathBuf>,
}

/// Build variant selection shared by fetch.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct VariantArgs {
    /// Edition: enterprise, targeted, or base
    #[arg(long)]
    pub edition: Option<Edition>,

    /// Architecture: x86_64, i686, ppc64le, or s390x
    #[arg(long)]
    pub arch: Option<Arch>,

    /// Target platform, e.g. linux, osx, rhel62, ubuntu1604
    #[arg(long)]
    pub target: Option<String>,
}

/// Arguments for `bond fetch`.
#[derive(ClapArgs, Debug)]
pub struct FetchArgs {
    /// Release versions or series (e.g. 3.2.6, 3.4)
    #[arg(required = true, value_name = "RELEASE")]
    pub releases: Vec<String>,

    /// Download directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub variant: VariantArgs,

    /// Download even when the archive already exists
    #[arg(short, long)]
    pub force: bool,

    /// Maximum concurrent downloads (1-256)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub workers: Option<u16>,

    #[command(flatten)]
    pub feed: FeedArgs,
}

/// `bond catalog` subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List every build directory with its version and validity
    Show {
        /// Catalog directory
        dir: PathBuf,
    },

    /// Find the directory of one build
    Lookup(LookupArgs),
}

/// Arguments for `bond catalog lookup`.
#[derive(ClapArgs, Debug)]
pub struct LookupArgs {
    /// Catalog directory
    pub dir: PathBuf,

    /// Build version
    #[arg(long = "version", value_name = "VERSION")]
    pub build_version: String,

    /// Build edition
    #[arg(long)]
    pub edition: Edition,

    /// Build target platform
    #[arg(long)]
    pub target: String,

    /// Build architecture
    #[arg(long)]
    pub arch: Arch,

    /// Look up the debug-symbols build
    #[arg(long)]
    pub debug: bool,
}

/// Arguments for `bond version`.
#[derive(ClapArgs, Debug)]
pub struct VersionArgs {
    /// Version string, e.g. 3.2.6-rc0
    pub version: String,
}

/// Arguments for `bond builds`.
#[derive(ClapArgs, Debug)]
pub struct BuildsArgs {
    /// Release version or series
    pub release: String,

    #[command(flatten)]
    pub feed: FeedArgs,
}
