//! CLI entry point for bond.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;

use cli::{Args, CatalogCommand, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = app_config::load_config(args.config.as_deref())?;
    if let Some(path) = loaded.path.as_deref() {
        debug!(path = %path.display(), loaded = loaded.config.is_some(), "Config resolved");
    }
    let config = loaded.file();

    match &args.command {
        Command::Fetch(fetch) => commands::run_fetch_command(fetch, &config).await,
        Command::Catalog { command } => match command {
            CatalogCommand::Show { dir } => commands::run_catalog_show_command(dir),
            CatalogCommand::Lookup(lookup) => commands::run_catalog_lookup_command(lookup),
        },
        Command::Version(version) => commands::run_version_command(version),
        Command::Builds(builds) => commands::run_builds_command(builds, &config).await,
        Command::Host => commands::run_host_command(),
    }
}
