//! Catalog command handlers: list and look up unpacked builds.

use std::fmt::Write as _;

use anyhow::Result;
use bond_core::BuildCatalog;
use bond_core::catalog::{ListingEntry, list_contents};
use tracing::{debug, warn};

use crate::cli::LookupArgs;

pub fn run_catalog_show_command(dir: &std::path::Path) -> Result<()> {
    let entries = list_contents(dir)?;
    let invalid = entries.iter().filter(|entry| !entry.is_valid()).count();
    if invalid > 0 {
        warn!(invalid, total = entries.len(), "Catalog contains incomplete builds");
    }
    print!("{}", render_listing(&entries));
    Ok(())
}

pub fn run_catalog_lookup_command(args: &LookupArgs) -> Result<()> {
    let catalog = BuildCatalog::scan(&args.dir)?;
    debug!(builds = catalog.len(), root = %catalog.path().display(), "Catalog scanned");

    let path = catalog.lookup(
        &args.build_version,
        args.edition,
        &args.target,
        args.arch,
        args.debug,
    )?;
    println!("{}", path.display());
    Ok(())
}

fn render_listing(entries: &[ListingEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let status = match &entry.validation {
            Ok(()) => "ok".to_string(),
            Err(err) => format!("invalid: {err}"),
        };
        let _ = writeln!(out, "{}\t{}\t{status}", entry.version, entry.path.display());
    }
    out
}
