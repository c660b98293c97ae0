//! CLI command handlers.

mod catalog;
mod feed;
mod fetch;
mod inspect;

pub use catalog::{run_catalog_lookup_command, run_catalog_show_command};
pub use fetch::run_fetch_command;
pub use inspect::{run_builds_command, run_host_command, run_version_command};
