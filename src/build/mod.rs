//! Build variants and artifact-name classification.
//!
//! - [`BuildOptions`] - the `{target, arch, edition, debug}` variant key
//! - [`BuildInfo`] - a variant paired with a version (catalog identity)
//! - [`naming`] - heuristics deriving a [`BuildInfo`] from artifact names

mod error;
pub mod naming;
mod options;

pub use error::BuildError;
pub use naming::{ARTIFACT_PREFIX, build_info_from_file_name, listing_version, version_from_file_name};
pub use options::{Arch, BuildInfo, BuildOptions, Edition};
