//! Release metadata from the downloads feed.
//!
//! - [`ArtifactsFeed`] - every published release, loaded from a URL or file
//! - [`ArtifactVersion`] - one release and its per-variant download index
//! - [`ArtifactDownload`] - one build of a release

mod download;
mod error;
mod feed;
mod release;

pub use download::{ArchiveLink, ArtifactDownload};
pub use error::{ArtifactError, FeedError};
pub use feed::{ArtifactsFeed, DEFAULT_FEED_URL};
pub use release::{ArtifactVersion, BuildTypes};
