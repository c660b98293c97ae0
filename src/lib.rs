//! Bond Core Library
//!
//! Catalogs MongoDB release artifacts (a matrix of target platform, CPU
//! architecture, edition and debug variant) and fetches missing archives
//! concurrently from the downloads feed.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`version`] - release-string parsing, classification and ordering
//! - [`build`] - build variants and artifact-name heuristics
//! - [`artifacts`] - the release feed and per-release download index
//! - [`catalog`] - registry of builds already on disk
//! - [`fetch`] - concurrent archive downloads with aggregated failures
//! - [`distro`] - host distribution release info
//! - [`error`] - aggregate errors shared by batch operations

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod artifacts;
pub mod build;
pub mod catalog;
pub mod distro;
pub mod error;
pub mod fetch;
pub mod http;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use artifacts::{ArtifactDownload, ArtifactError, ArtifactVersion, ArtifactsFeed, FeedError};
pub use build::{Arch, BuildError, BuildInfo, BuildOptions, Edition};
pub use catalog::{BuildCatalog, CatalogError};
pub use error::{AggregateError, ErrorCollector};
pub use fetch::{
    DownloadTask, FetchFailure, FetchOptions, FetchOrchestrator, FetchReport, HttpTransfer,
    TaskOutcome, Transfer,
};
pub use http::HttpTimeouts;
pub use version::{MongoVersion, ReleaseVersion, VersionError, VersionList};
