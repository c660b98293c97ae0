//! Shared release-feed loading for commands.

use anyhow::{Context, Result};
use bond_core::HttpTimeouts;
use bond_core::artifacts::{ArtifactsFeed, DEFAULT_FEED_URL};
use tracing::debug;

use crate::app_config::FileConfig;
use crate::cli::FeedArgs;

/// Effective HTTP timeouts: config values over defaults.
pub(crate) fn timeouts(config: &FileConfig) -> HttpTimeouts {
    let defaults = HttpTimeouts::default();
    HttpTimeouts {
        connect_secs: config.connect_timeout_secs.unwrap_or(defaults.connect_secs),
        read_secs: config.read_timeout_secs.unwrap_or(defaults.read_secs),
    }
}

/// Loads the feed from `--feed-file`, or fetches it from `--feed-url`, the
/// configured URL, or the public feed, in that order.
pub(crate) async fn load_feed(args: &FeedArgs, config: &FileConfig) -> Result<ArtifactsFeed> {
    if let Some(path) = &args.feed_file {
        debug!(path = %path.display(), "Loading feed from file");
        return ArtifactsFeed::load(path)
            .await
            .with_context(|| format!("Failed to load feed file '{}'", path.display()));
    }

    let url = args
        .feed_url
        .as_deref()
        .or(config.feed_url.as_deref())
        .unwrap_or(DEFAULT_FEED_URL);
    debug!(url, "Fetching feed");
    ArtifactsFeed::fetch(url, timeouts(config))
        .await
        .with_context(|| format!("Failed to fetch feed from '{url}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeouts_prefer_config() {
        let config = FileConfig {
            read_timeout_secs: Some(60),
            ..FileConfig::default()
        };
        let timeouts = timeouts(&config);
        assert_eq!(timeouts.connect_secs, 30);
        assert_eq!(timeouts.read_secs, 60);
    }
}
