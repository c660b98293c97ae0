//! Shared HTTP client construction for feed requests and artifact transfers.

use std::time::Duration;

use reqwest::Client;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large archives).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Timeout settings applied to every client built by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Connect timeout in seconds.
    pub connect_secs: u64,
    /// Whole-request timeout in seconds.
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: CONNECT_TIMEOUT_SECS,
            read_secs: READ_TIMEOUT_SECS,
        }
    }
}

/// User-Agent sent with every request (identifies the tool).
#[must_use]
pub fn user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("bond/{version}")
}

/// Builds a reqwest client with the crate's timeout and compression policy.
///
/// # Errors
///
/// Returns the reqwest builder error when the TLS backend or system
/// configuration cannot be initialized.
pub fn build_client(timeouts: HttpTimeouts) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .gzip(true)
        .user_agent(user_agent())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let timeouts = HttpTimeouts::default();
        assert_eq!(timeouts.connect_secs, 30);
        assert_eq!(timeouts.read_secs, 300);
    }

    #[test]
    fn test_user_agent_carries_crate_version() {
        let ua = user_agent();
        assert!(ua.starts_with("bond/"));
        assert!(ua.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_build_client_with_custom_timeouts() {
        let client = build_client(HttpTimeouts {
            connect_secs: 1,
            read_secs: 2,
        });
        assert!(client.is_ok());
    }
}
