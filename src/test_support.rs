//! Shared helpers for unit tests.

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_SOCKETS_VAR: &str = "BOND_REQUIRE_SOCKET_TESTS";

/// Starts a mock server for `test`, or returns `None` in sandboxes that
/// forbid binding localhost. Setting `BOND_REQUIRE_SOCKET_TESTS` to `1`,
/// `true` or `yes` turns the skip into a failure.
pub async fn mock_server(test: &str) -> Option<MockServer> {
    if TcpListener::bind(("127.0.0.1", 0)).is_ok() {
        return Some(MockServer::start().await);
    }

    let required = std::env::var(REQUIRE_SOCKETS_VAR)
        .is_ok_and(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
    assert!(
        !required,
        "{test}: cannot bind a localhost socket and {REQUIRE_SOCKETS_VAR} is set"
    );
    eprintln!("{test}: skipped, cannot bind a localhost socket");
    None
}
