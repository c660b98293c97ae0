//! Shared helpers for integration tests.

use std::net::TcpListener;

use wiremock::MockServer;

/// Set to `1`, `true` or `yes` to fail instead of skip when localhost
/// sockets are unavailable.
const REQUIRE_SOCKETS_VAR: &str = "BOND_REQUIRE_SOCKET_TESTS";

/// Starts a mock server for `test`, or returns `None` in sandboxes that
/// forbid binding localhost.
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

/// Evaluates to a started `MockServer`, or returns from the calling test.
macro_rules! require_mock_server {
    () => {
        match crate::support::mock_server(concat!(file!(), ":", line!())).await {
            Some(server) => server,
            None => return,
        }
    };
}
