//! Gate for tests that talk to a local mock of the Webshare API.

use std::net::{Ipv4Addr, TcpListener};

use wiremock::MockServer;

const REQUIRE_ENV: &str = "WEBSHARE_REQUIRE_SOCKET_TESTS";

fn mock_api_required() -> bool {
    std::env::var(REQUIRE_ENV)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

fn loopback_available() -> bool {
    TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).is_ok()
}

/// Starts a mock API server, or returns `None` when loopback sockets cannot be bound.
///
/// With `WEBSHARE_REQUIRE_SOCKET_TESTS=1` an unavailable loopback fails the test
/// instead of skipping it.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if loopback_available() {
        return Some(MockServer::start().await);
    }

    let message = "cannot bind a loopback socket; the mock Webshare API is unavailable";
    assert!(!mock_api_required(), "{message} ({REQUIRE_ENV} is set)");
    eprintln!("[mock-api] {message}. Skipping; set {REQUIRE_ENV}=1 to fail instead.");
    None
}
