//! Integration tests for the user registry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p user-registry-integration-tests
//! ```
//!
//! Each test boots its own server on an ephemeral port with an empty store,
//! so tests are independent and can run in parallel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use reqwest::Client;
use tokio::net::TcpListener;

use user_registry_core::MinimumAge;
use user_registry_server::build_router;
use user_registry_server::config::ServerConfig;
use user_registry_server::state::AppState;

/// A running server and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a server with the default configuration (minimum age 18).
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn new() -> Self {
        Self::with_min_age(MinimumAge::DEFAULT).await
    }

    /// Start a server that enforces `min_age`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn with_min_age(min_age: MinimumAge) -> Self {
        let config = ServerConfig {
            min_age,
            port: 0,
            ..ServerConfig::default()
        };

        let listener = TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener
            .local_addr()
            .expect("Failed to read test listener address");

        let app = build_router(AppState::new(&config));
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for `path` on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
