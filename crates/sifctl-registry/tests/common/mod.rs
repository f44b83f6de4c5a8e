//! Common test infrastructure for sifctl-registry tests
//!
//! - Wiremock setup helpers for the token and manifest endpoints
//! - A helper that drives the blocking client off the async test runtime

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_registry;

pub use mock_registry::*;

use sifctl_registry::DockerHubClient;

/// Run `f` against a client pointed at `server` for both endpoints.
///
/// The blocking client owns its own runtime, so it is created, used, and
/// dropped on a blocking thread.
pub async fn with_client<T, F>(server_uri: String, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(DockerHubClient) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = DockerHubClient::with_endpoints(&server_uri, &server_uri)
            .expect("client should build");
        f(client)
    })
    .await
    .expect("blocking task panicked")
}
