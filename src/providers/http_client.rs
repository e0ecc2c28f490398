use reqwest::Client;
use std::time::Duration;

/// Shared client for every adapter. Only connecting is bounded; a reply may
/// take as long as the model needs.
pub fn build_provider_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
