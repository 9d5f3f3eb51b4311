use std::time::Duration;

use reqwest::Client;

/// Client for one feed request. Timeout covers connect and body read.
pub fn build_feed_client(timeout: Duration, user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}

/// Client for the mail provider and the completion service. Every request
/// made through it is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}
