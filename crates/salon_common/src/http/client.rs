// --- File: crates/salon_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use salon_config::ApiConfig;
use std::time::Duration;

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `follow_redirects` - Whether the client should follow redirects
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

/// Creates the HTTP client used to talk to the salon REST API.
pub fn build_client(config: &ApiConfig) -> Result<Client, ReqwestError> {
    create_client(config.timeout_secs, true)
}
