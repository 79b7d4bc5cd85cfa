// --- File: crates/salon_api/src/client.rs ---
//! Low-level JSON client for the salon REST API.
//!
//! Every request carries the bearer credential currently held by the shared
//! [`CredentialHandle`], so a login performed elsewhere is picked up by the
//! next call without rebuilding the client.

use reqwest::{header, Client, Method, RequestBuilder};
use salon_common::{build_client, error_message_from_body, join_url, CredentialHandle};
use salon_config::ApiConfig;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: CredentialHandle,
}

impl ApiClient {
    /// Builds a client from configuration, sharing `credentials` with the session store.
    pub fn new(config: &ApiConfig, credentials: CredentialHandle) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::ConfigError("api.base_url is empty".to_string()));
        }
        let client = build_client(config)?;
        Ok(Self::with_client(client, config.base_url.clone(), credentials))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        credentials: CredentialHandle,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &CredentialHandle {
        &self.credentials
    }

    /// Starts a request to `path`, attaching the bearer credential when one is present.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match self.credentials.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body of type `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(ApiError::from)
    }

    /// Sends the request and returns the raw body of a successful response.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        if status.is_success() {
            debug!("{} -> {}", url, status);
            return Ok(body);
        }

        let message = error_message_from_body(&body);
        warn!(
            "{} -> {}: {}",
            url,
            status,
            message.as_deref().unwrap_or("no error message")
        );
        Err(ApiError::from_status(status.as_u16(), message))
    }
}
