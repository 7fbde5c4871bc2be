//! Shared HTTP client
//!
//! Builds requests with the project headers, sends them and turns non-2xx
//! responses into [`TrackerError::Remote`] with the backend's own message.
//! There is one timeout and no retry.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};

/// Where the backend lives and how to identify the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project URL without a trailing slash
    pub base_url: String,
    /// Public API key sent as `apikey`
    pub api_key: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Config with the default timeout
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

/// Thin wrapper over `reqwest::Client`
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Build a client for `config`
    pub fn new(config: BackendConfig) -> TrackerResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TrackerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// The backend connection this client talks to
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Start a request to `path` with the project headers
    ///
    /// Without a user token the API key doubles as the bearer token, which
    /// is what the auth endpoints expect for anonymous calls.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(method = method.as_str(), path, "backend request");

        self.http
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(token.unwrap_or(&self.config.api_key))
    }

    /// Send and decode a JSON body
    pub async fn send_json<T>(&self, request: RequestBuilder) -> TrackerResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send and ignore the body
    pub async fn send_empty(&self, request: RequestBuilder) -> TrackerResult<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> TrackerResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(status = status.as_u16(), %message, "backend rejected request");

        Err(TrackerError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human-readable message out of an error body
///
/// PostgREST uses `message`, GoTrue uses `msg` or `error_description`, and
/// some gateways only send `error`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(String::from))
        });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}
