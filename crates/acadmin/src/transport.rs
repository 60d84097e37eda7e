//! HTTP transport for the academic-records API.
//!
//! A single configured [`reqwest::Client`] with a fixed base URL and JSON
//! content type. Every non-2xx response is normalized into the uniform
//! [`ErrorEnvelope`] shape before it reaches a caller; no request is retried.

use crate::error::{ApiError, ErrorEnvelope, FALLBACK_MESSAGE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default base URL, matching the records API's local development setup.
const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Environment variable overriding the base URL.
const API_URL_ENV: &str = "ACADMIN_API_URL";

/// Configuration for the transport client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against
    pub base_url: String,
    /// Total per-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("acadmin/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    /// Default configuration with the base URL taken from `ACADMIN_API_URL`
    /// when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Replaces the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// The configured HTTP client all resource services go through.
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client from the environment-aware default configuration.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(ApiConfig::from_env())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, ApiError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&normalized)?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// GET `path`, decoding the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.http.get(self.endpoint(path)?).send().await?;
        read_json(response).await
    }

    /// GET `path` with query pairs, decoding the JSON body into `T`.
    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!(path, ?query, "GET");
        let response = self
            .http
            .get(self.endpoint(path)?)
            .query(query)
            .send()
            .await?;
        read_json(response).await
    }

    /// POST `body` as JSON to `path`, decoding the response into `T`.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    /// PUT `body` as JSON to `path`, decoding the response into `T`.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "PUT");
        let response = self.http.put(self.endpoint(path)?).json(body).send().await?;
        read_json(response).await
    }

    /// DELETE `path`, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self.http.delete(self.endpoint(path)?).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(error_for(status, response).await)
    }
}

/// Decodes a successful response body, or normalizes the failure.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_for(status, response).await);
    }
    response.json::<T>().await.map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Reduces a non-2xx response into the uniform envelope.
async fn error_for(status: StatusCode, response: reqwest::Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    let envelope = parse_envelope(status.as_u16(), &body);
    warn!(status = status.as_u16(), message = %envelope.message, "request failed");
    ApiError::Status {
        status: status.as_u16(),
        envelope,
    }
}

fn parse_envelope(status: u16, body: &str) -> ErrorEnvelope {
    let mut envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    if envelope.message.trim().is_empty() {
        envelope.message = FALLBACK_MESSAGE.to_string();
    }
    envelope.status = Some(status);
    envelope
}
