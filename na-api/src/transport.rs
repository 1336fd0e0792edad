//! HTTP transport.
//!
//! A transport sends exactly one request and hands back the status code and
//! body text. Envelope handling happens a layer up in [`crate::client`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::trace;

use na_core::constants;
use na_core::error::{NaError, NaResult};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the HTTP status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert into a server error carrying the status and raw body.
    pub fn into_server_error(self) -> NaError {
        NaError::ServerError {
            status: self.status,
            message: self.body,
        }
    }
}

/// Sends a single request. POST bodies are JSON.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> NaResult<RawResponse>;
}

/// reqwest-backed transport.
///
/// Idle connections are never kept, so each call opens a fresh connection.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Create a transport with an optional per-request timeout.
    pub fn new(timeout: Option<Duration>) -> NaResult<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| NaError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Classify a reqwest error into a NaError variant.
    fn classify_error(e: reqwest::Error) -> NaError {
        if e.is_timeout() {
            NaError::Timeout(e.to_string())
        } else if e.is_connect() {
            NaError::Http(format!("connection failed: {e}"))
        } else {
            NaError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> NaResult<RawResponse> {
        let mut builder = self.inner.request(method, url);
        if let Some(b) = body {
            builder = builder.json(b);
        }

        let response = builder.send().await.map_err(Self::classify_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NaError::Http(format!("failed to read response body: {e}")))?;

        trace!(status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}
