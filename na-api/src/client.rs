//! Connection to the NetActuate API.
//!
//! Binds a credential and dialect to a transport. Every call resolves the
//! full URL (host, root, path, key and query parameters), dispatches through
//! the transport, and normalizes the response through the dialect.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, trace};

use na_core::config::ApiVersion;
use na_core::constants;
use na_core::error::{NaError, NaResult};

use crate::dialect::{self, Dialect};
use crate::request::{self, ApiRequest, Params};
use crate::transport::Transport;

/// Authenticated, dialect-bound request function.
#[derive(Clone)]
pub struct Connection {
    transport: Arc<dyn Transport>,
    dialect: &'static dyn Dialect,
    /// Scheme, host, and dialect root (e.g. "https://vapi2.netactuate.com/api").
    api_root: String,
    /// API key appended to every request.
    key: String,
}

impl Connection {
    /// Create a connection. `host` overrides the dialect's default host.
    pub fn new(
        key: impl Into<String>,
        version: ApiVersion,
        host: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> NaResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(NaError::MissingConfig("api key".into()));
        }

        let dialect = dialect::for_version(version);
        let api_root = resolve_api_root(dialect, host);
        debug!("connection bound to {api_root} ({version})");

        Ok(Self {
            transport,
            dialect,
            api_root,
            key,
        })
    }

    /// The API version this connection speaks.
    pub fn version(&self) -> ApiVersion {
        self.dialect.version()
    }

    /// Get the API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub(crate) fn dialect(&self) -> &'static dyn Dialect {
        self.dialect
    }

    /// Build the full URL for a request, including the key and, for GET,
    /// the percent-encoded parameters.
    ///
    /// The credential is owned by the connection; a `key` entry in the
    /// request parameters is rejected.
    pub fn url(&self, request: &ApiRequest) -> NaResult<Url> {
        if request.params.contains_key(constants::KEY_PARAM) {
            return Err(NaError::InvalidRequest(format!(
                "parameter `{}` is reserved for the api key",
                constants::KEY_PARAM
            )));
        }

        let raw = format!("{}{}", self.api_root, request.normalized_path());
        let mut url = Url::parse(&raw)
            .map_err(|e| NaError::InvalidRequest(format!("invalid url {raw}: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(constants::KEY_PARAM, &self.key);
            if request.uses_query() {
                for (name, value) in &request.params {
                    if let Some(value) = request::query_value(value) {
                        pairs.append_pair(name, &value);
                    }
                }
            }
        }

        Ok(url)
    }

    /// Execute a request and return the normalized result.
    pub async fn request(&self, request: &ApiRequest) -> NaResult<Value> {
        let url = self.url(request)?;
        debug!("{} {}", request.method, request.normalized_path());

        let body = if request.uses_query() {
            None
        } else {
            Some(Value::Object(request.params.clone()))
        };

        let raw = self
            .transport
            .send(request.method.clone(), url, body.as_ref())
            .await?;

        trace!(status = raw.status, dialect = %self.version(), "normalizing response");
        self.dialect.normalize(raw)
    }

    /// Convenience: GET with query parameters.
    pub async fn get(&self, path: &str, params: Params) -> NaResult<Value> {
        self.request(&ApiRequest::get(path).params(params)).await
    }

    /// Convenience: POST with a JSON body.
    pub async fn post(&self, path: &str, params: Params) -> NaResult<Value> {
        self.request(&ApiRequest::post(path).params(params)).await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("api_root", &self.api_root)
            .field("version", &self.version())
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Resolve "scheme://host" plus the dialect root.
///
/// Overrides without a scheme get https; explicit http/https is kept.
fn resolve_api_root(dialect: &dyn Dialect, host: Option<&str>) -> String {
    let origin = match host.map(str::trim).filter(|h| !h.is_empty()) {
        Some(h) if h.starts_with("http://") || h.starts_with("https://") => {
            h.trim_end_matches('/').to_string()
        }
        Some(h) => format!("https://{}", h.trim_end_matches('/')),
        None => format!("https://{}", dialect.default_host()),
    };
    format!("{origin}{}", dialect.root())
}
