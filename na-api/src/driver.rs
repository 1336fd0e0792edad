//! The node driver facade.
//!
//! `NodeDriver` exposes one async method per API operation; the methods are
//! grouped by category under [`crate::endpoints`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use na_core::config::{ApiConfig, ApiVersion};
use na_core::error::NaResult;

use crate::client::Connection;
use crate::dialect::Dialect;
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, Transport};

/// API wrapper for server, plan, job, and BGP calls.
#[derive(Debug, Clone)]
pub struct NodeDriver {
    conn: Connection,
}

impl NodeDriver {
    /// Provider name.
    pub const NAME: &'static str = "NetActuate";
    /// Provider website.
    pub const WEBSITE: &'static str = "http://www.netactuate.com";

    /// Create a driver for the v2 API on its default host.
    pub fn new(key: impl Into<String>) -> NaResult<Self> {
        Self::with_version(key, ApiVersion::V2, None)
    }

    /// Create a driver for a specific API version and optional host override.
    pub fn with_version(
        key: impl Into<String>,
        version: ApiVersion,
        host: Option<&str>,
    ) -> NaResult<Self> {
        let transport = Arc::new(HttpTransport::new(None)?);
        Self::with_transport(key, version, host, transport)
    }

    /// Create a driver from configuration.
    pub fn from_config(config: &ApiConfig) -> NaResult<Self> {
        let timeout = config.timeout_ms.map(Duration::from_millis);
        let transport = Arc::new(HttpTransport::new(timeout)?);
        Self::with_transport(
            config.key.clone(),
            config.version,
            config.host.as_deref(),
            transport,
        )
    }

    /// Create a driver over a caller-supplied transport.
    pub fn with_transport(
        key: impl Into<String>,
        version: ApiVersion,
        host: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> NaResult<Self> {
        Ok(Self {
            conn: Connection::new(key, version, host, transport)?,
        })
    }

    /// The API version this driver speaks.
    pub fn version(&self) -> ApiVersion {
        self.conn.version()
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn dialect(&self) -> &'static dyn Dialect {
        self.conn.dialect()
    }

    pub(crate) async fn call(&self, request: ApiRequest) -> NaResult<Value> {
        self.conn.request(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_v2() {
        let driver = NodeDriver::new("k").unwrap();
        assert_eq!(driver.version(), ApiVersion::V2);
        assert_eq!(driver.connection().api_root(), "https://vapi2.netactuate.com/api");
    }

    #[test]
    fn test_from_config() {
        let mut config = ApiConfig::new("k", ApiVersion::V1);
        config.host = Some("http://localhost:9999".into());
        config.timeout_ms = Some(1_000);
        let driver = NodeDriver::from_config(&config).unwrap();
        assert_eq!(driver.version(), ApiVersion::V1);
        assert_eq!(driver.connection().api_root(), "http://localhost:9999");
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(NodeDriver::from_config(&ApiConfig::default()).is_err());
    }
}
