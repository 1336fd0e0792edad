//! Error types for the NetActuate API client.
//!
//! Transport failures, error envelopes returned by the API, and operations a
//! dialect does not support are unified into a single `NaError` enum with
//! conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using NaError.
pub type NaResult<T> = Result<T, NaError>;

/// Unified error type for the API client.
#[derive(Error, Debug)]
pub enum NaError {
    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Transport errors --
    /// HTTP request could not be completed (connect failure, bad URL, body read).
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The server answered with a non-success HTTP status.
    #[error("server error (status {status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        message: String,
    },

    // -- API errors --
    /// The API answered with an error envelope.
    #[error("api error: {message}")]
    Api {
        /// The envelope's `message` field.
        message: String,
        /// Remaining envelope fields, without `result` and `message`.
        detail: serde_json::Value,
    },

    /// The operation is not available in the selected API dialect.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// The request cannot be built from the given parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // -- Generic --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NaError {
    /// The error detail as a JSON string, for API envelope errors.
    pub fn detail_json(&self) -> Option<String> {
        match self {
            NaError::Api { detail, .. } => Some(detail.to_string()),
            _ => None,
        }
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            NaError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before any request was sent.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, NaError::NotImplemented(_))
    }
}

impl From<serde_json::Error> for NaError {
    fn from(e: serde_json::Error) -> Self {
        NaError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for NaError {
    fn from(e: toml::de::Error) -> Self {
        NaError::Config(e.to_string())
    }
}
