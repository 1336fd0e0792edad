//! NetActuate API core - error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the API client and CLI:
//! - The `ApiVersion` dialect selector and API configuration
//! - A single error type covering transport, envelope, and usage failures
//! - Structured logging with tracing
//! - Fixed API hosts, roots, and job status codes

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod paths;

// Re-export commonly used items at the crate root
pub use config::{ApiConfig, ApiVersion, AppConfig};
pub use error::{NaError, NaResult};
pub use logging::{init_logging, LogOptions};
