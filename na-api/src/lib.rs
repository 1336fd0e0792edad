//! NetActuate API - HTTP client for the NetActuate cloud server API.
//!
//! This crate wraps the server lifecycle, plan/location, job, and BGP
//! endpoints of both API generations ("v1" and "v2") behind a single
//! [`NodeDriver`] facade. Dialect differences (hosts, path prefixes, envelope
//! shapes, and per-endpoint routing) live in one [`Dialect`] strategy chosen
//! at construction. A [`BlockingNodeDriver`] offers the same operations for
//! synchronous callers.

pub mod blocking;
pub mod client;
pub mod dialect;
pub mod driver;
pub mod endpoints;
pub mod job;
pub mod request;
pub mod response;
pub mod transport;

// Re-export key types
pub use blocking::{BlockingJobStatus, BlockingNodeDriver};
pub use client::Connection;
pub use dialect::Dialect;
pub use driver::NodeDriver;
pub use endpoints::bgp::{PrefixOrder, PrefixTarget};
pub use endpoints::catalog::Location;
pub use endpoints::servers::BuildParams;
pub use job::{Job, JobState, JobStatus};
pub use request::{ApiRequest, Params};
pub use transport::{HttpTransport, RawResponse, Transport};

pub use na_core::{ApiConfig, ApiVersion, NaError, NaResult};
