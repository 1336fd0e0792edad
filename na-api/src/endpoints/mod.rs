//! API endpoint modules organized by category.
//!
//! Each module adds methods for a group of related endpoints to
//! [`crate::NodeDriver`].

pub mod bgp;
pub mod catalog;
pub mod jobs;
pub mod packages;
pub mod servers;
