//! Hong Kong bus ETA lookup.
//!
//! A client for the Citybus open-data feed that verifies a route, fetches
//! its ordered stop list, joins it against the global stop directory, and
//! normalizes real-time arrival estimates into display-ready structures.

pub mod api;
pub mod arrivals;
pub mod directory;
pub mod domain;
pub mod resolve;
pub mod session;
