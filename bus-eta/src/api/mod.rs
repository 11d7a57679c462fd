//! Typed HTTP gateway for the Citybus open-data API.
//!
//! The upstream is a plain JSON API with no authentication. Every response
//! is an envelope object whose `data` field carries the payload; a
//! non-success status or a missing `data` field is the failure signal
//! (there is no error-code field to parse).

mod client;
mod convert;
mod error;
mod feed;
mod mock;
mod types;

pub use client::{EtaClient, EtaClientConfig};
pub use convert::ConversionError;
pub use error::{EtaError, FetchError};
pub use feed::TransitFeed;
pub use mock::MockEtaClient;
pub use types::{Envelope, EtaDto, RouteDto, RouteStopDto, StopDto};
