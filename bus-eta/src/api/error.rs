//! Gateway error types.

use crate::domain::RouteCode;

/// Low-level transport failure from a single API call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}")]
    Status { status: u16 },

    /// Failed to decode the response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response decoded but the envelope carried no `data` field
    #[error("response missing data field")]
    MissingData,
}

/// Failures surfaced by the lookup pipeline.
///
/// All variants are local, recoverable conditions meant to be rendered as a
/// message plus an empty result; none should abort the process. Directory
/// failure is explicitly non-fatal to route resolution.
#[derive(Debug, thiserror::Error)]
pub enum EtaError {
    /// The route code does not exist (or the route lookup failed)
    #[error("route {route} not found")]
    RouteNotFound { route: RouteCode },

    /// The route exists but its stop list came back empty
    #[error("no stops found for route {route}")]
    NoStops { route: RouteCode },

    /// The route-stop fetch failed in transport
    #[error("stop list unavailable: {source}")]
    StopsUnavailable {
        #[source]
        source: FetchError,
    },

    /// The global stop directory fetch failed; callers degrade to
    /// identifier-only display instead of aborting
    #[error("stop directory unavailable: {source}")]
    DirectoryUnavailable {
        #[source]
        source: FetchError,
    },

    /// The arrival fetch failed (distinct from a successful empty result)
    #[error("arrival data unavailable: {source}")]
    ArrivalsUnavailable {
        #[source]
        source: FetchError,
    },
}
