//! Pluggable feed abstraction.
//!
//! The directory, resolution, and session layers are generic over this
//! trait so they can run against [`EtaClient`] in production and
//! [`MockEtaClient`](super::MockEtaClient) in tests.

use std::future::Future;
use std::pin::Pin;

use crate::domain::{ArrivalEstimate, Direction, Route, RouteCode, RouteStop, StopDetails, StopId};

use super::client::EtaClient;
use super::error::EtaError;

/// The four remote lookups of the arrival feed.
///
/// Implementations must uphold the same contracts as [`EtaClient`]: every
/// call is independent and idempotent, and an empty arrival list is a valid
/// success outcome, not an error.
pub trait TransitFeed: Send + Sync {
    /// Verify a route exists and fetch its terminus names.
    fn get_route<'a>(
        &'a self,
        route: &'a RouteCode,
    ) -> Pin<Box<dyn Future<Output = Result<Route, EtaError>> + Send + 'a>>;

    /// Fetch a route's ordered stop sequence, optionally one direction only.
    fn get_route_stops<'a>(
        &'a self,
        route: &'a RouteCode,
        direction: Option<Direction>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RouteStop>, EtaError>> + Send + 'a>>;

    /// Fetch the full global stop directory.
    fn get_all_stops<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StopDetails>, EtaError>> + Send + 'a>>;

    /// Fetch arrival estimates for a stop+route pair.
    fn get_arrivals<'a>(
        &'a self,
        stop: &'a StopId,
        route: &'a RouteCode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ArrivalEstimate>, EtaError>> + Send + 'a>>;
}

impl TransitFeed for EtaClient {
    fn get_route<'a>(
        &'a self,
        route: &'a RouteCode,
    ) -> Pin<Box<dyn Future<Output = Result<Route, EtaError>> + Send + 'a>> {
        Box::pin(EtaClient::get_route(self, route))
    }

    fn get_route_stops<'a>(
        &'a self,
        route: &'a RouteCode,
        direction: Option<Direction>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RouteStop>, EtaError>> + Send + 'a>> {
        Box::pin(EtaClient::get_route_stops(self, route, direction))
    }

    fn get_all_stops<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StopDetails>, EtaError>> + Send + 'a>> {
        Box::pin(EtaClient::get_all_stops(self))
    }

    fn get_arrivals<'a>(
        &'a self,
        stop: &'a StopId,
        route: &'a RouteCode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ArrivalEstimate>, EtaError>> + Send + 'a>> {
        Box::pin(EtaClient::get_arrivals(self, stop, route))
    }
}
