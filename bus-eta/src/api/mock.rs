//! Mock feed client for testing without network access.
//!
//! Serves canned routes, stop sequences, directory entries, and arrival
//! records as if they were live API responses, and counts directory
//! fetches so cache behavior is observable from tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ArrivalEstimate, Direction, Route, RouteCode, RouteStop, StopDetails, StopId};

use super::error::{EtaError, FetchError};
use super::feed::TransitFeed;

/// Mock feed client backed by in-memory tables.
///
/// Cloning is cheap and clones share the same data, so a test can keep a
/// handle for assertions after moving a clone into the code under test.
#[derive(Clone, Default)]
pub struct MockEtaClient {
    data: Arc<Mutex<MockData>>,
}

#[derive(Default)]
struct MockData {
    routes: HashMap<RouteCode, Route>,
    route_stops: HashMap<RouteCode, Vec<RouteStop>>,
    stops: Vec<StopDetails>,
    arrivals: HashMap<(StopId, RouteCode), Vec<ArrivalEstimate>>,
    fail_directory: bool,
    directory_fetches: u64,
}

impl MockEtaClient {
    /// Create an empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    pub async fn add_route(&self, route: Route) {
        let mut data = self.data.lock().await;
        data.routes.insert(route.code.clone(), route);
    }

    /// Register the stop sequence served for a route.
    pub async fn add_route_stops(&self, route: RouteCode, stops: Vec<RouteStop>) {
        self.data.lock().await.route_stops.insert(route, stops);
    }

    /// Append entries to the global stop directory.
    pub async fn add_stops(&self, stops: Vec<StopDetails>) {
        self.data.lock().await.stops.extend(stops);
    }

    /// Register the arrival records served for a stop+route pair.
    pub async fn add_arrivals(
        &self,
        stop: StopId,
        route: RouteCode,
        arrivals: Vec<ArrivalEstimate>,
    ) {
        self.data.lock().await.arrivals.insert((stop, route), arrivals);
    }

    /// Make subsequent directory fetches fail (or succeed again).
    pub async fn fail_directory(&self, fail: bool) {
        self.data.lock().await.fail_directory = fail;
    }

    /// Number of directory fetches issued so far, failed ones included.
    pub async fn directory_fetches(&self) -> u64 {
        self.data.lock().await.directory_fetches
    }
}

impl TransitFeed for MockEtaClient {
    fn get_route<'a>(
        &'a self,
        route: &'a RouteCode,
    ) -> Pin<Box<dyn Future<Output = Result<Route, EtaError>> + Send + 'a>> {
        Box::pin(async move {
            let data = self.data.lock().await;
            data.routes
                .get(route)
                .cloned()
                .ok_or_else(|| EtaError::RouteNotFound {
                    route: route.clone(),
                })
        })
    }

    fn get_route_stops<'a>(
        &'a self,
        route: &'a RouteCode,
        direction: Option<Direction>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RouteStop>, EtaError>> + Send + 'a>> {
        Box::pin(async move {
            let data = self.data.lock().await;
            let stops = data.route_stops.get(route).cloned().unwrap_or_default();
            Ok(stops
                .into_iter()
                .filter(|s| direction.map_or(true, |d| s.direction == d))
                .collect())
        })
    }

    fn get_all_stops<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StopDetails>, EtaError>> + Send + 'a>> {
        Box::pin(async move {
            // Suspend once so concurrent callers interleave the way they
            // would around a real network round trip.
            tokio::task::yield_now().await;

            let mut data = self.data.lock().await;
            data.directory_fetches += 1;

            if data.fail_directory {
                return Err(EtaError::DirectoryUnavailable {
                    source: FetchError::Status { status: 503 },
                });
            }
            Ok(data.stops.clone())
        })
    }

    fn get_arrivals<'a>(
        &'a self,
        stop: &'a StopId,
        route: &'a RouteCode,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ArrivalEstimate>, EtaError>> + Send + 'a>> {
        Box::pin(async move {
            let data = self.data.lock().await;
            Ok(data
                .arrivals
                .get(&(stop.clone(), route.clone()))
                .cloned()
                .unwrap_or_default())
        })
    }
}
