//! Session state shared across lookups.
//!
//! The session object replaces ambient globals: it owns the API client,
//! the stop directory, and per-target request counters. A lookup result
//! carries the generation it was issued under so the presentation layer
//! can discard responses overtaken by a newer request (latest wins) —
//! asynchronous lookups may land out of order even without parallelism.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{EtaClient, EtaError, TransitFeed};
use crate::arrivals::{ArrivalBoard, group_by_destination};
use crate::directory::StopDirectory;
use crate::domain::{Direction, RouteCode, StopId};
use crate::resolve::{ResolvedRoute, resolve_route};

/// A lookup result tagged with its request generation.
#[derive(Debug, Clone)]
pub struct Lookup<T> {
    /// Monotonic per-target counter value this lookup was issued under.
    pub generation: u64,
    pub value: T,
}

/// One user session: client, directory cache, and request counters.
///
/// Cloning is cheap and clones share all state.
#[derive(Clone)]
pub struct Session<F = EtaClient> {
    client: F,
    directory: StopDirectory<F>,
    stop_lookups: Arc<AtomicU64>,
    arrival_lookups: Arc<AtomicU64>,
}

impl<F: TransitFeed + Clone> Session<F> {
    /// Create a session around a configured client.
    pub fn new(client: F) -> Self {
        let directory = StopDirectory::new(client.clone());
        Self {
            client,
            directory,
            stop_lookups: Arc::new(AtomicU64::new(0)),
            arrival_lookups: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &F {
        &self.client
    }

    /// The session's stop directory.
    pub fn directory(&self) -> &StopDirectory<F> {
        &self.directory
    }

    /// Resolve a route to its enriched stop list.
    pub async fn resolve_route(
        &self,
        code: &RouteCode,
        direction: Option<Direction>,
    ) -> Result<Lookup<ResolvedRoute>, EtaError> {
        let generation = self.next_stop_generation();
        let value = resolve_route(&self.client, &self.directory, code, direction).await?;
        Ok(Lookup { generation, value })
    }

    /// Fetch and normalize the arrival board for a stop+route pair.
    pub async fn arrival_board(
        &self,
        stop: &StopId,
        route: &RouteCode,
    ) -> Result<Lookup<ArrivalBoard>, EtaError> {
        let generation = self.next_arrival_generation();
        let arrivals = self.client.get_arrivals(stop, route).await?;
        Ok(Lookup {
            generation,
            value: group_by_destination(arrivals),
        })
    }

    /// Whether a stop-lookup generation is still the latest issued.
    pub fn is_current_stop_lookup(&self, generation: u64) -> bool {
        generation == self.stop_lookups.load(Ordering::SeqCst)
    }

    /// Whether an arrival-lookup generation is still the latest issued.
    pub fn is_current_arrival_lookup(&self, generation: u64) -> bool {
        generation == self.arrival_lookups.load(Ordering::SeqCst)
    }

    fn next_stop_generation(&self) -> u64 {
        self.stop_lookups.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn next_arrival_generation(&self) -> u64 {
        self.arrival_lookups.fetch_add(1, Ordering::SeqCst) + 1
    }
}
