//! Process-wide stop directory.
//!
//! The global stop list is large and route-independent, so it is fetched at
//! most once per session and shared across all route lookups. A population
//! guard ensures concurrent first lookups do not issue duplicate fetches:
//! one requester fetches while the rest wait and observe the filled table.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::api::{EtaClient, EtaError, TransitFeed};
use crate::domain::{StopDetails, StopId};

/// Shared index type: the directory hands out cheap `Arc` snapshots so a
/// join over a whole route takes the read lock once.
pub type StopIndex = Arc<HashMap<StopId, StopDetails>>;

/// In-memory table of all known stops, keyed by stop id.
///
/// `None` means not yet populated. The table is never invalidated within a
/// session; [`StopDirectory::refresh`] is the only way to replace it.
#[derive(Clone)]
pub struct StopDirectory<F = EtaClient> {
    inner: Arc<RwLock<Option<StopIndex>>>,
    /// Serializes population so concurrent `ensure_loaded` calls share one
    /// fetch instead of racing.
    populate_guard: Arc<Mutex<()>>,
    client: F,
}

impl<F: TransitFeed> StopDirectory<F> {
    /// Create an empty directory backed by the given client.
    pub fn new(client: F) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            populate_guard: Arc::new(Mutex::new(())),
            client,
        }
    }

    /// Populate the directory if it has not been loaded yet.
    ///
    /// Deduplicates concurrent callers: only one fetch is in flight at a
    /// time, and late arrivals return as soon as the first fetch lands.
    /// Failure leaves the directory empty; lookups then degrade to misses.
    pub async fn ensure_loaded(&self) -> Result<(), EtaError> {
        if self.inner.read().await.is_some() {
            return Ok(());
        }

        let _guard = self.populate_guard.lock().await;

        // Another requester may have populated while we waited on the guard.
        if self.inner.read().await.is_some() {
            return Ok(());
        }

        let index = self.fetch_index().await?;
        *self.inner.write().await = Some(index);
        Ok(())
    }

    /// Refetch the directory and atomically replace the table.
    ///
    /// On failure the existing table is preserved and the error returned.
    /// Returns the new entry count on success.
    pub async fn refresh(&self) -> Result<usize, EtaError> {
        let index = self.fetch_index().await?;
        let count = index.len();
        *self.inner.write().await = Some(index);
        Ok(count)
    }

    /// Look up one stop by id. Absence is `None`, never an error.
    pub async fn get(&self, id: &StopId) -> Option<StopDetails> {
        let guard = self.inner.read().await;
        guard.as_ref().and_then(|index| index.get(id).cloned())
    }

    /// A shared snapshot of the current table; empty when unpopulated.
    pub async fn snapshot(&self) -> StopIndex {
        self.inner.read().await.clone().unwrap_or_default()
    }

    /// Number of stops currently loaded.
    pub async fn len(&self) -> usize {
        self.inner.read().await.as_ref().map_or(0, |index| index.len())
    }

    /// True until the first successful population.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn fetch_index(&self) -> Result<StopIndex, EtaError> {
        let stops = self.client.get_all_stops().await?;
        let index = build_index(stops);
        debug!("stop directory loaded: {} stops", index.len());
        Ok(Arc::new(index))
    }

    /// Install a prebuilt table, bypassing the network. Test seam.
    #[cfg(test)]
    pub(crate) async fn install(&self, stops: Vec<StopDetails>) {
        *self.inner.write().await = Some(Arc::new(build_index(stops)));
    }
}

/// Build the id → details map from directory entries.
///
/// Later duplicates win, matching the feed's own "latest record is
/// authoritative" convention.
fn build_index(stops: Vec<StopDetails>) -> HashMap<StopId, StopDetails> {
    stops
        .into_iter()
        .map(|stop| (stop.id.clone(), stop))
        .collect()
}
