//! Session state - the stores and in-flight bookkeeping, no channel I/O

use std::collections::HashSet;
use std::sync::Arc;

use crate::history::HistoryStore;
use crate::saved::SavedStore;
use crate::storage::StateStore;

/// Main session state
pub struct SessionState {
    // Persisted data
    pub history: HistoryStore,
    pub saved: SavedStore,

    // Dispatch bookkeeping
    pub next_request_id: u64,
    pub in_flight: HashSet<u64>,
}

impl SessionState {
    /// Load both stores from `store`
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        SessionState {
            history: HistoryStore::load(store.clone()),
            saved: SavedStore::load(store),
            next_request_id: 1,
            in_flight: HashSet::new(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }
}
