//! Request history - the most recent dispatch attempts, newest first

use std::collections::VecDeque;
use std::sync::Arc;

use crate::constants::{HISTORY_KEY, MAX_HISTORY};
use crate::error::Result;
use crate::models::{HistoryEntry, RequestDescriptor};
use crate::storage::{load_list, store_list, StateStore};

/// Bounded history backed by a [`StateStore`]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    store: Arc<dyn StateStore>,
}

impl HistoryStore {
    /// Load persisted history. Unreadable state is logged and treated as empty.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let mut entries: VecDeque<HistoryEntry> =
            match load_list::<HistoryEntry>(store.as_ref(), HISTORY_KEY) {
                Ok(entries) => entries.into(),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable request history");
                    VecDeque::new()
                }
            };
        entries.truncate(MAX_HISTORY);

        HistoryStore { entries, store }
    }

    /// Record a dispatch attempt at the front, evicting the oldest beyond the cap
    pub fn record(&mut self, request: RequestDescriptor) -> Result<HistoryEntry> {
        let now = chrono::Local::now();
        let mut id = now.timestamp_millis();
        if let Some(newest) = self.entries.front() {
            // keep ids unique when two attempts land in the same millisecond
            id = id.max(newest.id + 1);
        }

        let entry = HistoryEntry {
            id,
            request,
            timestamp: now.format("%H:%M:%S").to_string(),
        };

        let mut next = self.entries.clone();
        next.push_front(entry.clone());
        next.truncate(MAX_HISTORY);

        store_list(self.store.as_ref(), HISTORY_KEY, &next)?;
        self.entries = next;
        Ok(entry)
    }

    /// Entries, newest first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Drop every entry
    pub fn clear(&mut self) -> Result<()> {
        store_list::<HistoryEntry, _>(self.store.as_ref(), HISTORY_KEY, &[])?;
        self.entries.clear();
        Ok(())
    }

    /// Get history item by index (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
