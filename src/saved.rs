//! Saved requests - named request templates kept in insertion order

use std::sync::Arc;

use crate::constants::SAVED_KEY;
use crate::error::{PhotonError, Result};
use crate::models::{RequestDescriptor, SavedRequest};
use crate::storage::{load_list, store_list, StateStore};

/// Unbounded saved-request library backed by a [`StateStore`]
pub struct SavedStore {
    requests: Vec<SavedRequest>,
    store: Arc<dyn StateStore>,
}

impl SavedStore {
    /// Load persisted saved requests. Unreadable state is logged and treated as empty.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let requests = match load_list::<SavedRequest>(store.as_ref(), SAVED_KEY) {
            Ok(requests) => requests,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable saved requests");
                Vec::new()
            }
        };

        SavedStore { requests, store }
    }

    /// Save a request under a non-empty name
    pub fn save(&mut self, name: &str, request: RequestDescriptor) -> Result<SavedRequest> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PhotonError::EmptyName);
        }

        let saved = SavedRequest::new(name, request);
        self.extend(vec![saved.clone()])?;
        Ok(saved)
    }

    /// Append a batch in a single write. Either all entries land or none do.
    pub fn extend(&mut self, batch: Vec<SavedRequest>) -> Result<usize> {
        let count = batch.len();
        if count == 0 {
            return Ok(0);
        }

        let mut next = self.requests.clone();
        next.extend(batch);
        self.commit(next)?;
        Ok(count)
    }

    /// Remove the request with `id`. Returns false when nothing matched.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.requests.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let mut next = self.requests.clone();
        next.remove(index);
        self.commit(next)?;
        Ok(true)
    }

    /// Saved requests, oldest first
    pub fn list(&self) -> Vec<SavedRequest> {
        self.requests.clone()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn commit(&mut self, next: Vec<SavedRequest>) -> Result<()> {
        store_list(self.store.as_ref(), SAVED_KEY, &next)?;
        self.requests = next;
        Ok(())
    }
}
