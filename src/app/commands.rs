//! Command handlers - routing each host command into the stores

use std::path::Path;

use crate::app::SessionState;
use crate::collection;
use crate::messages::{NetworkCommand, NetworkResponse, Reply, SendRequestPayload};
use crate::models::{Outcome, RequestDescriptor};

impl SessionState {
    // ========================
    // Request sending
    // ========================

    /// Record the attempt in history and prepare the dispatch.
    ///
    /// History keeps what the user typed, before any normalization.
    pub fn send_request(&mut self, payload: SendRequestPayload) -> (u64, NetworkCommand) {
        let request = payload.into_descriptor();
        self.record_attempt(&request);

        let id = self.next_id();
        self.in_flight.insert(id);
        (id, NetworkCommand::Dispatch { id, request })
    }

    fn record_attempt(&mut self, request: &RequestDescriptor) {
        if let Err(e) = self.history.record(request.clone()) {
            tracing::warn!(error = %e, "Failed to record request history");
        }
    }

    /// Turn a finished dispatch into the host reply
    pub fn complete_request(&mut self, id: u64, outcome: Outcome) -> Reply {
        self.in_flight.remove(&id);
        Reply::Response {
            outcome,
            history: self.history.list(),
        }
    }

    pub fn handle_response(&mut self, response: NetworkResponse) -> Reply {
        match response {
            NetworkResponse::Completed { id, outcome } => self.complete_request(id, outcome),
        }
    }

    // ========================
    // History
    // ========================

    pub fn load_history(&self) -> Reply {
        Reply::HistoryData {
            history: self.history.list(),
        }
    }

    pub fn clear_history(&mut self) -> Reply {
        match self.history.clear() {
            Ok(()) => self.load_history(),
            Err(e) => Reply::error(format!("Failed to clear history: {}", e)),
        }
    }

    // ========================
    // Saved requests
    // ========================

    pub fn saved_requests(&self) -> Reply {
        Reply::SavedRequestsData {
            saved: self.saved.list(),
        }
    }

    pub fn save_request(&mut self, name: &str, request: RequestDescriptor) -> Reply {
        match self.saved.save(name, request) {
            Ok(saved) => {
                tracing::info!(id = %saved.id, name = %saved.name, "Saved request");
                self.saved_requests()
            }
            Err(e) => Reply::error(format!("Failed to save request: {}", e)),
        }
    }

    pub fn delete_saved_request(&mut self, id: &str) -> Reply {
        match self.saved.delete(id) {
            Ok(found) => {
                tracing::info!(id, found, "Deleted saved request");
                self.saved_requests()
            }
            Err(e) => Reply::error(format!("Failed to delete request: {}", e)),
        }
    }

    // ========================
    // Collection import/export
    // ========================

    pub fn export_saved(&self, path: &Path) -> Reply {
        let saved = self.saved.list();
        let document = collection::export_collection(&saved, chrono::Local::now().date_naive());

        match collection::write_collection(path, &document) {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    count = saved.len(),
                    "Exported saved requests"
                );
                Reply::Exported {
                    path: path.to_path_buf(),
                    count: saved.len(),
                }
            }
            Err(e) => Reply::error(format!("Export failed: {}", e)),
        }
    }

    /// Append every request of the collection at `path`, or none on failure
    pub fn import_saved(&mut self, path: &Path) -> Reply {
        let imported = match collection::read_collection(path) {
            Ok(imported) => imported,
            Err(e) => return Reply::error(format!("Import failed: {}", e)),
        };

        match self.saved.extend(imported) {
            Ok(count) => {
                tracing::info!(path = %path.display(), count, "Imported saved requests");
                self.saved_requests()
            }
            Err(e) => Reply::error(format!("Import failed: {}", e)),
        }
    }
}
