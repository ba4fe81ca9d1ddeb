//! # Photon
//!
//! The session core of an editor-embedded REST client.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Headers and body as free text, validated when sent
//! - Auth support (Bearer, Basic)
//! - Request history (last 20)
//! - Saved requests with Postman collection import/export
//!
//! ## Architecture
//! Actor-based with channels:
//! - Host (editor) - speaks JSON commands and replies
//! - Session Layer (state machine over the stores)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod logger;
pub mod messages;
pub mod models;
pub mod network;
pub mod normalizer;
pub mod saved;
pub mod storage;

// Re-export commonly used types
pub use app::{spawn, SessionActor, SessionHandle, SessionState};
pub use collection::{export_collection, import_collection, CollectionDocument};
pub use config::Config;
pub use error::{PhotonError, Result};
pub use history::HistoryStore;
pub use messages::{Command, NetworkCommand, NetworkResponse, Reply, SendRequestPayload};
pub use models::{
    Auth, HistoryEntry, HttpMethod, Outcome, OutcomeStatus, RequestDescriptor, SavedRequest,
};
pub use network::NetworkActor;
pub use normalizer::{normalize, NormalizedRequest, RequestBody};
pub use saved::SavedStore;
pub use storage::{FileStateStore, MemoryStateStore, StateStore};
