//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Transport timeout for every dispatched request
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of history entries kept
pub const MAX_HISTORY: usize = 20;

/// State store key for the request history
pub const HISTORY_KEY: &str = "requestHistory";

/// State store key for the saved requests
pub const SAVED_KEY: &str = "savedRequests";

/// Collection schema written into exported documents
pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Name given to imported items that carry none
pub const DEFAULT_IMPORT_NAME: &str = "Imported Request";

/// Status text for requests that hit the transport timeout
pub const TIMEOUT_STATUS_TEXT: &str = "Request Timeout";

/// Status text for requests whose host could not be resolved
pub const NOT_FOUND_STATUS_TEXT: &str = "Address Not Found";

/// Directory under the home directory holding config and state
pub const APP_DIR: &str = ".photon";

/// Application name
pub const APP_NAME: &str = "Photon";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
