//! Network messages - communication between the session and Network layers

use crate::models::{Outcome, RequestDescriptor};

/// Commands sent from the session to the Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Normalize and execute a request
    Dispatch {
        id: u64,
        request: RequestDescriptor,
    },
    /// Shutdown the network actor, dropping in-flight requests
    Shutdown,
}

/// Responses sent from the Network layer to the session
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Dispatch finished, successfully or not
    Completed { id: u64, outcome: Outcome },
}

