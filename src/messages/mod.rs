//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the host, the session
//! and the network layer.

pub mod command;
pub mod network;
pub mod reply;

pub use command::{Command, SendRequestPayload};
pub use network::{NetworkCommand, NetworkResponse};
pub use reply::Reply;
