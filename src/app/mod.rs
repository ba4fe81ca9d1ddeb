//! Session layer - central state and command routing
//!
//! The session actor receives host commands and network responses,
//! updates the history and saved stores, and emits replies.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::SessionActor;
pub use state::SessionState;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::messages::{Command, NetworkCommand, NetworkResponse, Reply};
use crate::network::NetworkActor;
use crate::storage::StateStore;

/// Host-side ends of a running session
pub struct SessionHandle {
    pub commands: mpsc::UnboundedSender<Command>,
    pub replies: mpsc::UnboundedReceiver<Reply>,
}

impl SessionHandle {
    /// Send one command and wait for the next reply.
    ///
    /// Only meaningful when no other command is outstanding, since replies
    /// are delivered in completion order.
    pub async fn request(&mut self, command: Command) -> Option<Reply> {
        self.commands.send(command).ok()?;
        self.replies.recv().await
    }
}

/// Spawn the network and session actors on the current Tokio runtime
pub fn spawn(store: Arc<dyn StateStore>, client: reqwest::Client) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();
    let (reply_tx, reply_rx) = mpsc::unbounded_channel::<Reply>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn session actor
    let session_actor = SessionActor::new(SessionState::new(store), net_cmd_tx, reply_tx);
    tokio::spawn(session_actor.run(command_rx, net_resp_rx));

    SessionHandle {
        commands: command_tx,
        replies: reply_rx,
    }
}
