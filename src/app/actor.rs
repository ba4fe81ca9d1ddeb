//! Session actor - message loop processing host commands and network responses

use serde_json::Value;
use tokio::sync::mpsc;

use crate::app::state::SessionState;
use crate::messages::{Command, NetworkCommand, NetworkResponse, Reply};
use crate::models::Outcome;

/// Session actor that processes host commands and network responses
pub struct SessionActor {
    state: SessionState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    reply_tx: mpsc::UnboundedSender<Reply>,
}

impl SessionActor {
    pub fn new(
        state: SessionState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        reply_tx: mpsc::UnboundedSender<Reply>,
    ) -> Self {
        SessionActor {
            state,
            network_tx,
            reply_tx,
        }
    }

    /// Run the actor message loop.
    ///
    /// Once the command channel closes, requests still in flight are
    /// answered before the network actor is shut down.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::UnboundedReceiver<Command>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mut accepting = true;

        loop {
            tokio::select! {
                command = command_rx.recv(), if accepting => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            accepting = false;
                            if !self.state.has_in_flight() {
                                break;
                            }
                        }
                    }
                }
                Some(response) = net_rx.recv() => {
                    let reply = self.state.handle_response(response);
                    let _ = self.reply_tx.send(reply);
                    if !accepting && !self.state.has_in_flight() {
                        break;
                    }
                }
                else => break,
            }
        }

        let _ = self.network_tx.send(NetworkCommand::Shutdown);
    }

    /// Handle a host command, replying immediately unless it went to the network
    fn handle_command(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "Handling command");

        let reply = match command {
            Command::SendRequest(payload) => {
                let (id, cmd) = self.state.send_request(payload);
                if self.network_tx.send(cmd).is_ok() {
                    return;
                }
                let message = "Network layer unavailable";
                let outcome = Outcome::failure(message, Value::String(message.into()), 0);
                self.state.complete_request(id, outcome)
            }
            Command::LoadHistory => self.state.load_history(),
            Command::ClearHistory => self.state.clear_history(),
            Command::SaveRequest { name, req } => self.state.save_request(&name, req),
            Command::GetSavedRequests => self.state.saved_requests(),
            Command::DeleteSavedRequest { id } => self.state.delete_saved_request(&id),
            Command::ExportSaved { path } => self.state.export_saved(&path),
            Command::ImportSaved { path } => self.state.import_saved(&path),
        };

        let _ = self.reply_tx.send(reply);
    }
}
