//! Photon - stdio bridge between an editor host and the session core
//!
//! Protocol:
//! - stdin: one JSON command per line
//! - stdout: one JSON reply per line
//! - logs go to a file in the data directory

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use photon::constants::{APP_NAME, APP_VERSION};
use photon::network::create_client;
use photon::{spawn, Command, Config, FileStateStore, Reply};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _guard = photon::logger::init_logger(&config)?;
    tracing::info!("{} v{} starting", APP_NAME, APP_VERSION);

    let store = Arc::new(FileStateStore::new(&config.data_dir));
    let handle = spawn(store, create_client());
    let command_tx = handle.commands;
    let mut reply_rx = handle.replies;

    // Errors found while reading are answered on the same output stream
    let (local_tx, mut local_rx) = tokio::sync::mpsc::unbounded_channel::<Reply>();

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Command>(&line) {
                Ok(command) => {
                    if command_tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Unparsable command");
                    let _ = local_tx.send(Reply::error(format!("Invalid command: {}", e)));
                }
            }
        }
        // dropping command_tx lets the session finish in-flight requests and stop
    });

    let mut stdout = tokio::io::stdout();
    loop {
        let reply = tokio::select! {
            Some(reply) = reply_rx.recv() => reply,
            Some(reply) = local_rx.recv() => reply,
            else => break,
        };
        let mut line = serde_json::to_vec(&reply)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }

    reader.await?;
    tracing::info!("{} stopped", APP_NAME);
    Ok(())
}
