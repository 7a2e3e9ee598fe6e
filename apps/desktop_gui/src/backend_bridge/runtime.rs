//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{categorize, CategorizationOutcome, GatewayClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        // Commands are handled one at a time; the UI never queues a second
        // categorization while one is outstanding.
        while let Ok(cmd) = cmd_rx.recv() {
            let event = runtime.block_on(handle_command(cmd));
            if ui_tx.send(event).is_err() {
                break;
            }
        }
        tracing::debug!("backend worker stopped");
    });
}

async fn handle_command(cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Categorize {
            server_url,
            raw_tasks,
        } => {
            let outcome = match GatewayClient::new(&server_url) {
                Ok(client) => categorize(&client, &raw_tasks).await,
                Err(err) => {
                    tracing::error!(%err, "cannot reach gateway");
                    CategorizationOutcome::RequestFailed(err.to_string())
                }
            };
            UiEvent::Categorized(outcome)
        }
    }
}
