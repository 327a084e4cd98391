//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpActivitiesApi, PageController};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread. Each command runs as its own task, so
/// overlapping actions finish in completion order rather than click order.
pub fn launch(base_url: Url, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(server_url = %base_url, "backend worker starting");
            let controller = PageController::new(Arc::new(HttpActivitiesApi::new(base_url)));

            let mut events = controller.subscribe_events();
            let forward_tx = ui_tx.clone();
            tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if forward_tx.try_send(UiEvent::Page(event)).is_err() {
                                tracing::warn!("ui event queue unavailable; dropping page event");
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "backend: page event forwarder lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            let _ = ui_tx.try_send(UiEvent::BackendReady);

            while let Ok(cmd) = cmd_rx.recv() {
                let controller = Arc::clone(&controller);
                tokio::spawn(async move { run_command(&controller, cmd).await });
            }
            tracing::info!("backend: command queue closed; worker exiting");
        });
    });
}

/// Outcomes reach the UI as page events, so the results are not needed here.
async fn run_command(controller: &PageController, cmd: BackendCommand) {
    tracing::info!(command = cmd.name(), "backend: running command");
    match cmd {
        BackendCommand::Refresh => {
            let _ = controller.refresh().await;
        }
        BackendCommand::Signup(request) => {
            let _ = controller.signup(&request).await;
        }
        BackendCommand::Unregister(intent) => {
            let _ = controller.unregister(&intent).await;
        }
    }
}
