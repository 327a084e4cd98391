//! Command orchestration helpers from UI actions to backend command queue.

use std::time::Instant;

use client_core::{ActivitiesPage, StatusMessage};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub const QUEUE_FULL_TEXT: &str = "UI command queue is full; please retry";
pub const BACKEND_DISCONNECTED_TEXT: &str =
    "Backend command processor disconnected; restart the app";

/// Queues `cmd`. When it cannot be queued the reason goes to the message area
/// and the command is dropped.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    page: &mut ActivitiesPage,
    now: Instant,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend queue full");
            page.notifier.show(StatusMessage::error(QUEUE_FULL_TEXT), now);
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            page.notifier
                .show(StatusMessage::error(BACKEND_DISCONNECTED_TEXT), now);
            false
        }
    }
}
