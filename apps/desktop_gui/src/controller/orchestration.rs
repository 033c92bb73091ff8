//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// Queues `cmd` for the worker. A command that could not be queued will never produce an
/// event, so the caller gets the failure back to settle whatever was waiting on it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();

    let message = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return Ok(());
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            "UI command queue is full; please retry"
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            "Backend command processor disconnected (possible startup/runtime failure); relaunch the app"
        }
    };
    *status = message.to_string();
    Err(UiError::from_message(UiErrorContext::General, message))
}
