//! Command orchestration helpers from UI actions to backend command queue.

use std::path::PathBuf;

use crossbeam_channel::{Sender, TrySendError};
use dashboard_core::{AnalysisRequestFailed, AnalysisResultStore};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::BlockingNotice;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = match &cmd {
        BackendCommand::Analyze { .. } => "analyze",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Analysis worker disconnected (possible startup/runtime failure); restart the dashboard"
                .to_string(),
        ),
    }
}

/// Starts a submission for `path` and queues it for the worker.
///
/// A submission the session refuses only updates `status`. A command that
/// cannot be queued fails the submission like any other analysis failure.
pub fn submit_document(
    store: &mut AnalysisResultStore,
    cmd_tx: &Sender<BackendCommand>,
    path: PathBuf,
    status: &mut String,
) -> Option<BlockingNotice> {
    let ticket = match store.begin_submission() {
        Ok(ticket) => ticket,
        Err(rejected) => {
            *status = rejected.to_string();
            return None;
        }
    };

    *status = format!("Analyzing {}", path.display());
    match dispatch_backend_command(cmd_tx, BackendCommand::Analyze { ticket, path }) {
        Ok(()) => None,
        Err(reason) => {
            *status = reason.clone();
            store
                .complete_submission(ticket, Err(AnalysisRequestFailed::service(reason)))
                .err()
                .map(|failure| BlockingNotice::analysis_failed(&failure))
        }
    }
}
