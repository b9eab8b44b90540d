//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use dashboard_core::{HttpAnalysisClient, UploadController, UploadDocument};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, analysis_url: Url) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerUnavailable(format!(
                    "analysis worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(url = %analysis_url, "analysis worker ready");
            let controller = UploadController::new(HttpAnalysisClient::new(analysis_url));
            let _ = ui_tx.try_send(UiEvent::WorkerReady);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Analyze { ticket, path } => {
                        let outcome = match UploadDocument::from_path(&path).await {
                            Ok(document) => controller.analyze(document).await,
                            Err(err) => {
                                tracing::warn!(
                                    "failed to read '{}' for upload: {err}",
                                    path.display()
                                );
                                Err(err.into())
                            }
                        };
                        if ui_tx
                            .send(UiEvent::AnalysisFinished { ticket, outcome })
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("analysis worker stopped: ui channel closed");
        });
    });
}
