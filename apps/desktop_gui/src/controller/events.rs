//! Events sent from the backend worker to the UI thread.

use dashboard_core::{AnalysisRequestFailed, SubmissionTicket};
use shared::protocol::AnalysisResult;

pub enum UiEvent {
    WorkerReady,
    WorkerUnavailable(String),
    AnalysisFinished {
        ticket: SubmissionTicket,
        outcome: Result<AnalysisResult, AnalysisRequestFailed>,
    },
}

/// Modal message the operator has to dismiss before continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingNotice {
    pub title: &'static str,
    pub message: String,
}

impl BlockingNotice {
    pub fn analysis_failed(failure: &AnalysisRequestFailed) -> Self {
        Self {
            title: "Analysis failed",
            message: failure.notice().to_string(),
        }
    }

    pub fn worker_unavailable(reason: impl Into<String>) -> Self {
        Self {
            title: "Analysis worker unavailable",
            message: reason.into(),
        }
    }
}
