//! Session state: the phase machine and the analysis result it owns.

use serde::Serialize;
use shared::protocol::AnalysisResult;
use tracing::{error, info, warn};

use crate::{
    approval,
    error::{AnalysisRequestFailed, ApprovalError, SubmissionRejected},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Result,
    Approved,
}

/// Identifies one submission. A completion carrying an outdated ticket is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Idle,
    Loading {
        ticket: SubmissionTicket,
    },
    Result {
        result: AnalysisResult,
    },
    Approved {
        result: AnalysisResult,
        message: String,
    },
}

/// Borrowed snapshot of the session, one variant per phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionView<'a> {
    Idle,
    Loading,
    Result(&'a AnalysisResult),
    Approved {
        result: &'a AnalysisResult,
        message: &'a str,
    },
}

#[derive(Debug, Default)]
pub struct AnalysisResultStore {
    state: SessionState,
    issued_tickets: u64,
}

impl AnalysisResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Idle => Phase::Idle,
            SessionState::Loading { .. } => Phase::Loading,
            SessionState::Result { .. } => Phase::Result,
            SessionState::Approved { .. } => Phase::Approved,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Result { result } | SessionState::Approved { result, .. } => Some(result),
            SessionState::Idle | SessionState::Loading { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Approved { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        match &self.state {
            SessionState::Idle => SessionView::Idle,
            SessionState::Loading { .. } => SessionView::Loading,
            SessionState::Result { result } => SessionView::Result(result),
            SessionState::Approved { result, message } => SessionView::Approved { result, message },
        }
    }

    /// Moves Idle to Loading and hands out the ticket the response must carry.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmissionRejected> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Loading { .. } => {
                warn!("rejected overlapping analysis submission");
                return Err(SubmissionRejected::InFlight);
            }
            SessionState::Result { .. } | SessionState::Approved { .. } => {
                warn!(phase = ?self.phase(), "rejected submission while a result is on screen");
                return Err(SubmissionRejected::ResultOnScreen);
            }
        }

        self.issued_tickets += 1;
        let ticket = SubmissionTicket(self.issued_tickets);
        self.state = SessionState::Loading { ticket };
        info!(ticket = ticket.0, "analysis submission started");
        Ok(ticket)
    }

    /// Applies the outcome of the submission identified by `ticket`.
    ///
    /// Returns the stored result, `Ok(None)` if the ticket is stale, or the
    /// failure after returning to Idle. Payloads are validated here so the
    /// session never holds a result that breaks the dashboard invariants.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<AnalysisResult, AnalysisRequestFailed>,
    ) -> Result<Option<&AnalysisResult>, AnalysisRequestFailed> {
        let current = match self.state {
            SessionState::Loading { ticket } => Some(ticket),
            _ => None,
        };
        if current != Some(ticket) {
            warn!(
                ticket = ticket.0,
                phase = ?self.phase(),
                "discarding analysis outcome for a superseded submission"
            );
            return Ok(None);
        }

        let validated = outcome.and_then(|result| {
            result.validate()?;
            Ok(result)
        });
        match validated {
            Ok(result) => {
                info!(
                    ticket = ticket.0,
                    product = %result.recommended_product.id,
                    match_score = result.match_score,
                    "analysis result received"
                );
                self.state = SessionState::Result { result };
                Ok(self.result())
            }
            Err(failure) => {
                error!(
                    ticket = ticket.0,
                    cause = %failure.cause_chain(),
                    "analysis request failed; returning to idle"
                );
                self.state = SessionState::Idle;
                Err(failure)
            }
        }
    }

    /// Records the proposal confirmation. Repeated calls once approved return
    /// the existing message unchanged.
    pub fn approve(&mut self) -> Result<&str, ApprovalError> {
        let state = std::mem::take(&mut self.state);
        let (next, outcome) = match state {
            SessionState::Result { result } => match approval::confirmation_for(&result) {
                Ok(message) => {
                    info!(%message, "proposal approved");
                    (SessionState::Approved { result, message }, Ok(()))
                }
                Err(err) => (SessionState::Result { result }, Err(err)),
            },
            approved @ SessionState::Approved { .. } => (approved, Ok(())),
            other => {
                let phase = match other {
                    SessionState::Loading { .. } => Phase::Loading,
                    _ => Phase::Idle,
                };
                (other, Err(ApprovalError::NoResult(phase)))
            }
        };
        self.state = next;
        outcome?;
        self.message().ok_or(ApprovalError::NoResult(self.phase()))
    }

    /// Drops any result, message, or pending submission and returns to Idle.
    pub fn reset(&mut self) {
        let previous = self.phase();
        self.state = SessionState::Idle;
        info!(?previous, "session reset");
    }
}
