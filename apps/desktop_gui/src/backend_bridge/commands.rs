//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

use dashboard_core::SubmissionTicket;

pub enum BackendCommand {
    Analyze {
        ticket: SubmissionTicket,
        path: PathBuf,
    },
}
