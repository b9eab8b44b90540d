//! Client-side core of the tender analysis dashboard: the session phase
//! machine, the analysis service client, and the pure view projection.

pub mod approval;
pub mod config;
pub mod error;
pub mod render;
pub mod scale;
pub mod store;
pub mod upload;

pub use config::{load_settings, Settings};
pub use error::{
    AnalysisRequestFailed, ApprovalError, SettingsError, SubmissionRejected, UploadError,
};
pub use render::{render, DashboardView, ReferencePrices};
pub use store::{AnalysisResultStore, Phase, SessionView, SubmissionTicket};
pub use upload::{
    AnalysisClient, HttpAnalysisClient, UploadController, UploadDocument, UPLOAD_FIELD,
};
