//! Error types surfaced by the dashboard session.

use std::{error::Error as StdError, path::PathBuf};

use shared::error::ValidationError;
use thiserror::Error;

use crate::store::Phase;

/// Text shown to the operator for every analysis failure.
pub const ANALYSIS_FAILURE_NOTICE: &str = "Backend Error";

/// Underlying reason an analysis request failed. Only logged; the operator
/// sees [`ANALYSIS_FAILURE_NOTICE`] regardless of the variant.
#[derive(Debug, Error)]
pub enum AnalysisFailureCause {
    #[error("could not read document: {0}")]
    Document(#[from] std::io::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed analysis payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid analysis result: {0}")]
    Invalid(#[from] ValidationError),
    #[error("analysis service error: {0}")]
    Service(String),
}

#[derive(Debug, Error)]
#[error("Backend Error")]
pub struct AnalysisRequestFailed {
    #[source]
    cause: AnalysisFailureCause,
}

impl AnalysisRequestFailed {
    pub fn service(message: impl Into<String>) -> Self {
        Self {
            cause: AnalysisFailureCause::Service(message.into()),
        }
    }

    pub fn cause(&self) -> &AnalysisFailureCause {
        &self.cause
    }

    /// The cause and every error beneath it, for logs.
    pub fn cause_chain(&self) -> String {
        error_chain(&self.cause)
    }

    pub fn notice(&self) -> &'static str {
        ANALYSIS_FAILURE_NOTICE
    }
}

impl From<AnalysisFailureCause> for AnalysisRequestFailed {
    fn from(cause: AnalysisFailureCause) -> Self {
        Self { cause }
    }
}

impl From<std::io::Error> for AnalysisRequestFailed {
    fn from(value: std::io::Error) -> Self {
        AnalysisFailureCause::from(value).into()
    }
}

impl From<reqwest::Error> for AnalysisRequestFailed {
    fn from(value: reqwest::Error) -> Self {
        AnalysisFailureCause::from(value).into()
    }
}

impl From<serde_json::Error> for AnalysisRequestFailed {
    fn from(value: serde_json::Error) -> Self {
        AnalysisFailureCause::from(value).into()
    }
}

impl From<ValidationError> for AnalysisRequestFailed {
    fn from(value: ValidationError) -> Self {
        AnalysisFailureCause::from(value).into()
    }
}

/// Joins `err` and its `source()` chain with `": "`. A level whose text the
/// line already ends with is skipped, since wrappers often repeat their source.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(level) = source {
        let text = level.to_string();
        if !chain.ends_with(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = level.source();
    }
    chain
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionRejected {
    #[error("an analysis request is already in flight")]
    InFlight,
    #[error("a result is on screen; reset the session before uploading another document")]
    ResultOnScreen,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Rejected(#[from] SubmissionRejected),
    #[error(transparent)]
    Failed(#[from] AnalysisRequestFailed),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    #[error("no analysis result to approve (phase {0:?})")]
    NoResult(Phase),
    #[error("the analysis rejected this document; there is nothing to propose")]
    AnalysisRejected,
    #[error("the recommended product has no id")]
    MissingProductId,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid analysis url '{value}': {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("invalid value '{value}' for {key}: expected a non-negative number")]
    InvalidPrice { key: &'static str, value: String },
}
