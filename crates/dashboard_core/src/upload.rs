//! Document upload: the analysis service client and the controller that
//! drives a session through one submission.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::protocol::AnalysisResult;
use tracing::info;
use url::Url;

use crate::{
    error::{AnalysisRequestFailed, UploadError},
    store::AnalysisResultStore,
};

/// Multipart field the analysis service reads the document from.
pub const UPLOAD_FIELD: &str = "file";

/// One tender document, forwarded to the service byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDocument {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            filename,
            mime_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self::new(filename, bytes))
    }
}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, document: UploadDocument)
        -> Result<AnalysisResult, AnalysisRequestFailed>;
}

/// Posts documents to the analysis endpoint as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: Client,
    analysis_url: Url,
}

impl HttpAnalysisClient {
    pub fn new(analysis_url: Url) -> Self {
        Self {
            http: Client::new(),
            analysis_url,
        }
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(
        &self,
        document: UploadDocument,
    ) -> Result<AnalysisResult, AnalysisRequestFailed> {
        let UploadDocument {
            filename,
            mime_type,
            bytes,
        } = document;
        info!(
            url = %self.analysis_url,
            %filename,
            size_bytes = bytes.len(),
            "submitting document for analysis"
        );

        let mut part = Part::bytes(bytes).file_name(filename);
        if let Some(mime_type) = mime_type {
            part = part.mime_str(&mime_type)?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let body = self
            .http
            .post(self.analysis_url.clone())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

pub struct UploadController<A> {
    client: A,
}

impl<A: AnalysisClient> UploadController<A> {
    pub fn new(client: A) -> Self {
        Self { client }
    }

    /// Calls the service without touching any session; the GUI worker uses
    /// this and hands the outcome back to the session it belongs to.
    pub async fn analyze(
        &self,
        document: UploadDocument,
    ) -> Result<AnalysisResult, AnalysisRequestFailed> {
        self.client.analyze(document).await
    }

    /// Runs one full submission against `store`: Idle to Loading, then Result
    /// on success or back to Idle on failure. The stored result is read back
    /// through `store`.
    pub async fn submit_file(
        &self,
        store: &mut AnalysisResultStore,
        document: UploadDocument,
    ) -> Result<(), UploadError> {
        let ticket = store.begin_submission()?;
        let outcome = self.analyze(document).await;
        // `store` stays borrowed across the request, so `ticket` is still current.
        store.complete_submission(ticket, outcome)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
