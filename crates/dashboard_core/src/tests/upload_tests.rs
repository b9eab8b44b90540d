use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use shared::domain::ReasoningStatus;
use tokio::{net::TcpListener, sync::Mutex};

use super::*;
use crate::{
    error::{AnalysisFailureCause, SubmissionRejected},
    render::{render, ProposalAction, ReferencePrices, Tone, ViewBody},
    store::Phase,
};

const WEATHER_SHIELD: &str = r#"{
    "recommended_product": {
        "id": "P100",
        "name": "WeatherShield",
        "description": "Exterior emulsion",
        "price_per_liter": 320
    },
    "match_score": 100,
    "reasoning": [{"status": "pass", "msg": "VOC compliant"}],
    "financial_impact": "Saves $40k"
}"#;

#[derive(Debug, Clone)]
struct ReceivedField {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<ReceivedField>>>,
}

async fn handle_analyze(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.received.lock().await.push(ReceivedField {
            name,
            filename,
            content_type,
            bytes,
        });
    }
    (state.status, state.body.clone())
}

async fn spawn_analysis_stub(
    status: StatusCode,
    body: &str,
) -> std::io::Result<(Url, Arc<Mutex<Vec<ReceivedField>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        body: body.to_string(),
        received: received.clone(),
    };
    let app = Router::new()
        .route("/analyze", post(handle_analyze))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    let url = Url::parse(&format!("http://{addr}/analyze")).expect("stub url");
    Ok((url, received))
}

fn tender_pdf() -> UploadDocument {
    UploadDocument::new("tender.pdf", b"%PDF-1.4 viscosity 90 KU".to_vec())
}

async fn submit_expecting_failure(status: StatusCode, body: &str) -> AnalysisRequestFailed {
    let (url, _received) = spawn_analysis_stub(status, body).await.expect("spawn stub");
    let controller = UploadController::new(HttpAnalysisClient::new(url));
    let mut store = AnalysisResultStore::new();

    let err = controller
        .submit_file(&mut store, tender_pdf())
        .await
        .expect_err("must fail");
    assert_eq!(store.phase(), Phase::Idle);
    assert!(store.result().is_none());
    match err {
        UploadError::Failed(failure) => {
            assert_eq!(failure.to_string(), "Backend Error");
            failure
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn weather_shield_session_end_to_end() {
    let (url, received) = spawn_analysis_stub(StatusCode::OK, WEATHER_SHIELD)
        .await
        .expect("spawn stub");
    let controller = UploadController::new(HttpAnalysisClient::new(url));
    let mut store = AnalysisResultStore::new();
    let prices = ReferencePrices::default();

    controller
        .submit_file(&mut store, tender_pdf())
        .await
        .expect("submit");
    assert_eq!(store.phase(), Phase::Result);
    assert_eq!(
        store.result().map(|r| r.recommended_product.name.as_str()),
        Some("WeatherShield")
    );

    let ViewBody::Result(panel) = render(&store, &prices).body else {
        panic!("expected result panel");
    };
    let banner = panel.banner.expect("banner");
    assert_eq!(banner.tone, Tone::Success);
    assert_eq!(banner.text, "Saves $40k");
    assert_eq!(panel.prices.bars[0].width_percent, 64.0);
    assert_eq!(panel.compliance.len(), 1);
    assert_eq!(panel.compliance[0].status, ReasoningStatus::Pass);
    assert_eq!(panel.compliance[0].text, "VOC compliant");

    let message = store.approve().expect("approve").to_string();
    assert_eq!(message, "Proposal Generated: Bid_P100_v1.pdf");
    assert_eq!(store.phase(), Phase::Approved);
    let ViewBody::Result(panel) = render(&store, &prices).body else {
        panic!("expected result panel");
    };
    assert_eq!(panel.proposal, ProposalAction::Generated { message });

    store.reset();
    assert_eq!(store.phase(), Phase::Idle);
    assert!(store.result().is_none());
    assert!(store.message().is_none());

    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    let field = &received[0];
    assert_eq!(field.name, UPLOAD_FIELD);
    assert_eq!(field.filename.as_deref(), Some("tender.pdf"));
    assert_eq!(field.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(field.bytes, b"%PDF-1.4 viscosity 90 KU".to_vec());
}

#[tokio::test]
async fn server_error_is_a_request_failure() {
    let failure =
        submit_expecting_failure(StatusCode::INTERNAL_SERVER_ERROR, "engine crashed").await;
    assert!(matches!(failure.cause(), AnalysisFailureCause::Transport(_)));
}

#[tokio::test]
async fn non_json_body_is_a_request_failure() {
    let failure = submit_expecting_failure(StatusCode::OK, "<html>oops</html>").await;
    assert!(matches!(failure.cause(), AnalysisFailureCause::Decode(_)));
}

#[tokio::test]
async fn missing_recommended_product_is_a_request_failure() {
    let failure = submit_expecting_failure(
        StatusCode::OK,
        r#"{"match_score": 100, "reasoning": [{"status": "pass", "msg": "ok"}]}"#,
    )
    .await;
    assert!(matches!(failure.cause(), AnalysisFailureCause::Decode(_)));
}

#[tokio::test]
async fn empty_reasoning_is_a_request_failure() {
    let body = WEATHER_SHIELD.replace(
        r#"[{"status": "pass", "msg": "VOC compliant"}]"#,
        "[]",
    );
    let failure = submit_expecting_failure(StatusCode::OK, &body).await;
    assert!(matches!(failure.cause(), AnalysisFailureCause::Invalid(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_request_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/analyze")).expect("url");
    let controller = UploadController::new(HttpAnalysisClient::new(url));
    let mut store = AnalysisResultStore::new();
    let err = controller
        .submit_file(&mut store, tender_pdf())
        .await
        .expect_err("must fail");

    assert_eq!(store.phase(), Phase::Idle);
    let failure = match err {
        UploadError::Failed(failure) => failure,
        other => panic!("unexpected error: {other:?}"),
    };
    assert!(matches!(failure.cause(), AnalysisFailureCause::Transport(_)));
    // The transport error's own message stops at the request; the refusal
    // only shows up further down the chain.
    assert!(
        failure.cause_chain().to_lowercase().contains("refused"),
        "chain: {}",
        failure.cause_chain()
    );
}

#[tokio::test]
async fn rejected_document_is_shown_but_not_approvable() {
    let body = r#"{
        "status": "rejected",
        "match_score": 0,
        "recommended_product": {
            "name": "Invalid Document",
            "description": "This file does not appear to be a valid technical RFP.",
            "price_per_liter": 0
        },
        "financial_impact": "Analysis Aborted",
        "reasoning": [{"status": "fail", "msg": "Document lacks required technical keywords."}]
    }"#;
    let (url, _received) = spawn_analysis_stub(StatusCode::OK, body)
        .await
        .expect("spawn stub");
    let controller = UploadController::new(HttpAnalysisClient::new(url));
    let mut store = AnalysisResultStore::new();

    controller
        .submit_file(&mut store, tender_pdf())
        .await
        .expect("rejected analyses still render");
    assert_eq!(store.phase(), Phase::Result);
    assert!(store.approve().is_err());

    let ViewBody::Result(panel) = render(&store, &ReferencePrices::default()).body else {
        panic!("expected result panel");
    };
    assert_eq!(panel.banner.map(|b| b.tone), Some(Tone::Warning));
    assert!(matches!(panel.proposal, ProposalAction::Unavailable { .. }));
}

struct CannedClient {
    calls: Arc<Mutex<u32>>,
}

#[async_trait]
impl AnalysisClient for CannedClient {
    async fn analyze(
        &self,
        _document: UploadDocument,
    ) -> Result<AnalysisResult, AnalysisRequestFailed> {
        *self.calls.lock().await += 1;
        Ok(serde_json::from_str(WEATHER_SHIELD)?)
    }
}

#[tokio::test]
async fn submission_while_loading_is_rejected_without_a_request() {
    let calls = Arc::new(Mutex::new(0));
    let controller = UploadController::new(CannedClient {
        calls: calls.clone(),
    });
    let mut store = AnalysisResultStore::new();
    store.begin_submission().expect("first submission");

    let err = controller
        .submit_file(&mut store, tender_pdf())
        .await
        .expect_err("overlap must be rejected");
    assert!(matches!(
        err,
        UploadError::Rejected(SubmissionRejected::InFlight)
    ));
    assert_eq!(*calls.lock().await, 0);
    assert_eq!(store.phase(), Phase::Loading);
}

#[tokio::test]
async fn resubmission_after_failure_succeeds() {
    let calls = Arc::new(Mutex::new(0));
    let controller = UploadController::new(CannedClient {
        calls: calls.clone(),
    });
    let mut store = AnalysisResultStore::new();

    let ticket = store.begin_submission().expect("begin");
    store
        .complete_submission(ticket, Err(AnalysisRequestFailed::service("offline")))
        .expect_err("first attempt fails");
    assert_eq!(store.phase(), Phase::Idle);

    controller
        .submit_file(&mut store, tender_pdf())
        .await
        .expect("retry by operator");
    assert_eq!(store.phase(), Phase::Result);
    assert_eq!(*calls.lock().await, 1);
}

#[tokio::test]
async fn document_from_path_guesses_mime_type() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tender.txt");
    tokio::fs::write(&path, b"epoxy coating, salt spray 500 hours")
        .await
        .expect("write");

    let document = UploadDocument::from_path(&path).await.expect("read");
    assert_eq!(document.filename, "tender.txt");
    assert_eq!(document.mime_type.as_deref(), Some("text/plain"));
    assert_eq!(document.bytes, b"epoxy coating, salt spray 500 hours".to_vec());
}
