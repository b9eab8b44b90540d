//! Applies worker events to the session.

use dashboard_core::{AnalysisResultStore, Phase};

use crate::controller::events::{BlockingNotice, UiEvent};

pub fn apply_ui_event(
    store: &mut AnalysisResultStore,
    event: UiEvent,
    status: &mut String,
) -> Option<BlockingNotice> {
    match event {
        UiEvent::WorkerReady => {
            *status = "Analysis worker ready".to_string();
            None
        }
        UiEvent::WorkerUnavailable(reason) => {
            if store.phase() == Phase::Loading {
                store.reset();
            }
            *status = reason.clone();
            Some(BlockingNotice::worker_unavailable(reason))
        }
        UiEvent::AnalysisFinished { ticket, outcome } => {
            match store.complete_submission(ticket, outcome) {
                Ok(Some(result)) => {
                    *status = format!("Analysis complete: {}", result.recommended_product.name);
                    None
                }
                Ok(None) => None,
                Err(failure) => {
                    *status = "Analysis failed; upload the document again".to_string();
                    Some(BlockingNotice::analysis_failed(&failure))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dashboard_core::AnalysisRequestFailed;
    use shared::{
        domain::ProductId,
        protocol::{AnalysisResult, ReasoningEntry, RecommendedProduct},
    };

    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            status: None,
            recommended_product: RecommendedProduct {
                id: ProductId::new("P100"),
                name: "WeatherShield".to_string(),
                description: "Exterior emulsion".to_string(),
                price_per_liter: 320.0,
            },
            match_score: 100,
            reasoning: vec![ReasoningEntry::pass("VOC compliant")],
            financial_impact: Some("Saves $40k".to_string()),
        }
    }

    #[test]
    fn finished_analysis_enters_result_phase() {
        let mut store = AnalysisResultStore::new();
        let ticket = store.begin_submission().expect("begin");
        let mut status = String::new();

        let notice = apply_ui_event(
            &mut store,
            UiEvent::AnalysisFinished {
                ticket,
                outcome: Ok(sample()),
            },
            &mut status,
        );
        assert!(notice.is_none());
        assert_eq!(store.phase(), Phase::Result);
        assert_eq!(status, "Analysis complete: WeatherShield");
    }

    #[test]
    fn failed_analysis_raises_blocking_notice() {
        let mut store = AnalysisResultStore::new();
        let ticket = store.begin_submission().expect("begin");
        let mut status = String::new();

        let notice = apply_ui_event(
            &mut store,
            UiEvent::AnalysisFinished {
                ticket,
                outcome: Err(AnalysisRequestFailed::service("engine down")),
            },
            &mut status,
        )
        .expect("notice");
        assert_eq!(notice.message, "Backend Error");
        assert_eq!(store.phase(), Phase::Idle);
    }

    #[test]
    fn late_result_after_reset_is_ignored() {
        let mut store = AnalysisResultStore::new();
        let ticket = store.begin_submission().expect("begin");
        store.reset();
        let mut status = "idle".to_string();

        let notice = apply_ui_event(
            &mut store,
            UiEvent::AnalysisFinished {
                ticket,
                outcome: Err(AnalysisRequestFailed::service("late")),
            },
            &mut status,
        );
        assert!(notice.is_none());
        assert_eq!(store.phase(), Phase::Idle);
        assert_eq!(status, "idle");
    }

    #[test]
    fn worker_loss_unblocks_loading_session() {
        let mut store = AnalysisResultStore::new();
        store.begin_submission().expect("begin");
        let mut status = String::new();

        let notice = apply_ui_event(
            &mut store,
            UiEvent::WorkerUnavailable("runtime failed".to_string()),
            &mut status,
        )
        .expect("notice");
        assert_eq!(notice.message, "runtime failed");
        assert_eq!(store.phase(), Phase::Idle);
    }
}
