use serde::{Deserialize, Serialize};

use crate::{
    domain::{AnalysisStatus, ProductId, ReasoningStatus},
    error::ValidationError,
};

pub const MAX_MATCH_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_per_liter: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningEntry {
    pub status: ReasoningStatus,
    pub msg: String,
}

impl ReasoningEntry {
    pub fn pass(msg: impl Into<String>) -> Self {
        Self {
            status: ReasoningStatus::Pass,
            msg: msg.into(),
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            status: ReasoningStatus::Fail,
            msg: msg.into(),
        }
    }
}

/// Body returned by the analysis service for one uploaded tender document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AnalysisStatus>,
    pub recommended_product: RecommendedProduct,
    pub match_score: u8,
    pub reasoning: Vec<ReasoningEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_impact: Option<String>,
}

impl AnalysisResult {
    /// Checks the invariants the dashboard relies on when rendering.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.match_score > MAX_MATCH_SCORE {
            return Err(ValidationError::MatchScoreOutOfRange(self.match_score));
        }
        if self.reasoning.is_empty() {
            return Err(ValidationError::EmptyReasoning);
        }
        let price = self.recommended_product.price_per_liter;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(price));
        }
        if self.recommended_product.id.is_empty() && !self.is_rejected() {
            return Err(ValidationError::MissingProductId);
        }
        Ok(())
    }

    pub fn is_rejected(&self) -> bool {
        self.status == Some(AnalysisStatus::Rejected)
    }

    /// Only a perfect score counts as optimal; 99 is still a warning.
    pub fn is_optimal_match(&self) -> bool {
        self.match_score == MAX_MATCH_SCORE
    }

    /// Impact text, treating a blank string the same as a missing one.
    pub fn impact_text(&self) -> Option<&str> {
        self.financial_impact
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}
