//! Proposal approval: artifact naming and the confirmation message.
//!
//! No document is generated; approval only names the artifact a proposal
//! generator would produce.

use shared::protocol::{AnalysisResult, RecommendedProduct};

use crate::error::ApprovalError;

pub const CONFIRMATION_PREFIX: &str = "Proposal Generated: ";

/// Deterministic artifact name; depends on nothing but the product id.
pub fn artifact_identifier(product: &RecommendedProduct) -> String {
    format!("Bid_{}_v1.pdf", product.id)
}

pub fn confirmation_message(identifier: &str) -> String {
    format!("{CONFIRMATION_PREFIX}{identifier}")
}

/// Whether the approval action makes sense for this result.
pub fn check_approvable(result: &AnalysisResult) -> Result<(), ApprovalError> {
    if result.is_rejected() {
        return Err(ApprovalError::AnalysisRejected);
    }
    if result.recommended_product.id.is_empty() {
        return Err(ApprovalError::MissingProductId);
    }
    Ok(())
}

pub(crate) fn confirmation_for(result: &AnalysisResult) -> Result<String, ApprovalError> {
    check_approvable(result)?;
    Ok(confirmation_message(&artifact_identifier(
        &result.recommended_product,
    )))
}
