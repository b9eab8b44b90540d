use thiserror::Error;

/// Reasons an analysis payload is refused before it reaches the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("match score {0} is outside 0..=100")]
    MatchScoreOutOfRange(u8),
    #[error("reasoning trace is empty")]
    EmptyReasoning,
    #[error("price per liter {0} is not a finite non-negative number")]
    InvalidPrice(f64),
    #[error("recommended product has no id")]
    MissingProductId,
}
