//! # Recommendation Error Types Module
//!
//! This module defines the error types used throughout the recommendation
//! pipeline. Scoring itself never fails; these errors cover the conditions
//! a caller must be able to distinguish, most importantly an empty
//! ingredient selection versus an empty result list.

/// Errors surfaced by the recommendation pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// The user selection contained no usable ingredient after trimming.
    /// Distinct from "nothing matched" so callers can prompt for input.
    EmptySelection,
    /// The external drink database was unreachable or returned an
    /// unusable payload after retries
    Provider(String),
    /// A lookup that must produce a drink found none
    NotFound(String),
}

impl std::fmt::Display for RecommendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendError::EmptySelection => {
                write!(f, "No ingredients selected")
            }
            RecommendError::Provider(msg) => write!(f, "Drink database error: {msg}"),
            RecommendError::NotFound(msg) => write!(f, "No drink found: {msg}"),
        }
    }
}

impl std::error::Error for RecommendError {}

impl From<anyhow::Error> for RecommendError {
    fn from(err: anyhow::Error) -> Self {
        RecommendError::Provider(err.to_string())
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        RecommendError::Provider(err.to_string())
    }
}
