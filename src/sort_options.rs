//! # Result Sort Options Module
//!
//! Secondary, presentation-level orderings applied to an already-scored
//! result list. All three are stable sorts, so entries with equal keys keep
//! their relative order from the ranked input.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::cocktail_model::ScoredCocktail;

/// How a scored result list is re-ordered for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Descending match score
    Relevance,
    /// Ascending drink id. There is no popularity data; the id is used as
    /// a proxy (lower id = more popular).
    Popularity,
    /// Ascending ingredient count (fewer ingredients = easier to make)
    Easiest,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortOption::Relevance),
            "popularity" => Ok(SortOption::Popularity),
            "easiest" => Ok(SortOption::Easiest),
            other => Err(format!("Unknown sort option: {other}")),
        }
    }
}

/// Re-order a scored list in place according to the sort option
pub fn apply_sort(results: &mut [ScoredCocktail], option: SortOption) {
    match option {
        SortOption::Relevance => results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        }),
        SortOption::Popularity => results.sort_by_key(|entry| entry.id()),
        SortOption::Easiest => results.sort_by_key(|entry| entry.total_ingredients),
    }
}
