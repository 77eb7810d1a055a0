//! # Vector Recommendation Engine Module
//!
//! This module implements the vocabulary-indexed recommendation engine: each
//! drink becomes a binary vector over a fixed ingredient vocabulary, the
//! user's selection becomes another, and candidates are ranked by how many
//! positions both vectors share and by the cosine similarity of the vectors.
//!
//! ## Vectorization asymmetry
//!
//! Drink vectors and selection vectors are deliberately built with
//! different rules:
//!
//! - a drink vector sets position `i` when any drink ingredient *contains*
//!   the vocabulary term at `i` (case-insensitive substring), so "Fresh
//!   Lime Juice" lights up a "Lime Juice" vocabulary slot;
//! - a selection vector sets position `i` only on *exact* case-insensitive
//!   equality with the vocabulary term.
//!
//! The asymmetry means a selection of "Lime" does not reach a "Lime Juice"
//! slot even though a drink listing "Lime Juice" would. It is kept as-is
//! rather than unified, since unifying it changes user-visible ordering.

use log::debug;

use crate::cocktail_model::{Cocktail, ScoredCocktail};
use crate::match_scoring::normalize_selection;
use crate::recommend_errors::RecommendError;

/// Default number of recommendations returned by the engine
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Recommendation engine over a fixed ingredient vocabulary
///
/// Built once from the known cocktails and the ingredient catalog; drink
/// vectors are computed at construction and reused for every request. The
/// engine holds no mutable state afterwards, so independent requests can
/// share it freely.
pub struct VectorEngine {
    /// Vocabulary terms, lowered, deduplicated, in stable first-seen order
    vocabulary: Vec<String>,
    cocktails: Vec<Cocktail>,
    /// One binary vector per cocktail, parallel to `cocktails`
    vectors: Vec<Vec<u8>>,
}

impl VectorEngine {
    /// Build the engine from candidate drinks and the known ingredient names
    ///
    /// Vocabulary entries are lowercased and deduplicated while keeping the
    /// order of first appearance, so vector positions are reproducible.
    pub fn new(cocktails: Vec<Cocktail>, ingredient_names: &[String]) -> Self {
        let mut seen = std::collections::HashSet::new();
        let vocabulary: Vec<String> = ingredient_names
            .iter()
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();

        let vectors = cocktails
            .iter()
            .map(|cocktail| drink_vector(&vocabulary, &cocktail.ingredients))
            .collect();

        debug!(
            "Vector engine ready: {} cocktails over a vocabulary of {} terms",
            cocktails.len(),
            vocabulary.len()
        );

        Self {
            vocabulary,
            cocktails,
            vectors,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Build the binary vector for a user selection (exact-equality rule)
    pub fn selection_vector(&self, selection: &[String]) -> Vec<u8> {
        self.vocabulary
            .iter()
            .map(|term| {
                let hit = selection.iter().any(|name| name == term);
                hit as u8
            })
            .collect()
    }

    /// Rank the engine's cocktails against a raw user selection
    ///
    /// Signals `EmptySelection` when no usable ingredient remains after
    /// normalization. Ranking is by descending shared-position count, then
    /// descending cosine similarity, then ascending drink id so equal
    /// scores stay reproducible. At most `limit` entries are returned.
    pub fn recommend(
        &self,
        selection: &[String],
        limit: usize,
    ) -> Result<Vec<ScoredCocktail>, RecommendError> {
        let normalized = normalize_selection(selection);
        if normalized.is_empty() {
            return Err(RecommendError::EmptySelection);
        }

        let query = self.selection_vector(&normalized);

        let mut scored: Vec<ScoredCocktail> = self
            .cocktails
            .iter()
            .zip(self.vectors.iter())
            .map(|(cocktail, vector)| ScoredCocktail {
                cocktail: cocktail.clone(),
                match_score: cosine_similarity(&query, vector),
                matched_ingredients: count_matches(&query, vector),
                total_ingredients: cocktail.ingredients.len(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.matched_ingredients
                .cmp(&a.matched_ingredients)
                .then_with(|| {
                    b.match_score
                        .partial_cmp(&a.match_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.id().cmp(&b.id()))
        });
        scored.truncate(limit);

        Ok(scored)
    }
}

/// Build the binary vector for one drink (substring-containment rule)
///
/// Position `i` is set when any drink ingredient contains the vocabulary
/// term at `i` as a case-insensitive substring. Vocabulary terms are
/// expected already lowercased, as [`VectorEngine`] stores them.
pub fn drink_vector(vocabulary: &[String], drink_ingredients: &[String]) -> Vec<u8> {
    let lowered: Vec<String> = drink_ingredients
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();

    vocabulary
        .iter()
        .map(|term| {
            let hit = lowered.iter().any(|ingredient| ingredient.contains(term));
            hit as u8
        })
        .collect()
}

/// Cosine similarity between two binary vectors
///
/// Defined as 0.0 when either vector is all zeros, so a drink or selection
/// with no vocabulary hits never produces a division by zero.
pub fn cosine_similarity(a: &[u8], b: &[u8]) -> f64 {
    let a_magnitude = (a.iter().map(|&v| (v as f64) * (v as f64)).sum::<f64>()).sqrt();
    let b_magnitude = (b.iter().map(|&v| (v as f64) * (v as f64)).sum::<f64>()).sqrt();

    if a_magnitude == 0.0 || b_magnitude == 0.0 {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64) * (y as f64))
        .sum();

    dot / (a_magnitude * b_magnitude)
}

/// Number of positions set in both vectors
pub fn count_matches(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b.iter())
        .filter(|&(&x, &y)| x == 1 && y == 1)
        .count()
}
