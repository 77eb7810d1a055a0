//! # Ingredient Match Scoring Module
//!
//! This module computes how well a candidate drink matches the ingredients a
//! user has on hand. Matching is purely lexical: ingredient names are
//! free-text strings compared case-insensitively, with no canonical id
//! system behind them.
//!
//! ## Features
//!
//! - Boundary normalization of untrusted ingredient input (trim, collapse
//!   whitespace, lowercase, drop empties and duplicates)
//! - Overlap scoring: how many selected ingredients appear in a drink, and
//!   that count normalized by the drink's total ingredient count
//! - A configurable match rule (substring containment or exact equality)
//!   and ranking key (ratio or count), so both historical behaviors of the
//!   scorer live behind one interface
//! - Deterministic ranking: equal scores fall back to ascending drink id
//!
//! ## Scoring rules
//!
//! Substring matching is directional: a selected ingredient matches when a
//! drink ingredient string *contains* it, never the reverse. "Lime Juice"
//! in a drink matches a selection of "lime juice" and of "lime", but a
//! drink listing plain "Lime" does not match a selection of "Lime Juice".
//!
//! A drink with an empty ingredient list scores a ratio of 0.0 rather than
//! dividing by zero; the candidate stays in the result set.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cocktail_model::{Cocktail, ScoredCocktail};
use crate::recommend_errors::RecommendError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Whitespace pattern should be valid");
}

/// How a selected ingredient is tested against a drink's ingredient strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Drink ingredient contains the selected name as a case-insensitive substring
    Substring,
    /// Drink ingredient equals the selected name case-insensitively
    Exact,
}

impl MatchRule {
    /// Test one selected ingredient (already normalized) against one drink ingredient
    pub fn matches(&self, selected: &str, drink_ingredient: &str) -> bool {
        let candidate = drink_ingredient.trim().to_lowercase();
        match self {
            MatchRule::Substring => candidate.contains(selected),
            MatchRule::Exact => candidate == selected,
        }
    }
}

/// Primary ordering key for ranked results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    /// Descending match ratio (match count / total ingredients)
    Ratio,
    /// Descending match count
    Count,
}

/// Scorer configuration combining a match rule and a ranking key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub rule: MatchRule,
    pub rank_key: RankKey,
}

impl MatchConfig {
    /// The historical request-handler behavior: substring matching ranked by ratio
    pub fn server() -> Self {
        Self {
            rule: MatchRule::Substring,
            rank_key: RankKey::Ratio,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::server()
    }
}

/// Overlap between a selection and one drink's ingredient list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub match_count: usize,
    pub match_ratio: f64,
}

/// Normalize one untrusted ingredient name: trim, collapse inner whitespace,
/// lowercase
pub fn normalize_ingredient(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").to_lowercase()
}

/// Normalize a user selection into a deduplicated list of usable names
///
/// Empty entries are dropped and duplicates are inert (set semantics), so
/// `["Vodka", " vodka ", ""]` normalizes to `["vodka"]`. Order of first
/// appearance is preserved.
pub fn normalize_selection(selection: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    selection
        .iter()
        .map(|raw| normalize_ingredient(raw))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

/// Score one drink against a normalized selection
///
/// Counts how many selected ingredients are found in the drink under the
/// given rule. The ratio is the count divided by the drink's total
/// ingredient count; a drink with no ingredients gets a ratio of 0.0.
pub fn score_overlap(selection: &[String], drink_ingredients: &[String], rule: MatchRule) -> Overlap {
    let match_count = selection
        .iter()
        .filter(|selected| {
            drink_ingredients
                .iter()
                .any(|ingredient| rule.matches(selected, ingredient))
        })
        .count();

    let match_ratio = if drink_ingredients.is_empty() {
        0.0
    } else {
        match_count as f64 / drink_ingredients.len() as f64
    };

    Overlap {
        match_count,
        match_ratio,
    }
}

/// Score a batch of candidate drinks against a raw user selection
///
/// Normalizes the selection at the boundary and signals `EmptySelection`
/// when nothing usable remains, so callers can tell "nothing selected"
/// apart from "nothing matched". The returned list is ranked by the
/// configured key, ties broken by ascending drink id.
pub fn score_candidates(
    selection: &[String],
    candidates: Vec<Cocktail>,
    config: MatchConfig,
) -> Result<Vec<ScoredCocktail>, RecommendError> {
    let normalized = normalize_selection(selection);
    if normalized.is_empty() {
        return Err(RecommendError::EmptySelection);
    }

    debug!(
        "Scoring {} candidates against {} selected ingredients",
        candidates.len(),
        normalized.len()
    );

    let mut scored: Vec<ScoredCocktail> = candidates
        .into_iter()
        .map(|cocktail| {
            let overlap = score_overlap(&normalized, &cocktail.ingredients, config.rule);
            let total_ingredients = cocktail.ingredients.len();
            ScoredCocktail {
                cocktail,
                match_score: overlap.match_ratio,
                matched_ingredients: overlap.match_count,
                total_ingredients,
            }
        })
        .collect();

    rank_candidates(&mut scored, config);
    Ok(scored)
}

/// Rank scored candidates in place: primary key descending, drink id ascending
/// on ties
///
/// `match_score` is a ratio in [0, 1] by construction, never NaN, so the
/// float comparison below is total in practice.
pub fn rank_candidates(scored: &mut [ScoredCocktail], config: MatchConfig) {
    scored.sort_by(|a, b| {
        let primary = match config.rank_key {
            RankKey::Ratio => b
                .match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal),
            RankKey::Count => b.matched_ingredients.cmp(&a.matched_ingredients),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    });
}
