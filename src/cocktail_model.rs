//! # Cocktail and Ingredient Data Model
//!
//! This module defines the data structures shared across the recommendation
//! pipeline: ingredients from the catalog, cocktails captured from the
//! external drink database, and the scored results returned to callers.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: a catalog entry with a free-text name used as the unit
//!   of matching
//! - **Cocktail**: a drink record with parallel ingredient and measurement
//!   lists (the measurement list is the same length or shorter)
//! - **ScoredCocktail**: a cocktail augmented with match data, computed
//!   fresh for every request and never persisted
//!
//! ## Usage
//!
//! ```rust
//! use cocktails::cocktail_model::NewCocktail;
//!
//! let margarita = NewCocktail::new("Margarita", "Shake with ice and strain.")
//!     .with_ingredients(vec!["Tequila".into(), "Triple Sec".into(), "Lime Juice".into()])
//!     .with_measurements(vec!["2 oz".into(), "1 oz".into(), "1 oz".into()]);
//! assert_eq!(margarita.ingredients.len(), 3);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog ingredient available for the user to select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    /// Free-text ingredient name, matched case-insensitively
    pub name: String,
    pub description: Option<String>,
    /// Coarse grouping such as "Spirit", "Juice" or "Syrup"
    pub category: Option<String>,
    pub alcoholic: Option<bool>,
}

/// A drink record as it is stored in the repository
///
/// `ingredients` and `measurements` are parallel ordered lists; every
/// measurement slot belongs to the ingredient at the same index, and the
/// measurement list may be shorter when the source omitted trailing measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cocktail {
    pub id: i64,
    /// Identifier in the external drink database, when the record came from there
    pub api_id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub alcoholic: Option<String>,
    pub glass: Option<String>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub measurements: Vec<String>,
    /// When this record was captured from the external database
    pub cached_at: DateTime<Utc>,
}

/// A cocktail that has not been assigned a repository id yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCocktail {
    pub api_id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub alcoholic: Option<String>,
    pub glass: Option<String>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub measurements: Vec<String>,
}

impl NewCocktail {
    /// Create a cocktail with the required fields; everything else defaults to empty
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            api_id: None,
            name: name.into(),
            category: None,
            alcoholic: None,
            glass: None,
            instructions: instructions.into(),
            image_url: None,
            ingredients: Vec::new(),
            measurements: Vec::new(),
        }
    }

    pub fn with_api_id(mut self, api_id: impl Into<String>) -> Self {
        self.api_id = Some(api_id.into());
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_measurements(mut self, measurements: Vec<String>) -> Self {
        self.measurements = measurements;
        self
    }
}

/// A cocktail augmented with match data for one recommendation request
///
/// Serializes flat, so callers see the cocktail fields alongside
/// `matchScore`, `matchedIngredients` and `totalIngredients` in one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCocktail {
    #[serde(flatten)]
    pub cocktail: Cocktail,
    /// Ranking score; the overlap ratio on the server path, the cosine
    /// similarity on the engine path
    pub match_score: f64,
    /// Number of selected ingredients found in this drink
    pub matched_ingredients: usize,
    /// Total ingredient count of the drink
    pub total_ingredients: usize,
}

impl ScoredCocktail {
    pub fn id(&self) -> i64 {
        self.cocktail.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_cocktail() -> Cocktail {
        Cocktail {
            id: 7,
            api_id: Some("11007".to_string()),
            name: "Margarita".to_string(),
            category: Some("Ordinary Drink".to_string()),
            alcoholic: Some("Alcoholic".to_string()),
            glass: Some("Cocktail glass".to_string()),
            instructions: "Shake with ice and strain.".to_string(),
            image_url: None,
            ingredients: vec![
                "Tequila".to_string(),
                "Triple Sec".to_string(),
                "Lime Juice".to_string(),
            ],
            measurements: vec!["2 oz".to_string(), "1 oz".to_string()],
            cached_at: Utc::now(),
        }
    }

    #[test]
    fn test_measurements_may_be_shorter_than_ingredients() {
        let cocktail = sample_cocktail();
        assert!(cocktail.measurements.len() <= cocktail.ingredients.len());
    }

    #[test]
    fn test_scored_cocktail_serializes_flat() {
        let scored = ScoredCocktail {
            cocktail: sample_cocktail(),
            match_score: 2.0 / 3.0,
            matched_ingredients: 2,
            total_ingredients: 3,
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["name"], "Margarita");
        assert_eq!(json["matchedIngredients"], 2);
        assert_eq!(json["totalIngredients"], 3);
        assert!(json["matchScore"].as_f64().unwrap() > 0.66);
        // No nested "cocktail" object in the wire format
        assert!(json.get("cocktail").is_none());
    }

    #[test]
    fn test_new_cocktail_builder() {
        let new_cocktail = NewCocktail::new("Gin Tonic", "Build over ice.")
            .with_api_id("12345")
            .with_ingredients(vec!["Gin".to_string(), "Tonic Water".to_string()]);

        assert_eq!(new_cocktail.api_id.as_deref(), Some("12345"));
        assert_eq!(new_cocktail.ingredients.len(), 2);
        assert!(new_cocktail.measurements.is_empty());
    }
}
