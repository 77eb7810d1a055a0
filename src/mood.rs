//! # Mood Quiz Module
//!
//! Maps the mood-quiz answers to drink categories of the external database
//! and picks a random drink from the mapped category, falling back to a
//! fully random drink when the category turns up nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::cocktail_api::CocktailDbClient;
use crate::cocktail_model::Cocktail;
use crate::recommend_errors::RecommendError;
use crate::storage::{find_or_insert, CocktailRepository};

/// A mood the quiz can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMood {
    Cheerful,
    Relaxed,
    Adventurous,
    Sophisticated,
}

impl GameMood {
    /// The external drink category this mood maps to
    pub fn category(&self) -> &'static str {
        match self {
            GameMood::Cheerful => "Cocktail",
            GameMood::Relaxed => "Ordinary Drink",
            GameMood::Adventurous => "Shot",
            GameMood::Sophisticated => "Coffee / Tea",
        }
    }
}

impl FromStr for GameMood {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "cheerful" => Ok(GameMood::Cheerful),
            "relaxed" => Ok(GameMood::Relaxed),
            "adventurous" => Ok(GameMood::Adventurous),
            "sophisticated" => Ok(GameMood::Sophisticated),
            other => Err(format!("Unknown mood: {other}")),
        }
    }
}

/// Recommend one drink for a mood
///
/// A recognized mood picks a random drink from its category; an unknown
/// mood, an empty category, or a failed category lookup all degrade to a
/// fully random drink. The returned drink is cached in the repository.
pub async fn recommend_for_mood<R: CocktailRepository + ?Sized>(
    client: &CocktailDbClient,
    repository: &mut R,
    mood: Option<GameMood>,
) -> Result<Cocktail, RecommendError> {
    if let Some(mood) = mood {
        match client.filter_by_category(mood.category()).await {
            Ok(refs) if !refs.is_empty() => {
                let pick = rand::thread_rng().gen_range(0..refs.len());
                let chosen = refs[pick].clone();
                debug!(mood = ?mood, drink = %chosen.name, "Picked drink from mood category");

                if let Some(drink) = client.lookup(&chosen.api_id).await? {
                    return Ok(find_or_insert(repository, drink));
                }
                warn!(api_id = %chosen.api_id, "Category drink had no details, falling back to random");
            }
            Ok(_) => {
                debug!(mood = ?mood, "Mood category is empty, falling back to random");
            }
            Err(err) => {
                warn!(mood = ?mood, error = %err, "Category lookup failed, falling back to random");
            }
        }
    }

    let drink = client.random().await?;
    Ok(find_or_insert(repository, drink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_category_mapping() {
        assert_eq!(GameMood::Cheerful.category(), "Cocktail");
        assert_eq!(GameMood::Relaxed.category(), "Ordinary Drink");
        assert_eq!(GameMood::Adventurous.category(), "Shot");
        assert_eq!(GameMood::Sophisticated.category(), "Coffee / Tea");
    }

    #[test]
    fn test_mood_from_str() {
        assert_eq!("cheerful".parse::<GameMood>(), Ok(GameMood::Cheerful));
        assert_eq!(" Sophisticated ".parse::<GameMood>(), Ok(GameMood::Sophisticated));
        assert!("grumpy".parse::<GameMood>().is_err());
    }
}
