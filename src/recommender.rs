//! # Recommendation Pipeline Module
//!
//! The request-level flow behind ingredient recommendations: fan out one
//! drink lookup per selected ingredient, merge and deduplicate the
//! candidates, pull full drink details through the repository cache, then
//! hand the batch to the pure scorer.
//!
//! Lookups are best effort. A failed per-ingredient filter contributes an
//! empty candidate set, and a failed detail fetch drops only that drink;
//! neither aborts the request. The worst outcome is a shorter result list.

use std::collections::HashSet;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cocktail_api::{CocktailDbClient, DrinkRef};
use crate::cocktail_model::{Cocktail, ScoredCocktail};
use crate::match_scoring::{normalize_selection, score_candidates, MatchConfig};
use crate::recommend_errors::RecommendError;
use crate::storage::{find_or_insert, CocktailRepository};

/// Recommend drinks for a raw user selection
///
/// Signals `EmptySelection` when nothing usable remains after trimming.
/// Returns the scored candidates ranked by the configured key.
pub async fn recommend<R: CocktailRepository + ?Sized>(
    client: &CocktailDbClient,
    repository: &mut R,
    selection: &[String],
    config: MatchConfig,
) -> Result<Vec<ScoredCocktail>, RecommendError> {
    let available = normalize_selection(selection);
    if available.is_empty() {
        return Err(RecommendError::EmptySelection);
    }

    let refs = collect_candidate_refs(client, &available).await;
    let candidates = fetch_candidates(client, repository, dedup_refs(refs)).await;

    info!(
        selected = available.len(),
        candidates = candidates.len(),
        "Scoring recommendation candidates"
    );

    score_candidates(&available, candidates, config)
}

/// Fan out one ingredient-filter lookup per selected ingredient
///
/// Results come back in selection order regardless of completion order, so
/// the downstream deduplication is reproducible. A failed lookup degrades
/// to an empty list for that ingredient.
async fn collect_candidate_refs(client: &CocktailDbClient, available: &[String]) -> Vec<DrinkRef> {
    let mut lookups = JoinSet::new();
    for (index, name) in available.iter().enumerate() {
        let client = client.clone();
        let name = name.clone();
        lookups.spawn(async move {
            let refs = match client.filter_by_ingredient(&name).await {
                Ok(refs) => refs,
                Err(err) => {
                    warn!(ingredient = %name, error = %err, "Ingredient lookup failed, dropping it");
                    Vec::new()
                }
            };
            (index, refs)
        });
    }

    let mut per_ingredient: Vec<Vec<DrinkRef>> = vec![Vec::new(); available.len()];
    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((index, refs)) => per_ingredient[index] = refs,
            Err(err) => warn!(error = %err, "Ingredient lookup task failed"),
        }
    }

    per_ingredient.into_iter().flatten().collect()
}

/// Search drinks by name and cache every hit in the repository
pub async fn search_and_cache<R: CocktailRepository + ?Sized>(
    client: &CocktailDbClient,
    repository: &mut R,
    query: &str,
) -> Result<Vec<Cocktail>, RecommendError> {
    let hits = client.search_by_name(query).await?;
    info!(query, hits = hits.len(), "Name search against the drink database");

    let mut cocktails = Vec::with_capacity(hits.len());
    for drink in hits {
        cocktails.push(find_or_insert(repository, drink));
    }
    Ok(cocktails)
}

/// Deduplicate drink references by external id, keeping first-seen order
pub fn dedup_refs(refs: Vec<DrinkRef>) -> Vec<DrinkRef> {
    let mut seen = HashSet::new();
    refs.into_iter()
        .filter(|drink_ref| seen.insert(drink_ref.api_id.clone()))
        .collect()
}

/// Resolve references into full drink records through the repository cache
///
/// Already-cached drinks are reused; the rest are fetched in parallel and
/// inserted. Drinks whose detail fetch fails or comes back empty are
/// dropped from the batch.
async fn fetch_candidates<R: CocktailRepository + ?Sized>(
    client: &CocktailDbClient,
    repository: &mut R,
    refs: Vec<DrinkRef>,
) -> Vec<Cocktail> {
    let mut cached = 0usize;
    let mut to_fetch = Vec::new();
    let mut resolved: Vec<Option<Cocktail>> = Vec::with_capacity(refs.len());

    for drink_ref in &refs {
        match repository.get_by_api_id(&drink_ref.api_id) {
            Some(cocktail) => {
                cached += 1;
                resolved.push(Some(cocktail));
            }
            None => {
                to_fetch.push((resolved.len(), drink_ref.clone()));
                resolved.push(None);
            }
        }
    }

    let mut lookups = JoinSet::new();
    for (slot, drink_ref) in to_fetch {
        let client = client.clone();
        lookups.spawn(async move {
            let fetched = match client.lookup(&drink_ref.api_id).await {
                Ok(Some(drink)) => Some(drink),
                Ok(None) => {
                    warn!(api_id = %drink_ref.api_id, "Drink reference had no details, dropping it");
                    None
                }
                Err(err) => {
                    warn!(api_id = %drink_ref.api_id, error = %err, "Drink detail fetch failed, dropping it");
                    None
                }
            };
            (slot, fetched)
        });
    }

    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((slot, Some(drink))) => resolved[slot] = Some(find_or_insert(repository, drink)),
            Ok((_, None)) => {}
            Err(err) => warn!(error = %err, "Drink detail task failed"),
        }
    }

    info!(cached, total = refs.len(), "Resolved candidate drinks");
    resolved.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drink_ref(api_id: &str, name: &str) -> DrinkRef {
        DrinkRef {
            api_id: api_id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_dedup_refs_keeps_first_seen_order() {
        let refs = vec![
            drink_ref("2", "Mojito"),
            drink_ref("1", "Margarita"),
            drink_ref("2", "Mojito"),
            drink_ref("3", "Daiquiri"),
            drink_ref("1", "Margarita"),
        ];

        let deduped = dedup_refs(refs);
        let ids: Vec<&str> = deduped.iter().map(|r| r.api_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_dedup_refs_empty_input() {
        assert!(dedup_refs(Vec::new()).is_empty());
    }
}
