//! # Recommendation Flow Integration Tests
//!
//! Covers the request-level plumbing that does not need the external
//! database: deduplication of fanned-out candidate references, repository
//! caching, and the scored pipeline from cached drinks to sorted output.

use cocktails::cocktail_api::DrinkRef;
use cocktails::cocktail_model::NewCocktail;
use cocktails::match_scoring::{score_candidates, MatchConfig};
use cocktails::recommend_errors::RecommendError;
use cocktails::recommender::dedup_refs;
use cocktails::sort_options::{apply_sort, SortOption};
use cocktails::storage::{find_or_insert, CocktailRepository, MemoryRepository};

fn drink_ref(api_id: &str, name: &str) -> DrinkRef {
    DrinkRef {
        api_id: api_id.to_string(),
        name: name.to_string(),
    }
}

fn caipirinha() -> NewCocktail {
    NewCocktail::new("Caipirinha", "Muddle lime with sugar, add cachaca and ice.")
        .with_api_id("11202")
        .with_ingredients(vec!["Cachaca".to_string(), "Lime".to_string(), "Sugar".to_string()])
}

fn screwdriver() -> NewCocktail {
    NewCocktail::new("Screwdriver", "Build over ice and stir.")
        .with_api_id("11870")
        .with_ingredients(vec!["Vodka".to_string(), "Orange Juice".to_string()])
}

#[test]
fn test_fanned_out_refs_dedup_like_the_request_flow() {
    // Two ingredient lookups returning overlapping drinks, flattened in
    // selection order
    let vodka_hits = vec![drink_ref("11870", "Screwdriver"), drink_ref("11202", "Caipirinha")];
    let lime_hits = vec![drink_ref("11202", "Caipirinha"), drink_ref("17222", "A1")];

    let merged: Vec<DrinkRef> = vodka_hits.into_iter().chain(lime_hits).collect();
    let deduped = dedup_refs(merged);

    let ids: Vec<&str> = deduped.iter().map(|r| r.api_id.as_str()).collect();
    assert_eq!(ids, vec!["11870", "11202", "17222"]);
}

#[test]
fn test_cached_drinks_are_not_refetched_into_duplicates() {
    let mut repository = MemoryRepository::empty();

    // First request caches both drinks
    let first = find_or_insert(&mut repository, caipirinha());
    find_or_insert(&mut repository, screwdriver());
    assert_eq!(repository.all().len(), 2);

    // A later request resolving the same reference reuses the record
    let again = find_or_insert(&mut repository, caipirinha());
    assert_eq!(again.id, first.id);
    assert_eq!(repository.all().len(), 2);
}

#[test]
fn test_pipeline_from_cache_to_sorted_output() {
    let mut repository = MemoryRepository::empty();
    find_or_insert(&mut repository, caipirinha());
    find_or_insert(&mut repository, screwdriver());

    let selection = vec!["vodka".to_string(), "orange juice".to_string()];
    let mut results =
        score_candidates(&selection, repository.all(), MatchConfig::server()).unwrap();

    assert_eq!(results[0].cocktail.name, "Screwdriver");
    assert_eq!(results[0].matched_ingredients, 2);
    assert_eq!(results[1].matched_ingredients, 0);

    // Easiest re-rank: Screwdriver has two ingredients, Caipirinha three
    apply_sort(&mut results, SortOption::Easiest);
    assert_eq!(results[0].cocktail.name, "Screwdriver");

    // Popularity proxy: insertion order gave Caipirinha the lower id
    apply_sort(&mut results, SortOption::Popularity);
    assert_eq!(results[0].cocktail.name, "Caipirinha");
}

#[test]
fn test_both_scoring_paths_signal_empty_selection() {
    let mut repository = MemoryRepository::empty();
    find_or_insert(&mut repository, caipirinha());

    let handler_path = score_candidates(&[], repository.all(), MatchConfig::server());
    assert_eq!(handler_path.unwrap_err(), RecommendError::EmptySelection);

    let engine = cocktails::vector_engine::VectorEngine::new(
        repository.all(),
        &["Vodka".to_string(), "Lime".to_string()],
    );
    let engine_path = engine.recommend(&[], cocktails::vector_engine::DEFAULT_RESULT_LIMIT);
    assert_eq!(engine_path.unwrap_err(), RecommendError::EmptySelection);
}
