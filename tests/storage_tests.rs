//! # Repository Integration Tests
//!
//! Exercises the in-memory repository the pipeline injects: caching by
//! external id, name search, and the seeded ingredient catalog that feeds
//! the vector engine's vocabulary.

use cocktails::cocktail_model::NewCocktail;
use cocktails::storage::{find_or_insert, CocktailRepository, MemoryRepository, COMMON_INGREDIENTS};

fn mojito() -> NewCocktail {
    NewCocktail::new("Mojito", "Muddle mint with sugar and lime, add rum, top with soda.")
        .with_api_id("11000")
        .with_ingredients(vec![
            "Rum".to_string(),
            "Mint Leaves".to_string(),
            "Lime Juice".to_string(),
            "Soda Water".to_string(),
        ])
        .with_measurements(vec![
            "2 oz".to_string(),
            "6".to_string(),
            "1 oz".to_string(),
            "Top".to_string(),
        ])
}

#[test]
fn test_insert_then_get_round_trip() {
    let mut repository = MemoryRepository::empty();

    let inserted = repository.insert(mojito());
    let fetched = repository.get(inserted.id).unwrap();

    assert_eq!(fetched.name, "Mojito");
    assert_eq!(fetched.ingredients.len(), 4);
    assert_eq!(fetched.measurements.len(), 4);
    assert_eq!(fetched.api_id.as_deref(), Some("11000"));
    assert!(repository.get(9999).is_none());
}

#[test]
fn test_repeated_caching_reuses_the_record() {
    let mut repository = MemoryRepository::empty();

    let first = find_or_insert(&mut repository, mojito());
    let second = find_or_insert(&mut repository, mojito());

    assert_eq!(first.id, second.id);
    assert_eq!(first.cached_at, second.cached_at);
    assert_eq!(repository.all().len(), 1);
}

#[test]
fn test_cocktail_without_api_id_is_always_inserted() {
    let mut repository = MemoryRepository::empty();
    let local = NewCocktail::new("House Special", "Improvise.");

    find_or_insert(&mut repository, local.clone());
    find_or_insert(&mut repository, local);

    assert_eq!(repository.all().len(), 2);
}

#[test]
fn test_name_search() {
    let mut repository = MemoryRepository::empty();
    repository.insert(mojito());
    repository.insert(NewCocktail::new("Virgin Mojito", "As above, hold the rum."));
    repository.insert(NewCocktail::new("Margarita", "Shake and strain."));

    let found = repository.search("mojito");
    assert_eq!(found.len(), 2);
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"Mojito"));
    assert!(names.contains(&"Virgin Mojito"));
}

#[test]
fn test_seeded_catalog_matches_the_common_list() {
    let repository = MemoryRepository::new();
    let ingredients = repository.all_ingredients();

    assert_eq!(ingredients.len(), COMMON_INGREDIENTS.len());
    for name in COMMON_INGREDIENTS {
        assert!(
            repository.ingredient_by_name(name).is_some(),
            "missing catalog ingredient: {name}"
        );
    }

    // Derived flags: juices are non-alcoholic juices, spirits are alcoholic
    let cranberry = repository.ingredient_by_name("Cranberry Juice").unwrap();
    assert_eq!(cranberry.category.as_deref(), Some("Juice"));
    assert_eq!(cranberry.alcoholic, Some(false));

    let simple_syrup = repository.ingredient_by_name("Simple Syrup").unwrap();
    assert_eq!(simple_syrup.category.as_deref(), Some("Syrup"));
    assert_eq!(simple_syrup.alcoholic, Some(false));

    let bourbon = repository.ingredient_by_name("Bourbon").unwrap();
    assert_eq!(bourbon.category.as_deref(), Some("Spirit"));
    assert_eq!(bourbon.alcoholic, Some(true));
}

#[test]
fn test_catalog_supplies_a_usable_vocabulary() {
    use cocktails::vector_engine::VectorEngine;

    let repository = MemoryRepository::new();
    let vocabulary: Vec<String> = repository
        .all_ingredients()
        .into_iter()
        .map(|ingredient| ingredient.name)
        .collect();

    let engine = VectorEngine::new(Vec::new(), &vocabulary);
    assert_eq!(engine.vocabulary().len(), COMMON_INGREDIENTS.len());
    // Vocabulary terms are lowered for matching
    assert!(engine.vocabulary().contains(&"lime juice".to_string()));
}
