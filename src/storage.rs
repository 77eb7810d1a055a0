use chrono::Utc;
use log::info;
use std::collections::HashMap;

use crate::cocktail_model::{Cocktail, Ingredient, NewCocktail};

/// Common ingredient names the catalog starts with
pub const COMMON_INGREDIENTS: &[&str] = &[
    "Vodka",
    "Rum",
    "Gin",
    "Tequila",
    "Whiskey",
    "Bourbon",
    "Scotch",
    "Brandy",
    "Cognac",
    "Triple Sec",
    "Cointreau",
    "Lime Juice",
    "Lemon Juice",
    "Orange Juice",
    "Cranberry Juice",
    "Pineapple Juice",
    "Grapefruit Juice",
    "Simple Syrup",
    "Grenadine",
    "Bitters",
    "Mint Leaves",
    "Soda Water",
    "Tonic Water",
    "Cola",
    "Ginger Beer",
];

/// Repository capability for cocktails and the ingredient catalog
///
/// Injected into the pipeline rather than accessed as a global, so callers
/// decide where cached drinks live.
pub trait CocktailRepository {
    fn get(&self, id: i64) -> Option<Cocktail>;
    fn get_by_api_id(&self, api_id: &str) -> Option<Cocktail>;
    fn insert(&mut self, cocktail: NewCocktail) -> Cocktail;
    /// Case-insensitive name containment search
    fn search(&self, query: &str) -> Vec<Cocktail>;
    fn all(&self) -> Vec<Cocktail>;

    fn all_ingredients(&self) -> Vec<Ingredient>;
    fn ingredient_by_name(&self, name: &str) -> Option<Ingredient>;
    fn add_ingredient(
        &mut self,
        name: &str,
        description: Option<String>,
        category: Option<String>,
        alcoholic: Option<bool>,
    ) -> Ingredient;
}

/// Return the cached drink for an external id, inserting it when absent
pub fn find_or_insert<R: CocktailRepository + ?Sized>(
    repository: &mut R,
    cocktail: NewCocktail,
) -> Cocktail {
    if let Some(api_id) = cocktail.api_id.as_deref() {
        if let Some(existing) = repository.get_by_api_id(api_id) {
            return existing;
        }
    }
    repository.insert(cocktail)
}

/// In-memory repository with sequential ids and a seeded ingredient catalog
pub struct MemoryRepository {
    cocktails: HashMap<i64, Cocktail>,
    ingredients: HashMap<i64, Ingredient>,
    next_cocktail_id: i64,
    next_ingredient_id: i64,
}

impl MemoryRepository {
    /// Create a repository seeded with the common ingredient catalog
    pub fn new() -> Self {
        let mut repository = Self::empty();

        for name in COMMON_INGREDIENTS {
            let category = if name.contains("Juice") {
                "Juice"
            } else if name.contains("Syrup") {
                "Syrup"
            } else {
                "Spirit"
            };
            let alcoholic = !name.contains("Juice")
                && !name.contains("Syrup")
                && !name.contains("Leaves")
                && !name.contains("Water")
                && !name.contains("Cola");

            repository.add_ingredient(
                name,
                Some(format!("{name} is a common ingredient in cocktails.")),
                Some(category.to_string()),
                Some(alcoholic),
            );
        }

        info!(
            "Memory repository seeded with {} catalog ingredients",
            repository.ingredients.len()
        );
        repository
    }

    /// Create a repository with no seeded catalog
    pub fn empty() -> Self {
        Self {
            cocktails: HashMap::new(),
            ingredients: HashMap::new(),
            next_cocktail_id: 1,
            next_ingredient_id: 1,
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CocktailRepository for MemoryRepository {
    fn get(&self, id: i64) -> Option<Cocktail> {
        self.cocktails.get(&id).cloned()
    }

    fn get_by_api_id(&self, api_id: &str) -> Option<Cocktail> {
        self.cocktails
            .values()
            .find(|cocktail| cocktail.api_id.as_deref() == Some(api_id))
            .cloned()
    }

    fn insert(&mut self, cocktail: NewCocktail) -> Cocktail {
        let id = self.next_cocktail_id;
        self.next_cocktail_id += 1;

        let record = Cocktail {
            id,
            api_id: cocktail.api_id,
            name: cocktail.name,
            category: cocktail.category,
            alcoholic: cocktail.alcoholic,
            glass: cocktail.glass,
            instructions: cocktail.instructions,
            image_url: cocktail.image_url,
            ingredients: cocktail.ingredients,
            measurements: cocktail.measurements,
            cached_at: Utc::now(),
        };

        info!("Cached cocktail '{}' with id {}", record.name, id);
        self.cocktails.insert(id, record.clone());
        record
    }

    fn search(&self, query: &str) -> Vec<Cocktail> {
        let lowered = query.to_lowercase();
        let mut found: Vec<Cocktail> = self
            .cocktails
            .values()
            .filter(|cocktail| cocktail.name.to_lowercase().contains(&lowered))
            .cloned()
            .collect();
        found.sort_by_key(|cocktail| cocktail.id);
        found
    }

    fn all(&self) -> Vec<Cocktail> {
        let mut cocktails: Vec<Cocktail> = self.cocktails.values().cloned().collect();
        cocktails.sort_by_key(|cocktail| cocktail.id);
        cocktails
    }

    fn all_ingredients(&self) -> Vec<Ingredient> {
        let mut ingredients: Vec<Ingredient> = self.ingredients.values().cloned().collect();
        ingredients.sort_by_key(|ingredient| ingredient.id);
        ingredients
    }

    fn ingredient_by_name(&self, name: &str) -> Option<Ingredient> {
        let lowered = name.to_lowercase();
        self.ingredients
            .values()
            .find(|ingredient| ingredient.name.to_lowercase() == lowered)
            .cloned()
    }

    fn add_ingredient(
        &mut self,
        name: &str,
        description: Option<String>,
        category: Option<String>,
        alcoholic: Option<bool>,
    ) -> Ingredient {
        let id = self.next_ingredient_id;
        self.next_ingredient_id += 1;

        let ingredient = Ingredient {
            id,
            name: name.to_string(),
            description,
            category,
            alcoholic,
        };
        self.ingredients.insert(id, ingredient.clone());
        ingredient
    }
}
