//! # External Drink Database Client Module
//!
//! Client for the public cocktail database HTTP API. Payloads arrive as a
//! `drinks` array (or null when nothing matched) of records whose
//! ingredients live in fifteen numbered slot fields; this module flattens
//! them into the parallel ingredient and measurement lists the rest of the
//! pipeline works with.
//!
//! A drink entry that fails to deserialize is skipped with a warning rather
//! than failing the batch. Requests are retried with exponential backoff
//! and random jitter before the client gives up.

use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api_config::ApiConfig;
use crate::cocktail_model::NewCocktail;
use crate::recommend_errors::RecommendError;

/// Number of ingredient/measure slots in a drink record
const INGREDIENT_SLOTS: usize = 15;

/// A drink record as the external API returns it
///
/// Filter endpoints return only the id, name and thumbnail; everything else
/// is optional. The numbered `strIngredientN`/`strMeasureN` slot fields are
/// captured in `slots` and flattened by [`to_new_cocktail`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDrink {
    #[serde(rename = "idDrink")]
    pub id_drink: String,
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strAlcoholic")]
    pub alcoholic: Option<String>,
    #[serde(rename = "strGlass")]
    pub glass: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strDrinkThumb")]
    pub thumb: Option<String>,
    #[serde(flatten)]
    pub slots: HashMap<String, Option<String>>,
}

/// A lightweight drink reference from a filter endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkRef {
    pub api_id: String,
    pub name: String,
}

/// Flatten a drink record's numbered slots into a cocktail
///
/// Ingredient slots are read in order; blank and missing slots are skipped
/// without stopping, and every kept ingredient gets the measurement from
/// its own slot (empty string when the source omitted it), so the two lists
/// stay parallel.
pub fn to_new_cocktail(drink: &ApiDrink) -> NewCocktail {
    let mut ingredients = Vec::new();
    let mut measurements = Vec::new();

    for slot in 1..=INGREDIENT_SLOTS {
        let ingredient = drink
            .slots
            .get(&format!("strIngredient{slot}"))
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .unwrap_or("");

        if ingredient.is_empty() {
            continue;
        }

        let measure = drink
            .slots
            .get(&format!("strMeasure{slot}"))
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .unwrap_or("");

        ingredients.push(ingredient.to_string());
        measurements.push(measure.to_string());
    }

    NewCocktail {
        api_id: Some(drink.id_drink.clone()),
        name: drink.name.clone(),
        category: drink.category.clone(),
        alcoholic: drink.alcoholic.clone(),
        glass: drink.glass.clone(),
        instructions: drink.instructions.clone().unwrap_or_default(),
        image_url: drink.thumb.clone(),
        ingredients,
        measurements,
    }
}

/// Extract the drink entries from a raw API payload
///
/// Accepts the `drinks` key as an array, null, or anything else the API
/// decides to send for "no results"; individual entries that fail to parse
/// are dropped with a warning.
pub fn parse_drinks(payload: &serde_json::Value) -> Vec<ApiDrink> {
    let entries = match payload.get("drinks") {
        Some(serde_json::Value::Array(entries)) => entries,
        Some(serde_json::Value::Null) | None => return Vec::new(),
        Some(other) => {
            warn!(payload = %other, "Unexpected drinks payload shape, treating as empty");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<ApiDrink>(entry.clone()) {
            Ok(drink) => Some(drink),
            Err(err) => {
                warn!(error = %err, "Skipping malformed drink entry");
                None
            }
        })
        .collect()
}

/// Client for the external drink database
#[derive(Debug, Clone)]
pub struct CocktailDbClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl CocktailDbClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Search drinks by name
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<NewCocktail>, RecommendError> {
        let payload = self.get_payload("search.php", &[("s", query)]).await?;
        Ok(parse_drinks(&payload).iter().map(to_new_cocktail).collect())
    }

    /// List drinks containing the given ingredient (id and name only)
    pub async fn filter_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<DrinkRef>, RecommendError> {
        let payload = self.get_payload("filter.php", &[("i", ingredient)]).await?;
        Ok(to_refs(&payload))
    }

    /// List drinks in the given category (id and name only)
    pub async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<DrinkRef>, RecommendError> {
        let payload = self.get_payload("filter.php", &[("c", category)]).await?;
        Ok(to_refs(&payload))
    }

    /// Fetch the full record for an external drink id
    pub async fn lookup(&self, api_id: &str) -> Result<Option<NewCocktail>, RecommendError> {
        let payload = self.get_payload("lookup.php", &[("i", api_id)]).await?;
        Ok(parse_drinks(&payload).first().map(to_new_cocktail))
    }

    /// Fetch a random drink
    pub async fn random(&self) -> Result<NewCocktail, RecommendError> {
        let payload = self.get_payload("random.php", &[]).await?;
        parse_drinks(&payload)
            .first()
            .map(to_new_cocktail)
            .ok_or_else(|| RecommendError::NotFound("random drink lookup came back empty".to_string()))
    }

    /// Issue one GET with retries, exponential backoff and random jitter
    async fn get_payload(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, RecommendError> {
        let url = format!("{}/{}", self.config.base_url, path);
        let retry = &self.config.retry;
        let mut last_error = String::new();

        for attempt in 0..=retry.max_retries {
            if attempt > 0 {
                let backoff = retry
                    .base_retry_delay_ms
                    .saturating_mul(1 << (attempt - 1))
                    .min(retry.max_retry_delay_ms);
                let jitter = rand::thread_rng().gen_range(0..=retry.base_retry_delay_ms / 2);
                warn!(
                    url = %url,
                    attempt,
                    delay_ms = backoff + jitter,
                    error = %last_error,
                    "Retrying drink database request"
                );
                tokio::time::sleep(Duration::from_millis(backoff + jitter)).await;
            }

            let response = match self.http.get(&url).query(params).send().await {
                Ok(response) => response,
                Err(err) => {
                    last_error = err.to_string();
                    continue;
                }
            };

            let response = match response.error_for_status() {
                Ok(response) => response,
                Err(err) => {
                    last_error = err.to_string();
                    continue;
                }
            };

            match response.json::<serde_json::Value>().await {
                Ok(payload) => {
                    debug!(url = %url, attempt, "Drink database request succeeded");
                    return Ok(payload);
                }
                Err(err) => {
                    last_error = err.to_string();
                }
            }
        }

        Err(RecommendError::Provider(format!(
            "{url} failed after {} attempts: {last_error}",
            retry.max_retries + 1
        )))
    }
}

fn to_refs(payload: &serde_json::Value) -> Vec<DrinkRef> {
    parse_drinks(payload)
        .into_iter()
        .map(|drink| DrinkRef {
            api_id: drink.id_drink,
            name: drink.name,
        })
        .collect()
}
