use anyhow::Result;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cocktails::api_config::ApiConfig;
use cocktails::cocktail_api::CocktailDbClient;
use cocktails::match_scoring::MatchConfig;
use cocktails::mood::{recommend_for_mood, GameMood};
use cocktails::recommender::recommend;
use cocktails::sort_options::{apply_sort, SortOption};
use cocktails::storage::MemoryRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    info!("Starting cocktail recommender");

    let config = match env::var("COCKTAIL_API_URL") {
        Ok(base_url) => ApiConfig::with_base_url(base_url),
        Err(_) => ApiConfig::default(),
    };

    let client = CocktailDbClient::new(config)?;
    let mut repository = MemoryRepository::new();

    // A mood set in the environment takes the quiz path; otherwise the
    // command-line arguments are the selected ingredients
    if let Ok(raw_mood) = env::var("GAME_MOOD") {
        let mood = raw_mood.parse::<GameMood>().ok();
        let cocktail = recommend_for_mood(&client, &mut repository, mood).await?;
        println!("{}", serde_json::to_string_pretty(&cocktail)?);
        return Ok(());
    }

    let selection: Vec<String> = env::args().skip(1).collect();
    let mut results = recommend(&client, &mut repository, &selection, MatchConfig::server()).await?;

    if let Ok(raw_sort) = env::var("SORT_OPTION") {
        let sort = raw_sort
            .parse::<SortOption>()
            .map_err(|message| anyhow::anyhow!(message))?;
        apply_sort(&mut results, sort);
    }

    info!("Returning {} recommendations", results.len());
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
