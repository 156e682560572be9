use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{fetch_json, FetchError, Fetched};
use crate::utils::config::Config;

const ISS_CRAFT: &str = "ISS";

#[derive(Debug, Deserialize)]
struct AstrosResponse {
    people: Option<Vec<Person>>,
}

#[derive(Debug, Deserialize)]
struct Person {
    name: String,
    craft: String,
}

/// Fetches the names of everyone currently aboard the ISS.
pub async fn fetch_iss_crew(client: &Client, config: &Config) -> Fetched<Vec<String>> {
    info!("Connecting to Open Notify API");
    let result = fetch_json(client.get(&config.crew_url)).await.and_then(into_crew);
    Fetched::from_result("open-notify", result)
}

fn into_crew(resp: AstrosResponse) -> Result<Vec<String>, FetchError> {
    let crew: Vec<String> = resp
        .people
        .ok_or(FetchError::MissingField("people"))?
        .into_iter()
        .filter(|p| p.craft == ISS_CRAFT)
        .map(|p| p.name)
        .collect();
    info!(count = crew.len(), "Fetched astronauts on the ISS");
    Ok(crew)
}
