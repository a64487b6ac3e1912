use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::Engine;
use crate::config::SearchConfig;
use crate::models::{Result, SearchResult};

const LOCATIONS_ENDPOINT: &str = "https://serpapi.com/locations.json";

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpOrganic>,
}

#[derive(Debug, Deserialize)]
struct SerpOrganic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

#[derive(Debug, Deserialize)]
struct SerpLocation {
    canonical_name: String,
}

/// Thin client over the search aggregator API. Absence of results is an
/// empty list, not an error.
pub struct SerpClient {
    client: Client,
    endpoint: String,
    api_key: String,
    per_page: usize,
    location_hint: String,
}

impl SerpClient {
    pub fn new(config: &SearchConfig, api_key: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            per_page: config.results_per_page,
            location_hint: config.location.clone(),
        })
    }

    pub async fn search(
        &self,
        engine: Engine,
        query: &str,
        page_index: usize,
    ) -> Result<Vec<SearchResult>> {
        let mut params = engine.query_params(query, page_index, self.per_page);

        if engine == Engine::GLocation {
            match self.canonical_location().await {
                Ok(location) => params.push(("location".to_string(), location)),
                Err(e) => warn!(
                    "Could not resolve location '{}': {}. Searching without it.",
                    self.location_hint, e
                ),
            }
        }
        params.push(("api_key".to_string(), self.api_key.clone()));

        debug!("Searching {} page {} for '{}'", engine.name(), page_index, query);
        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(format!("search API error: {}", response.status()).into());
        }

        let data: SerpResponse = response.json().await?;
        let results = data
            .organic_results
            .into_iter()
            .filter(|r| !r.link.is_empty())
            .map(|r| SearchResult {
                title: r.title,
                link: r.link,
            })
            .collect();
        Ok(results)
    }

    /// Resolves the configured location hint to the API's canonical name.
    async fn canonical_location(&self) -> Result<String> {
        let response = self
            .client
            .get(LOCATIONS_ENDPOINT)
            .query(&[
                ("q", self.location_hint.as_str()),
                ("limit", "1"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let locations: Vec<SerpLocation> = response.json().await?;
        locations
            .into_iter()
            .next()
            .map(|l| l.canonical_name)
            .ok_or_else(|| format!("no location matched '{}'", self.location_hint).into())
    }
}
