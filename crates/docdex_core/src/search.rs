//! Search client
//!
//! Issues one POST per lookup to the configured search API and deserializes
//! the organic results. Every failure path degrades to an empty result set:
//! callers only ever see one shape, and "search failed" collapses into
//! "no results".

use docdex_common::{DocdexError, Result};
use docdex_config::SearchConfig;
use serde::Deserialize;
use std::time::Duration;

/// One organic (non-paid) search result
#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    /// Result URL
    pub link: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub snippet: Option<String>,
}

/// Deserialized search API response
///
/// A response without an `organic` field deserializes to the empty set, which
/// is also the failure value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

/// Client for the Serper search API
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    result_limit: usize,
}

impl SearchClient {
    /// Build a client from configuration
    pub fn new(config: &SearchConfig, user_agent: &str, api_key: Option<String>) -> Result<Self> {
        if api_key.is_none() {
            tracing::warn!(
                "{} is not set; searches will return no results",
                docdex_config::API_KEY_ENV
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| DocdexError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            result_limit: config.result_limit,
        })
    }

    /// Perform a web search
    ///
    /// Returns the organic results on success and an empty `SearchResults` on
    /// timeout, transport error, non-2xx status, or an undecodable body.
    pub async fn search(&self, query: &str) -> SearchResults {
        tracing::info!("Initiating web search for query: {}", query);

        let body = serde_json::json!({
            "q": query,
            "num": self.result_limit,
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-KEY", key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!("Timeout occurred during search for query: {}", query);
                return SearchResults::default();
            }
            Err(e) => {
                tracing::error!("Request error during search for query: {} - {}", query, e);
                return SearchResults::default();
            }
        };

        if !response.status().is_success() {
            tracing::error!(
                "Search API returned status {} for query: {}",
                response.status(),
                query
            );
            return SearchResults::default();
        }

        match response.json::<SearchResults>().await {
            Ok(results) => {
                tracing::info!("Search successful for query: {}", query);
                results
            }
            Err(e) => {
                tracing::error!("Failed to decode search response for query: {} - {}", query, e);
                SearchResults::default()
            }
        }
    }
}
