//! Core engine for docdex
//!
//! This crate contains the documentation-lookup logic: the library registry,
//! the search client, the page fetcher, and the orchestration that ties them
//! together into the `get_docs` operation.

use docdex_common::{DocdexError, Result};
use docdex_config::Config;

pub mod fetch;
pub mod registry;
pub mod search;

pub use fetch::{PageFetcher, REQUEST_ERROR, TIMEOUT_ERROR};
pub use registry::LibraryRegistry;
pub use search::{OrganicResult, SearchClient, SearchResults};

/// Returned when a search yields no organic results
///
/// This is a normal, successful outcome, not an error.
pub const NO_RESULTS: &str = "No results found";

/// Documentation lookup service
///
/// Owns the registry and the two HTTP clients. Stateless across calls apart
/// from connection pooling inside `reqwest`.
pub struct DocsService {
    registry: LibraryRegistry,
    search: SearchClient,
    fetcher: PageFetcher,
}

impl DocsService {
    /// Build the service from configuration and an optional API key
    pub fn new(config: &Config, api_key: Option<String>) -> Result<Self> {
        let registry = LibraryRegistry::with_extra(&config.registry.libraries);
        let search = SearchClient::new(&config.search, &config.fetch.user_agent, api_key)?;
        let fetcher = PageFetcher::new(&config.fetch)?;

        Ok(Self {
            registry,
            search,
            fetcher,
        })
    }

    /// The registry this service validates libraries against
    pub fn registry(&self) -> &LibraryRegistry {
        &self.registry
    }

    /// Look up documentation for a query within a library's domain
    ///
    /// Validates the library, scopes the query with a `site:` term, searches,
    /// then fetches every result link in order and concatenates the extracted
    /// text. Fetch failures appear inline as sentinel strings; an empty search
    /// yields [`NO_RESULTS`]. The only error is an unsupported library, which
    /// aborts before any network activity.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, query: &str, library: &str) -> Result<String> {
        tracing::info!(
            "get_docs called with query: '{}' and library: '{}'",
            query,
            library
        );

        let domain = self
            .registry
            .domain(library)
            .ok_or_else(|| DocdexError::UnsupportedLibrary {
                library: library.to_string(),
            })?;

        // Scope the search to the library's documentation domain
        let scoped_query = format!("site:{} {}", domain, query);
        tracing::info!("Constructed search query: {}", scoped_query);

        let results = self.search.search(&scoped_query).await;
        if results.organic.is_empty() {
            tracing::warn!("No results found for query: {}", scoped_query);
            return Ok(NO_RESULTS.to_string());
        }

        // Fetch each result in API order; failures contribute sentinels
        let mut text = String::new();
        for result in &results.organic {
            tracing::info!("Processing result: {}", result.link);
            text.push_str(&self.fetcher.fetch_text(&result.link).await);
        }

        tracing::info!(
            "Completed fetching documentation for query: '{}'",
            scoped_query
        );
        Ok(text)
    }
}
