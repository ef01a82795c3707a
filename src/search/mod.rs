//! Product search across shopping sites.
//!
//! A [`WebSearcher`] queries an ordered list of [`ProductSource`]s for each
//! recommendation, spacing every outbound request with a shared
//! [`RequestGate`], then deduplicates and ranks what came back.
//!
//! Built-in sources scrape HTML result pages:
//! - Amazon search results
//! - Google Shopping
//!
//! Both are compiled with the `scraping` feature (on by default).

#[cfg(feature = "scraping")]
mod amazon;
#[cfg(feature = "scraping")]
mod google;
pub mod rank;
pub mod rate_limit;
pub mod relevance;

#[cfg(feature = "scraping")]
pub use amazon::AmazonSource;
#[cfg(feature = "scraping")]
pub use google::GoogleShoppingSource;
pub use rank::{dedup_and_rank, dedup_products, sort_by_relevance};
pub use rate_limit::RequestGate;
pub use relevance::relevance_score;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::AppError;
use crate::types::{Product, Recommendation};

/// Search terms queried per recommendation
pub const MAX_TERMS_PER_SEARCH: usize = 3;

/// Products returned per recommendation
pub const MAX_RESULTS: usize = 20;

/// Error type for product source failures
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Unexpected status code: {0}")]
    Status(u16),

    #[error("Failed to parse results: {0}")]
    Parse(String),
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A shopping site that can be searched for products
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Display name, also used as [`Product::source`]
    fn name(&self) -> &str;

    /// Search the site for `term`, scoring results against `recommendation`
    async fn search(
        &self,
        term: &str,
        recommendation: &Recommendation,
    ) -> Result<Vec<Product>, SearchError>;
}

/// Searches product sources for recommended garments
pub struct WebSearcher {
    sources: Vec<Box<dyn ProductSource>>,
    gate: RequestGate,
    /// Later sources are skipped once this many products were collected
    fallback_below: usize,
}

impl WebSearcher {
    /// Create a searcher over `sources`, queried in order
    pub fn new(sources: Vec<Box<dyn ProductSource>>, gate: RequestGate) -> Self {
        Self {
            sources,
            gate,
            fallback_below: 10,
        }
    }

    /// Builder method to set the product count that stops fallback sources
    pub fn with_fallback_below(mut self, fallback_below: usize) -> Self {
        self.fallback_below = fallback_below;
        self
    }

    /// A searcher without sources; every search returns nothing
    pub fn disabled() -> Self {
        Self::new(Vec::new(), RequestGate::new(Duration::ZERO))
    }

    /// Build the searcher described by the configuration.
    ///
    /// Returns a disabled searcher when search is turned off or the crate was
    /// built without the `scraping` feature.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let delay = Duration::try_from_secs_f64(config.request_delay_s)
            .unwrap_or(Duration::from_secs(1));
        let gate = RequestGate::new(delay);

        let sources = default_sources(config)?;
        Ok(Self::new(sources, gate).with_fallback_below(config.fallback_below_products))
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Find products for one recommendation.
    ///
    /// For each of the first search terms the first source is always queried;
    /// later sources only while fewer than `fallback_below` products have been
    /// collected. Failing sources are logged and skipped. Results are
    /// deduplicated, ranked by relevance and capped at [`MAX_RESULTS`].
    pub async fn search_products(&self, recommendation: &Recommendation) -> Vec<Product> {
        if self.sources.is_empty() {
            return Vec::new();
        }

        let mut products = Vec::new();

        for term in recommendation.search_terms.iter().take(MAX_TERMS_PER_SEARCH) {
            for (index, source) in self.sources.iter().enumerate() {
                if index > 0 && products.len() >= self.fallback_below {
                    break;
                }

                self.gate.wait().await;

                match source.search(term, recommendation).await {
                    Ok(found) => {
                        debug!(
                            source = source.name(),
                            term = %term,
                            count = found.len(),
                            "Source returned products"
                        );
                        products.extend(found);
                    }
                    Err(e) => {
                        warn!(source = source.name(), term = %term, error = %e, "Product search failed");
                    }
                }
            }
        }

        let mut ranked = dedup_and_rank(products);
        ranked.truncate(MAX_RESULTS);
        ranked
    }
}

impl std::fmt::Debug for WebSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearcher")
            .field("sources", &self.source_names())
            .field("gate", &self.gate)
            .field("fallback_below", &self.fallback_below)
            .finish()
    }
}

#[cfg(feature = "scraping")]
fn default_sources(config: &SearchConfig) -> Result<Vec<Box<dyn ProductSource>>, SearchError> {
    let client = http_client(config)?;
    let sources: Vec<Box<dyn ProductSource>> = vec![
        Box::new(AmazonSource::new(client.clone())),
        Box::new(GoogleShoppingSource::new(client)),
    ];
    Ok(sources)
}

#[cfg(not(feature = "scraping"))]
fn default_sources(_config: &SearchConfig) -> Result<Vec<Box<dyn ProductSource>>, SearchError> {
    warn!("Search enabled but built without the scraping feature");
    Ok(Vec::new())
}

#[cfg(feature = "scraping")]
fn http_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_s))
        .build()
        .map_err(|e| SearchError::Http(e.to_string()))
}

/// Send a request and return the body of a successful response
#[cfg(feature = "scraping")]
async fn fetch_html(request: reqwest::RequestBuilder) -> Result<String, SearchError> {
    let response = request
        .send()
        .await
        .map_err(|e| SearchError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| SearchError::Http(e.to_string()))
}

/// Whitespace-normalised text content of an element
#[cfg(feature = "scraping")]
fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(feature = "scraping")]
fn selector(css: &str) -> Result<scraper::Selector, SearchError> {
    scraper::Selector::parse(css).map_err(|e| SearchError::Parse(e.to_string()))
}
