//! # paper-search
//!
//! Multi-source academic paper search with title deduplication and
//! relevance ranking.
//!
//! One search normalises the user's query, asks arXiv, Serper, Semantic
//! Scholar and CrossRef for results, merges them into one shape, removes
//! duplicate works and ranks the rest by TF-IDF similarity to the original
//! query.
//!
//! ## Design
//!
//! - Providers are queried sequentially with a fixed pause between requests
//! - Every provider failure is logged and contributes no results; a search
//!   never fails once the engine is built
//! - Providers whose required API key is missing are skipped
//! - Nothing is cached between searches, including the ranking model
//!
//! ## Security
//!
//! - API keys are redacted from `Debug` output and never logged
//! - No network listeners — this is a library, not a server

pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::{ProviderEndpoints, SearchConfig, DEFAULT_MAX_RESULTS};
pub use credentials::ProviderCredentials;
pub use error::{Result, SearchError};
pub use orchestrator::normalize::normalize_query;
pub use orchestrator::search::PaperSearch;
pub use provider::PaperProvider;
pub use types::{ArxivPaper, ProviderResult, RankedPaper, SearchOutcome, Source, VisualData, VisualKind};

/// Search all providers for papers matching `query`.
///
/// Builds a [`PaperSearch`] from `config` and `credentials` and runs one
/// search. Returns at most `max_results` papers plus the number of unique
/// ranked papers found before truncation.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Provider
/// failures never surface here; they only reduce the result set.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> paper_search::Result<()> {
/// let config = paper_search::SearchConfig::default();
/// let credentials = paper_search::ProviderCredentials::none();
/// let outcome = paper_search::search_papers("graph neural networks", 10, &config, &credentials).await?;
/// for paper in &outcome.papers {
///     println!("{:.3} {}", paper.relevance_score, paper.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_papers(
    query: &str,
    max_results: usize,
    config: &SearchConfig,
    credentials: &ProviderCredentials,
) -> Result<SearchOutcome> {
    let engine = PaperSearch::new(config.clone(), credentials.clone())?;
    Ok(engine.search_papers(query, max_results).await)
}

/// Search with the default configuration and no API keys.
///
/// Convenience wrapper around [`search_papers`] using
/// [`SearchConfig::default()`] and [`DEFAULT_MAX_RESULTS`].
///
/// # Errors
///
/// Same as [`search_papers`].
pub async fn search_default(query: &str) -> Result<SearchOutcome> {
    search_papers(
        query,
        DEFAULT_MAX_RESULTS,
        &SearchConfig::default(),
        &ProviderCredentials::none(),
    )
    .await
}
