//! Core search aggregator: sequential provider fan-out, dedup, score, rank.
//!
//! Normalises the query, asks each provider in a fixed order for a fixed
//! share of the result budget, concatenates the results, deduplicates by
//! title, scores against the original query, sorts, and truncates.

use crate::config::SearchConfig;
use crate::credentials::ProviderCredentials;
use crate::error::SearchError;
use crate::http::{build_client, RequestContext};
use crate::provider::search_provider;
use crate::providers::{ArxivProvider, CrossrefProvider, SemanticScholarProvider, SerperProvider};
use crate::types::{ProviderResult, RankedPaper, SearchOutcome};

use super::dedup::deduplicate;
use super::normalize::normalize_query;
use super::scoring::{score_papers, sort_by_relevance};

/// Divisors of `max_results` giving each provider's budget, in call order:
/// arXiv, Serper, Semantic Scholar, CrossRef.
pub const BUDGET_DIVISORS: [usize; 4] = [2, 2, 3, 4];

/// Budget for a provider with divisor `divisor`; never below one.
pub fn provider_budget(max_results: usize, divisor: usize) -> usize {
    (max_results / divisor.max(1)).max(1)
}

/// Multi-provider academic paper search.
///
/// Holds the HTTP client, configuration and credentials. Holds no state
/// between searches: every call gets a fresh request pacer and a fresh
/// ranking model.
pub struct PaperSearch {
    client: reqwest::Client,
    config: SearchConfig,
    arxiv: ArxivProvider,
    serper: SerperProvider,
    semantic_scholar: SemanticScholarProvider,
    crossref: CrossrefProvider,
}

impl PaperSearch {
    /// Validate `config` and build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration and
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SearchConfig, credentials: ProviderCredentials) -> Result<Self, SearchError> {
        config.validate()?;
        let client = build_client(&config)?;
        tracing::debug!(
            serper = credentials.serper_api_key.is_some(),
            semantic_scholar_key = credentials.semantic_scholar_api_key.is_some(),
            "paper search initialised"
        );
        Ok(Self {
            client,
            arxiv: ArxivProvider,
            serper: SerperProvider::new(credentials.serper_api_key),
            semantic_scholar: SemanticScholarProvider::new(credentials.semantic_scholar_api_key),
            crossref: CrossrefProvider,
            config,
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search every configured provider and return ranked, unique papers.
    ///
    /// # Pipeline
    ///
    /// 1. Empty query or zero `max_results` yields an empty outcome
    /// 2. Normalise the query for provider requests
    /// 3. Query arXiv, Serper, Semantic Scholar and CrossRef in that order,
    ///    each with its share of `max_results` (see [`BUDGET_DIVISORS`])
    /// 4. Concatenate results in call order
    /// 5. Deduplicate by normalised title
    /// 6. Score against the **original** query and stable-sort descending
    /// 7. Record the total, then truncate to `max_results`
    ///
    /// Never fails: provider failures contribute no results.
    pub async fn search_papers(&self, query: &str, max_results: usize) -> SearchOutcome {
        if query.trim().is_empty() || max_results == 0 {
            tracing::debug!(max_results, "empty query or zero limit, skipping search");
            return SearchOutcome::empty();
        }

        tracing::info!(max_results, "paper search started");
        let normalized = normalize_query(query);
        tracing::debug!(normalized = %normalized, "normalised query");

        let results = self.collect(&normalized, max_results).await;
        let outcome = rank(results, query, max_results);

        tracing::info!(
            returned = outcome.papers.len(),
            total = outcome.total,
            "paper search finished"
        );
        outcome
    }

    async fn collect(&self, query: &str, max_results: usize) -> Vec<ProviderResult> {
        let [arxiv, serper, semantic, crossref] =
            BUDGET_DIVISORS.map(|d| provider_budget(max_results, d));
        let mut ctx = RequestContext::new(&self.client, &self.config);

        let mut all = search_provider(&self.arxiv, query, arxiv, &mut ctx).await;
        all.extend(search_provider(&self.serper, query, serper, &mut ctx).await);
        all.extend(search_provider(&self.semantic_scholar, query, semantic, &mut ctx).await);
        all.extend(search_provider(&self.crossref, query, crossref, &mut ctx).await);

        tracing::debug!(count = all.len(), requests = ctx.pacer.requests(), "provider results collected");
        all
    }
}

/// Deduplicate, score against `query`, sort and truncate.
///
/// `total` is the number of unique ranked papers before truncation.
pub fn rank(results: Vec<ProviderResult>, query: &str, max_results: usize) -> SearchOutcome {
    let unique: Vec<RankedPaper> = deduplicate(results)
        .into_iter()
        .map(RankedPaper::from)
        .collect();

    let mut papers = score_papers(unique, query);
    sort_by_relevance(&mut papers);

    let total = papers.len();
    papers.truncate(max_results);
    SearchOutcome { papers, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn make_result(title: &str, snippet: &str, source: Source) -> ProviderResult {
        ProviderResult::new(title, format!("https://example.org/{title}"), snippet, source)
    }

    #[test]
    fn budgets_follow_divisors() {
        let budgets = BUDGET_DIVISORS.map(|d| provider_budget(20, d));
        assert_eq!(budgets, [10, 10, 6, 5]);
    }

    #[test]
    fn budgets_never_zero() {
        let budgets = BUDGET_DIVISORS.map(|d| provider_budget(1, d));
        assert_eq!(budgets, [1, 1, 1, 1]);
    }

    #[test]
    fn rank_reports_total_before_truncation() {
        let results: Vec<ProviderResult> = (0..8)
            .map(|i| make_result(&format!("Quantum paper {i}"), "quantum computing", Source::Crossref))
            .collect();
        let outcome = rank(results, "quantum computing", 3);
        assert_eq!(outcome.papers.len(), 3);
        assert_eq!(outcome.total, 8);
    }

    #[test]
    fn rank_counts_unique_results_only() {
        let results = vec![
            make_result("Deep Residual Learning for Image Recognition", "residual", Source::Arxiv),
            make_result("Deep residual learning for image recognition.", "residual", Source::Crossref),
            make_result("", "orphan snippet", Source::Serper),
        ];
        let outcome = rank(results, "residual learning", 10);
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.papers[0].categories, vec!["arxiv"]);
    }

    #[test]
    fn rank_sorts_by_relevance() {
        let results = vec![
            make_result("Crop rotation", "medieval agriculture", Source::Crossref),
            make_result("Graph neural networks", "message passing neural networks", Source::Arxiv),
            make_result("Protein folding", "structure prediction", Source::SemanticScholar),
        ];
        let outcome = rank(results, "graph neural networks", 10);
        assert_eq!(outcome.papers[0].title, "Graph neural networks");
        assert!(outcome
            .papers
            .windows(2)
            .all(|w| w[0].relevance_score >= w[1].relevance_score));
    }

    #[test]
    fn rank_of_nothing_is_empty() {
        assert_eq!(rank(Vec::new(), "anything", 5), SearchOutcome::empty());
    }

    #[tokio::test]
    async fn empty_query_makes_no_requests() {
        let config = SearchConfig {
            endpoints: crate::config::ProviderEndpoints::all("http://127.0.0.1:9"),
            ..Default::default()
        };
        let engine = PaperSearch::new(config, ProviderCredentials::none()).expect("engine");
        assert_eq!(engine.search_papers("   ", 10).await, SearchOutcome::empty());
        assert_eq!(engine.search_papers("transformers", 0).await, SearchOutcome::empty());
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(PaperSearch::new(config, ProviderCredentials::none()).is_err());
    }
}
