//! arXiv export API — the primary corpus.
//!
//! One logical search fans out into several sub-queries, each built with a
//! different arXiv query strategy (phrase, title, abstract, category
//! restricted). The result budget is split evenly across strategies and the
//! outputs are concatenated as-is; duplicates are removed later, globally.

use serde::Deserialize;

use crate::error::SearchError;
use crate::http::RequestContext;
use crate::provider::PaperProvider;
use crate::types::{ArxivPaper, ProviderResult, Source};

use super::{collapse_whitespace, endpoint_url};

/// arXiv Atom API adapter. Needs no credential.
pub struct ArxivProvider;

impl ArxivProvider {
    /// Build the arXiv `search_query` strings for a normalised query.
    pub fn strategies(query: &str) -> Vec<String> {
        let phrase = collapse_whitespace(query);
        vec![
            format!("all:\"{phrase}\""),
            format!("ti:({phrase})"),
            format!("abs:({phrase})"),
            format!("cat:cs.* AND all:{query}"),
            format!("all:{query} AND cat:cs.LG"),
            format!("all:{query} AND cat:cs.CV"),
        ]
    }

    /// Results requested per strategy for an overall `limit`.
    pub fn strategy_limit(limit: usize, strategies: usize) -> usize {
        (limit / strategies.max(1)).max(1)
    }

    /// Run every strategy and return the native arXiv records.
    ///
    /// A failing strategy is logged and skipped; the others still run.
    pub async fn search_papers(
        &self,
        query: &str,
        limit: usize,
        ctx: &mut RequestContext<'_>,
    ) -> Result<Vec<ArxivPaper>, SearchError> {
        let url = endpoint_url(&ctx.config.endpoints.arxiv, "api/query")?;
        let strategies = Self::strategies(query);
        let per_strategy = Self::strategy_limit(limit, strategies.len()).to_string();

        let mut papers = Vec::new();
        for strategy in &strategies {
            let request = ctx.client.get(url.clone()).query(&[
                ("search_query", strategy.as_str()),
                ("start", "0"),
                ("max_results", per_strategy.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ]);

            let outcome = match ctx.send(Source::Arxiv, request).await {
                Ok(body) => parse_arxiv_feed(&body),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(batch) => papers.extend(batch),
                Err(err) => {
                    tracing::warn!(strategy = %strategy, error = %err, "arXiv strategy failed");
                }
            }
        }

        tracing::debug!(count = papers.len(), "arXiv search finished");
        Ok(papers)
    }
}

impl PaperProvider for ArxivProvider {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        ctx: &mut RequestContext<'_>,
    ) -> Result<Vec<ProviderResult>, SearchError> {
        let papers = self.search_papers(query, limit, ctx).await?;
        Ok(papers.into_iter().map(ProviderResult::from).collect())
    }

    fn source(&self) -> Source {
        Source::Arxiv
    }
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    published: String,
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    #[serde(rename = "category", default)]
    categories: Vec<AtomCategory>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: String,
    #[serde(rename = "@rel", default)]
    rel: String,
}

#[derive(Debug, Deserialize)]
struct AtomCategory {
    #[serde(rename = "@term", default)]
    term: String,
}

impl AtomEntry {
    /// arXiv reports malformed queries as a single entry under `/api/errors`.
    fn is_error(&self) -> bool {
        self.id.contains("/api/errors")
    }

    fn into_paper(self) -> Option<ArxivPaper> {
        let title = collapse_whitespace(&self.title);
        let abstract_text = collapse_whitespace(&self.summary);
        if title.is_empty() || abstract_text.is_empty() {
            return None;
        }

        let url = self
            .links
            .iter()
            .find(|link| link.rel == "alternate" && !link.href.is_empty())
            .map(|link| link.href.clone())
            .unwrap_or_else(|| self.id.trim().to_string());

        Some(ArxivPaper {
            title,
            authors: self
                .authors
                .into_iter()
                .map(|a| collapse_whitespace(&a.name))
                .filter(|name| !name.is_empty())
                .collect(),
            abstract_text,
            url,
            published_date: self.published.trim().to_string(),
            categories: self
                .categories
                .into_iter()
                .map(|c| c.term)
                .filter(|term| !term.is_empty())
                .collect(),
        })
    }
}

/// Parse an arXiv Atom response into papers.
///
/// Entries without a title or an abstract are skipped.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the XML is malformed or arXiv reports
/// a query error.
pub fn parse_arxiv_feed(xml: &str) -> Result<Vec<ArxivPaper>, SearchError> {
    let feed: AtomFeed = quick_xml::de::from_str(xml)
        .map_err(|e| SearchError::Parse(format!("arXiv feed: {e}")))?;

    if let Some(error) = feed.entries.iter().find(|entry| entry.is_error()) {
        return Err(SearchError::Parse(format!(
            "arXiv rejected query: {}",
            collapse_whitespace(&error.summary)
        )));
    }

    Ok(feed
        .entries
        .into_iter()
        .filter_map(AtomEntry::into_paper)
        .collect())
}
