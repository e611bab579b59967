//! Serper.dev Google search — academic-filtered web and scholar results.
//!
//! Requires an API key. Without one the provider reports itself as
//! unconfigured and is skipped by the aggregator.

use serde::Deserialize;
use serde_json::json;

use crate::credentials::non_empty;
use crate::error::SearchError;
use crate::http::RequestContext;
use crate::provider::PaperProvider;
use crate::types::{ProviderResult, Source};

use super::endpoint_url;

/// Site and file-type filter appended to every query.
const ACADEMIC_FILTER: &str = "site:arxiv.org OR site:scholar.google.com OR site:researchgate.net OR site:ieee.org OR site:acm.org OR filetype:pdf";

/// Serper.dev search adapter.
pub struct SerperProvider {
    api_key: Option<String>,
}

impl SerperProvider {
    /// A blank key counts as no key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: non_empty(api_key),
        }
    }

    /// The query string actually sent to Serper.
    pub fn academic_query(query: &str) -> String {
        format!("{query} {ACADEMIC_FILTER}")
    }
}

impl PaperProvider for SerperProvider {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        ctx: &mut RequestContext<'_>,
    ) -> Result<Vec<ProviderResult>, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let url = endpoint_url(&ctx.config.endpoints.serper, "search")?;
        let payload = json!({
            "q": Self::academic_query(query),
            "num": limit,
            "gl": "us",
            "hl": "en",
        });

        let request = ctx
            .client
            .post(url)
            .header("X-API-KEY", api_key)
            .json(&payload);

        let body = ctx.send(Source::Serper, request).await?;
        parse_serper_response(&body)
    }

    fn source(&self) -> Source {
        Source::Serper
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerperResponse {
    organic: Vec<SerperItem>,
    scholar: Vec<SerperItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SerperItem {
    title: String,
    link: String,
    snippet: String,
    date: String,
    publication_info: PublicationInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PublicationInfo {
    summary: String,
}

/// Parse a Serper JSON response.
///
/// `organic` items are tagged [`Source::Serper`] and dated by `date`;
/// `scholar` items are tagged [`Source::SerperScholar`] and dated by
/// `publicationInfo.summary`.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not valid JSON.
pub fn parse_serper_response(body: &str) -> Result<Vec<ProviderResult>, SearchError> {
    let response: SerperResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Serper response: {e}")))?;

    let organic = response.organic.into_iter().map(|item| ProviderResult {
        publication_date: item.date,
        ..ProviderResult::new(item.title, item.link, item.snippet, Source::Serper)
    });
    let scholar = response.scholar.into_iter().map(|item| ProviderResult {
        publication_date: item.publication_info.summary,
        ..ProviderResult::new(item.title, item.link, item.snippet, Source::SerperScholar)
    });

    Ok(organic.chain(scholar).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "searchParameters": {"q": "graph neural networks", "type": "search"},
        "organic": [
            {
                "title": "Graph Neural Networks: A Review of Methods and Applications",
                "link": "https://arxiv.org/abs/1812.08434",
                "snippet": "Lots of learning tasks require dealing with graph data.",
                "date": "Dec 20, 2018",
                "position": 1
            },
            {
                "title": "A Comprehensive Survey on Graph Neural Networks",
                "link": "https://ieeexplore.ieee.org/document/9046288",
                "position": 2
            }
        ],
        "scholar": [
            {
                "title": "Semi-Supervised Classification with Graph Convolutional Networks",
                "link": "https://openreview.net/forum?id=SJU4ayYgl",
                "snippet": "We present a scalable approach for semi-supervised learning.",
                "publicationInfo": {"summary": "TN Kipf, M Welling - 2016"}
            }
        ]
    }"#;

    #[test]
    fn parses_organic_and_scholar_blocks() {
        let results = parse_serper_response(FIXTURE).expect("fixture should parse");
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].source, Source::Serper);
        assert_eq!(results[0].publication_date, "Dec 20, 2018");
        assert_eq!(results[0].url, "https://arxiv.org/abs/1812.08434");

        assert_eq!(results[2].source, Source::SerperScholar);
        assert_eq!(results[2].publication_date, "TN Kipf, M Welling - 2016");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let results = parse_serper_response(FIXTURE).expect("fixture should parse");
        assert!(results[1].snippet.is_empty());
        assert!(results[1].publication_date.is_empty());
        assert!(results[1].authors.is_empty());
    }

    #[test]
    fn response_without_blocks_is_empty() {
        let results = parse_serper_response(r#"{"credits": 1}"#).expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_serper_response("<html>").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn academic_query_appends_site_filter() {
        let q = SerperProvider::academic_query("diffusion models");
        assert!(q.starts_with("diffusion models site:arxiv.org"));
        assert!(q.ends_with("filetype:pdf"));
    }

    #[test]
    fn configured_only_with_key() {
        assert!(!SerperProvider::new(None).is_configured());
        assert!(SerperProvider::new(Some("key".into())).is_configured());
    }

    #[test]
    fn blank_key_is_unconfigured() {
        assert!(!SerperProvider::new(Some(String::new())).is_configured());
        assert!(!SerperProvider::new(Some("  \t".into())).is_configured());
    }
}
