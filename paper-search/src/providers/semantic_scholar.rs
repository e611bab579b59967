//! Semantic Scholar graph API — citation-graph paper search.
//!
//! Works anonymously; an API key, when present, is sent as `x-api-key`
//! for a higher rate limit.

use serde::Deserialize;

use crate::credentials::non_empty;
use crate::error::SearchError;
use crate::http::RequestContext;
use crate::provider::PaperProvider;
use crate::types::{ProviderResult, Source};

use super::{endpoint_url, truncate_snippet};

const FIELDS: &str = "title,abstract,authors,year,url,venue,citationCount";

/// Semantic Scholar paper search adapter.
pub struct SemanticScholarProvider {
    api_key: Option<String>,
}

impl SemanticScholarProvider {
    /// A blank key is not sent.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: non_empty(api_key),
        }
    }
}

impl PaperProvider for SemanticScholarProvider {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        ctx: &mut RequestContext<'_>,
    ) -> Result<Vec<ProviderResult>, SearchError> {
        let url = endpoint_url(
            &ctx.config.endpoints.semantic_scholar,
            "graph/v1/paper/search",
        )?;
        let limit = limit.to_string();

        let mut request = ctx.client.get(url).query(&[
            ("query", query),
            ("limit", limit.as_str()),
            ("fields", FIELDS),
        ]);
        if let Some(key) = self.api_key.as_deref() {
            request = request.header("x-api-key", key);
        }

        let body = ctx.send(Source::SemanticScholar, request).await?;
        parse_semantic_scholar_response(&body)
    }

    fn source(&self) -> Source {
        Source::SemanticScholar
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaperSearchResponse {
    data: Vec<S2Paper>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct S2Paper {
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    authors: Option<Vec<S2Author>>,
    year: Option<i32>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct S2Author {
    name: Option<String>,
}

/// Parse a Semantic Scholar `/paper/search` response.
///
/// The API returns explicit `null` for unknown fields; every one of them maps
/// to an empty value. Abstracts are truncated to 500 characters.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not valid JSON.
pub fn parse_semantic_scholar_response(body: &str) -> Result<Vec<ProviderResult>, SearchError> {
    let response: PaperSearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("Semantic Scholar response: {e}")))?;

    Ok(response
        .data
        .into_iter()
        .map(|paper| {
            let snippet = paper
                .abstract_text
                .as_deref()
                .map(truncate_snippet)
                .unwrap_or_default();
            ProviderResult {
                publication_date: paper.year.map(|y| y.to_string()).unwrap_or_default(),
                authors: paper
                    .authors
                    .into_iter()
                    .flatten()
                    .filter_map(|a| a.name)
                    .collect(),
                ..ProviderResult::new(
                    paper.title.unwrap_or_default(),
                    paper.url.unwrap_or_default(),
                    snippet,
                    Source::SemanticScholar,
                )
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "total": 2,
        "offset": 0,
        "data": [
            {
                "paperId": "2c03df8b48bf3fa39054345bafabfeff15bfd11d",
                "title": "Deep Residual Learning for Image Recognition",
                "abstract": "Deeper neural networks are more difficult to train.",
                "authors": [{"authorId": "39353098", "name": "Kaiming He"}, {"authorId": "1771551", "name": "X. Zhang"}],
                "year": 2015,
                "url": "https://www.semanticscholar.org/paper/2c03df8b48bf3fa39054345bafabfeff15bfd11d",
                "venue": "CVPR",
                "citationCount": 190000
            },
            {
                "paperId": "abc",
                "title": "Untitled Workshop Note",
                "abstract": null,
                "authors": [],
                "year": null,
                "url": null
            }
        ]
    }"#;

    #[test]
    fn parses_papers() {
        let results = parse_semantic_scholar_response(FIXTURE).expect("fixture should parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Deep Residual Learning for Image Recognition");
        assert_eq!(results[0].authors, vec!["Kaiming He", "X. Zhang"]);
        assert_eq!(results[0].publication_date, "2015");
        assert_eq!(results[0].source, Source::SemanticScholar);
        assert_eq!(
            results[0].snippet,
            "Deeper neural networks are more difficult to train."
        );
    }

    #[test]
    fn null_fields_default_to_empty() {
        let results = parse_semantic_scholar_response(FIXTURE).expect("fixture should parse");
        assert!(results[1].snippet.is_empty());
        assert!(results[1].publication_date.is_empty());
        assert!(results[1].url.is_empty());
    }

    #[test]
    fn long_abstract_truncated() {
        let body = serde_json::json!({
            "data": [{"title": "Long", "abstract": "word ".repeat(200)}]
        })
        .to_string();
        let results = parse_semantic_scholar_response(&body).expect("should parse");
        assert!(results[0].snippet.ends_with("..."));
        assert_eq!(results[0].snippet.chars().count(), 503);
    }

    #[test]
    fn missing_data_is_empty() {
        let results = parse_semantic_scholar_response(r#"{"total": 0}"#).expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(parse_semantic_scholar_response("not json").is_err());
    }

    #[test]
    fn blank_key_dropped() {
        assert!(SemanticScholarProvider::new(Some(" ".into())).api_key.is_none());
        assert!(SemanticScholarProvider::new(Some("s2".into())).api_key.is_some());
    }

    #[test]
    fn runs_without_key() {
        assert!(SemanticScholarProvider::new(None).is_configured());
    }
}
