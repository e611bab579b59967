//! CrossRef REST API — DOI registry metadata search.

use scraper::Html;
use serde::Deserialize;

use crate::error::SearchError;
use crate::http::RequestContext;
use crate::provider::PaperProvider;
use crate::types::{ProviderResult, Source};

use super::{collapse_whitespace, endpoint_url, truncate_snippet};

const SELECT: &str = "title,author,abstract,published-print,URL,DOI";

/// CrossRef works search adapter. Needs no credential.
pub struct CrossrefProvider;

impl PaperProvider for CrossrefProvider {
    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        ctx: &mut RequestContext<'_>,
    ) -> Result<Vec<ProviderResult>, SearchError> {
        let url = endpoint_url(&ctx.config.endpoints.crossref, "works")?;
        let rows = limit.to_string();

        let request = ctx.client.get(url).query(&[
            ("query", query),
            ("rows", rows.as_str()),
            ("select", SELECT),
        ]);

        let body = ctx.send(Source::Crossref, request).await?;
        parse_crossref_response(&body)
    }

    fn source(&self) -> Source {
        Source::Crossref
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorksMessage {
    items: Vec<Work>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Work {
    title: Vec<String>,
    author: Vec<WorkAuthor>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(rename = "published-print")]
    published_print: Option<DateParts>,
    #[serde(rename = "URL")]
    url: Option<String>,
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorkAuthor {
    given: Option<String>,
    family: Option<String>,
    /// Organisational authors carry only a name.
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DateParts {
    #[serde(rename = "date-parts")]
    date_parts: Vec<Vec<Option<i64>>>,
}

impl WorkAuthor {
    fn display_name(self) -> Option<String> {
        let personal = format!(
            "{} {}",
            self.given.unwrap_or_default(),
            self.family.unwrap_or_default()
        );
        let personal = personal.trim();
        if !personal.is_empty() {
            return Some(personal.to_string());
        }
        self.name.filter(|n| !n.trim().is_empty())
    }
}

impl DateParts {
    fn year(&self) -> Option<i64> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

/// Remove JATS/HTML markup (`<jats:p>`, `<jats:italic>`, ...) from an abstract.
pub fn strip_markup(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    let plain: String = fragment.root_element().text().collect();
    collapse_whitespace(&plain)
}

/// Parse a CrossRef `/works` response.
///
/// Titles are joined from the `title` array, abstracts are stripped of
/// markup and truncated to 500 characters, and the date is the print
/// publication year. Works without a `URL` link to their DOI.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not valid JSON.
pub fn parse_crossref_response(body: &str) -> Result<Vec<ProviderResult>, SearchError> {
    let response: WorksResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("CrossRef response: {e}")))?;

    Ok(response
        .message
        .items
        .into_iter()
        .map(|work| {
            let title = collapse_whitespace(&work.title.join(" "));
            let snippet = work
                .abstract_text
                .as_deref()
                .map(|text| truncate_snippet(&strip_markup(text)))
                .unwrap_or_default();
            let url = work
                .url
                .filter(|u| !u.is_empty())
                .or_else(|| work.doi.map(|doi| format!("https://doi.org/{doi}")))
                .unwrap_or_default();

            ProviderResult {
                publication_date: work
                    .published_print
                    .and_then(|d| d.year())
                    .map(|y| y.to_string())
                    .unwrap_or_default(),
                authors: work
                    .author
                    .into_iter()
                    .filter_map(WorkAuthor::display_name)
                    .collect(),
                ..ProviderResult::new(title, url, snippet, Source::Crossref)
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "status": "ok",
        "message-type": "work-list",
        "message": {
            "total-results": 3,
            "items": [
                {
                    "DOI": "10.1109/cvpr.2016.90",
                    "URL": "http://dx.doi.org/10.1109/cvpr.2016.90",
                    "title": ["Deep Residual Learning for Image Recognition"],
                    "author": [
                        {"given": "Kaiming", "family": "He", "sequence": "first"},
                        {"given": "Xiangyu", "family": "Zhang", "sequence": "additional"}
                    ],
                    "published-print": {"date-parts": [[2016, 6]]},
                    "abstract": "<jats:p>Deeper neural networks are <jats:italic>more difficult</jats:italic> to train.</jats:p>"
                },
                {
                    "DOI": "10.5555/12345",
                    "title": ["Part One:", "A Subtitle"],
                    "author": [{"name": "OpenAI Consortium", "sequence": "first"}],
                    "published-print": {"date-parts": [[null]]}
                },
                {
                    "URL": "http://dx.doi.org/10.1/empty"
                }
            ]
        }
    }"#;

    #[test]
    fn parses_full_work() {
        let results = parse_crossref_response(FIXTURE).expect("fixture should parse");
        assert_eq!(results.len(), 3);

        let first = &results[0];
        assert_eq!(first.title, "Deep Residual Learning for Image Recognition");
        assert_eq!(first.authors, vec!["Kaiming He", "Xiangyu Zhang"]);
        assert_eq!(first.publication_date, "2016");
        assert_eq!(first.url, "http://dx.doi.org/10.1109/cvpr.2016.90");
        assert_eq!(first.snippet, "Deeper neural networks are more difficult to train.");
        assert_eq!(first.source, Source::Crossref);
    }

    #[test]
    fn joins_titles_and_falls_back_to_doi_url() {
        let results = parse_crossref_response(FIXTURE).expect("fixture should parse");
        assert_eq!(results[1].title, "Part One: A Subtitle");
        assert_eq!(results[1].url, "https://doi.org/10.5555/12345");
        assert_eq!(results[1].authors, vec!["OpenAI Consortium"]);
        assert!(results[1].publication_date.is_empty());
    }

    #[test]
    fn work_without_fields_maps_to_empty_values() {
        let results = parse_crossref_response(FIXTURE).expect("fixture should parse");
        assert!(results[2].title.is_empty());
        assert!(results[2].snippet.is_empty());
        assert!(results[2].authors.is_empty());
    }

    #[test]
    fn strip_markup_removes_jats_tags() {
        let text = strip_markup("<jats:title>Abstract</jats:title>\n<jats:p>Plain <b>text</b>.</jats:p>");
        assert_eq!(text, "Abstract Plain text.");
    }

    #[test]
    fn strip_markup_passes_plain_text() {
        assert_eq!(strip_markup("no markup here"), "no markup here");
    }

    #[test]
    fn empty_message_is_empty() {
        let results = parse_crossref_response(r#"{"status": "ok"}"#).expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(matches!(
            parse_crossref_response("{").unwrap_err(),
            SearchError::Parse(_)
        ));
    }
}
