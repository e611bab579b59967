//! Core types for provider results, ranked papers, and source identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which provider produced a result.
///
/// Doubles as the fallback subject category of a [`RankedPaper`] whose
/// provider supplies no native categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// arXiv export API — the primary corpus.
    Arxiv,
    /// Serper.dev Google web search, organic block.
    Serper,
    /// Serper.dev Google search, scholar block.
    SerperScholar,
    /// Semantic Scholar graph API.
    SemanticScholar,
    /// CrossRef DOI registry.
    Crossref,
}

impl Source {
    /// Stable identifier used on the wire and as a category tag.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Arxiv => "arxiv",
            Self::Serper => "serper",
            Self::SerperScholar => "serper_scholar",
            Self::SemanticScholar => "semantic_scholar",
            Self::Crossref => "crossref",
        }
    }

    /// Human-readable provider name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv",
            Self::Serper => "Serper",
            Self::SerperScholar => "Serper Scholar",
            Self::SemanticScholar => "Semantic Scholar",
            Self::Crossref => "CrossRef",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single result in the common shape every provider adapter emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    /// Result title. Results with an empty title are dropped during deduplication.
    pub title: String,
    /// Landing page URL.
    pub url: String,
    /// Abstract or snippet text, possibly truncated by the adapter.
    pub snippet: String,
    /// Which provider produced this result.
    pub source: Source,
    /// Publication date as the provider reports it; may be empty.
    pub publication_date: String,
    /// Author names in provider order.
    pub authors: Vec<String>,
    /// Native subject categories; empty when the provider has none.
    pub categories: Vec<String>,
    /// Relevance score; 0 until the ranker runs.
    pub relevance_score: f64,
}

impl ProviderResult {
    /// Create a result with no authors, categories or date.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        source: Source,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source,
            publication_date: String::new(),
            authors: Vec::new(),
            categories: Vec::new(),
            relevance_score: 0.0,
        }
    }
}

/// A paper as parsed from the arXiv Atom feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArxivPaper {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub url: String,
    pub published_date: String,
    pub categories: Vec<String>,
}

impl From<ArxivPaper> for ProviderResult {
    fn from(paper: ArxivPaper) -> Self {
        Self {
            title: paper.title,
            url: paper.url,
            snippet: paper.abstract_text,
            source: Source::Arxiv,
            publication_date: paper.published_date,
            authors: paper.authors,
            categories: paper.categories,
            relevance_score: 0.0,
        }
    }
}

/// Kind of visual content attached to a paper by an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualKind {
    Chart,
    Table,
    Diagram,
    Image,
}

/// Visual or tabular content extracted from a paper's PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualData {
    pub kind: VisualKind,
    pub description: String,
    /// Text recovered from the visual (table cells, caption, labels).
    pub text_content: String,
    /// Base64-encoded image bytes; empty when not captured.
    #[serde(default)]
    pub base64_image: String,
    /// 1-based page number, 0 when unknown.
    #[serde(default)]
    pub page_number: u32,
}

/// A deduplicated, scored paper as consumed by analysis and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPaper {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub url: String,
    pub published_date: String,
    /// Native categories, or the provider tag when the provider has none.
    pub categories: Vec<String>,
    /// Similarity to the original query. Higher is better.
    pub relevance_score: f64,
    /// Populated later by a visual-extraction step; always empty here.
    pub visual_data: Vec<VisualData>,
}

impl From<ProviderResult> for RankedPaper {
    fn from(result: ProviderResult) -> Self {
        let categories = if result.categories.is_empty() {
            vec![result.source.id().to_string()]
        } else {
            result.categories
        };
        Self {
            title: result.title,
            authors: result.authors,
            abstract_text: result.snippet,
            url: result.url,
            published_date: result.publication_date,
            categories,
            relevance_score: result.relevance_score,
            visual_data: Vec::new(),
        }
    }
}

/// Output of one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Ranked papers, at most the requested limit.
    pub papers: Vec<RankedPaper>,
    /// Number of unique ranked papers before truncation.
    pub total: usize,
}

impl SearchOutcome {
    /// An outcome with no papers.
    pub fn empty() -> Self {
        Self::default()
    }
}
