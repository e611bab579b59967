//! Provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::PaperProvider`]
//! for one academic content API, plus the pure parsing function that maps
//! its payload to [`crate::types::ProviderResult`].

pub mod arxiv;
pub mod crossref;
pub mod semantic_scholar;
pub mod serper;

pub use arxiv::ArxivProvider;
pub use crossref::CrossrefProvider;
pub use semantic_scholar::SemanticScholarProvider;
pub use serper::SerperProvider;

use url::Url;

use crate::error::SearchError;

/// Maximum snippet length, in characters, kept from provider abstracts.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Resolve `path` against a provider base URL.
///
/// The base is treated as a directory, so `http://host/mirror` + `works`
/// yields `http://host/mirror/works`.
pub(crate) fn endpoint_url(base: &str, path: &str) -> Result<Url, SearchError> {
    let mut base = Url::parse(base)
        .map_err(|e| SearchError::Config(format!("invalid endpoint {base:?}: {e}")))?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path)
        .map_err(|e| SearchError::Config(format!("invalid endpoint path {path:?}: {e}")))
}

/// Cut `text` to [`SNIPPET_MAX_CHARS`] characters, marking the cut with `...`.
pub(crate) fn truncate_snippet(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
