//! Result deduplication by normalised title.
//!
//! The same paper usually comes back from several providers with different
//! URLs (arXiv abstract page, DOI link, Semantic Scholar page), so titles
//! rather than URLs identify a work. The first occurrence of each title is
//! kept and input order is preserved, which makes the aggregation order the
//! tie-break order for ranking.

use std::collections::HashSet;

use crate::types::{ProviderResult, RankedPaper};

use super::normalize::is_word_char;

/// Anything that carries a title and can be deduplicated.
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for ProviderResult {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for RankedPaper {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Dedup key for a title: lowercased, punctuation removed, trimmed.
///
/// Punctuation is deleted rather than replaced, so `"Self-Attention"` and
/// `"SelfAttention"` share a key.
pub fn title_key(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Drop results whose title key was already seen or is empty.
///
/// Stable: survivors keep their input order. Idempotent.
pub fn deduplicate<T: Titled>(results: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    let before = results.len();

    let unique: Vec<T> = results
        .into_iter()
        .filter(|result| {
            let key = title_key(result.title());
            !key.is_empty() && seen.insert(key)
        })
        .collect();

    tracing::debug!(before, after = unique.len(), "deduplicated results by title");
    unique
}
