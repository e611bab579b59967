//! Query normalisation for provider requests.
//!
//! Provider search APIs do better with a bag of content words than with a
//! conversational question. [`normalize_query`] drops short tokens and
//! English stop words, but never drops a term from a fixed academic
//! vocabulary. The normalised form is only sent to providers; ranking
//! always uses the user's original text.

use super::stopwords::is_stop_word;

/// Terms kept even when they appear in the stop-word list.
const ACADEMIC_TERMS: &[&str] = &[
    "research", "study", "analysis", "method", "approach", "technique",
    "algorithm", "model", "learning", "neural", "network", "deep",
    "machine", "artificial", "intelligence", "data", "science",
    "computer", "vision", "processing", "natural", "language",
    "quantum", "computing", "robotics", "optimization", "classification",
    "regression", "clustering", "supervised", "unsupervised",
    "reinforcement", "transformer", "attention", "convolution",
    "graph", "embedding", "feature", "detection", "recognition",
    "segmentation", "generation", "prediction", "evaluation",
    "performance", "accuracy", "precision", "recall", "framework",
    "architecture", "implementation", "application", "development",
    "latest", "recent", "new", "novel", "advanced", "state-of-the-art",
    "compared", "comparison", "survey", "review", "comprehensive",
];

/// Minimum number of surviving tokens for the normalised form to be used.
const MIN_TOKENS: usize = 2;

/// Whether `token` belongs to the academic allowlist.
pub fn is_academic_term(token: &str) -> bool {
    ACADEMIC_TERMS.contains(&token)
}

/// Rewrite a raw user query into a provider-friendly keyword query.
///
/// Lowercases, replaces punctuation with spaces, drops tokens of two
/// characters or fewer and stop words that are not academic terms. When
/// fewer than two tokens survive, `raw` is returned unchanged.
///
/// ```
/// use paper_search::orchestrator::normalize::normalize_query;
///
/// assert_eq!(
///     normalize_query("What are the latest advances in neural networks?"),
///     "latest advances neural networks"
/// );
/// assert_eq!(normalize_query("AI"), "AI");
/// ```
pub fn normalize_query(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if is_word_char(c) || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !is_stop_word(token) || is_academic_term(token))
        .collect();

    if tokens.len() < MIN_TOKENS {
        return raw.to_string();
    }
    tokens.join(" ")
}

/// Word characters: alphanumerics (any script) and underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_stop_words_and_punctuation() {
        assert_eq!(
            normalize_query("Find me papers about graph neural networks, please!"),
            "papers graph neural networks"
        );
    }

    #[test]
    fn normalisation_is_deterministic() {
        let q = "How does the Transformer architecture handle long sequences?";
        assert_eq!(normalize_query(q), normalize_query(q));
    }

    #[test]
    fn allowlisted_terms_survive() {
        // "new" is a generic stop word but also an academic term.
        assert!(is_stop_word("new"));
        let normalized = normalize_query("new latest neural methods");
        assert!(normalized.contains("new"));
        assert!(normalized.contains("latest"));
        assert!(normalized.contains("neural"));
    }

    #[test]
    fn every_allowlisted_term_is_kept() {
        for term in ACADEMIC_TERMS.iter().filter(|t| t.chars().all(is_word_char)) {
            let normalized = normalize_query(&format!("{term} benchmark"));
            assert!(
                normalized.split(' ').any(|t| t == *term),
                "{term} was dropped: {normalized}"
            );
        }
    }

    #[test]
    fn short_query_returned_verbatim() {
        assert_eq!(normalize_query("AI"), "AI");
        assert_eq!(normalize_query("What is it?"), "What is it?");
    }

    #[test]
    fn single_surviving_token_returns_raw() {
        assert_eq!(normalize_query("What is BERT?"), "What is BERT?");
    }

    #[test]
    fn short_tokens_dropped() {
        assert_eq!(normalize_query("ML on 3D point clouds"), "point clouds");
    }

    #[test]
    fn hyphenated_words_split() {
        assert_eq!(
            normalize_query("state-of-the-art object detection"),
            "state art object detection"
        );
    }

    #[test]
    fn empty_query_returns_empty() {
        assert_eq!(normalize_query(""), "");
        assert_eq!(normalize_query("   "), "   ");
    }

    #[test]
    fn underscore_is_a_word_character() {
        assert_eq!(normalize_query("snake_case identifiers"), "snake_case identifiers");
    }
}
