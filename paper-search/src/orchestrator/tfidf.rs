//! TF-IDF vector space and cosine similarity.
//!
//! A small, self-contained vectoriser: word unigrams and bigrams, English
//! stop-word removal, document-frequency pruning, a feature cap, sublinear
//! term frequency and smoothed inverse document frequency, with every row
//! L2-normalised. Accents are folded before tokenising, so "Schrödinger"
//! and "Schrodinger" are the same term. The model is built for one document
//! set and dropped afterwards.

use std::collections::{BTreeMap, HashMap};

use unicode_normalization::UnicodeNormalization;

use super::normalize::is_word_char;
use super::stopwords::is_stop_word;

/// Maximum number of features kept in the vocabulary.
pub const MAX_FEATURES: usize = 10_000;

/// Terms appearing in more than this fraction of documents are ignored.
pub const MAX_DF: f64 = 0.95;

/// Why a vector space could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// No document produced a single usable term.
    #[error("empty vocabulary: documents contain only stop words or no words")]
    EmptyVocabulary,

    /// Every term was removed by document-frequency pruning.
    #[error("all terms pruned: no term remains after document-frequency limits")]
    AllTermsPruned,
}

/// NFKD-decompose `text` and drop combining marks.
fn fold_accents(text: &str) -> String {
    text.nfkd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect()
}

/// Split `text` into lowercase, accent-folded tokens of at least two word
/// characters, dropping stop words.
fn tokenize(text: &str) -> Vec<String> {
    let lowered = fold_accents(text).to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Term counts for the unigrams and bigrams of one document.
fn term_counts(text: &str) -> HashMap<String, usize> {
    let tokens = tokenize(text);
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in &tokens {
        *counts.entry(token.clone()).or_default() += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }
    counts
}

/// A fitted TF-IDF matrix: one sparse, L2-normalised row per document.
#[derive(Debug)]
pub struct TfidfMatrix {
    rows: Vec<BTreeMap<usize, f64>>,
    features: usize,
}

impl TfidfMatrix {
    /// Fit the vectoriser on `documents` and transform them.
    ///
    /// # Errors
    ///
    /// [`ScoringError::EmptyVocabulary`] when no document has a usable
    /// term, [`ScoringError::AllTermsPruned`] when the document-frequency
    /// bound removes every term.
    pub fn fit_transform(documents: &[String]) -> Result<Self, ScoringError> {
        let counts: Vec<HashMap<String, usize>> =
            documents.iter().map(|doc| term_counts(doc)).collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, count) in doc {
                *document_frequency.entry(term.as_str()).or_default() += 1;
                *corpus_frequency.entry(term.as_str()).or_default() += count;
            }
        }
        if document_frequency.is_empty() {
            return Err(ScoringError::EmptyVocabulary);
        }

        let max_doc_count = MAX_DF * documents.len() as f64;
        let mut kept: Vec<(&str, usize)> = document_frequency
            .iter()
            .filter(|(_, df)| (**df as f64) <= max_doc_count)
            .map(|(term, _)| (*term, corpus_frequency.get(term).copied().unwrap_or(0)))
            .collect();
        if kept.is_empty() {
            return Err(ScoringError::AllTermsPruned);
        }

        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(MAX_FEATURES);
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let vocabulary: HashMap<&str, usize> = kept
            .iter()
            .enumerate()
            .map(|(index, (term, _))| (*term, index))
            .collect();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = kept
            .iter()
            .map(|(term, _)| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: BTreeMap<usize, f64> = doc
                    .iter()
                    .filter_map(|(term, count)| {
                        let index = *vocabulary.get(term.as_str())?;
                        let tf = 1.0 + (*count as f64).ln();
                        Some((index, tf * idf[index]))
                    })
                    .collect();
                let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.values_mut().for_each(|w| *w /= norm);
                }
                row
            })
            .collect();

        Ok(Self {
            rows,
            features: kept.len(),
        })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Vocabulary size after pruning and capping.
    pub fn features(&self) -> usize {
        self.features
    }

    /// Cosine similarity of rows `a` and `b`, clamped to `[0, 1]`.
    ///
    /// Rows are unit length (or empty), so this is their dot product.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        let (Some(left), Some(right)) = (self.rows.get(a), self.rows.get(b)) else {
            return 0.0;
        };
        let (small, large) = if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        };
        let dot: f64 = small
            .iter()
            .filter_map(|(index, weight)| large.get(index).map(|other| weight * other))
            .sum();
        dot.clamp(0.0, 1.0)
    }
}

/// Cosine similarity of `query` against each of `documents`.
///
/// The query is fitted together with the documents as the last row.
///
/// # Errors
///
/// Propagates [`ScoringError`] from [`TfidfMatrix::fit_transform`].
pub fn try_vectorize(documents: &[String], query: &str) -> Result<Vec<f64>, ScoringError> {
    let mut corpus = documents.to_vec();
    corpus.push(query.to_string());
    let matrix = TfidfMatrix::fit_transform(&corpus)?;
    let query_row = matrix.len() - 1;
    Ok((0..documents.len())
        .map(|row| matrix.cosine(query_row, row))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn tokenizer_drops_stop_words_and_single_chars() {
        assert_eq!(
            tokenize("The Transformer: a model of attention, x 2"),
            vec!["transformer", "model", "attention"]
        );
    }

    #[test]
    fn accents_are_folded() {
        assert_eq!(fold_accents("Schrödinger café"), "Schrodinger cafe");
        assert_eq!(tokenize("Schrödinger equation"), tokenize("schrodinger equation"));
    }

    #[test]
    fn accented_query_matches_unaccented_document() {
        let documents = docs(&[
            "Schrodinger equation solvers",
            "Protein folding dynamics",
            "Soil moisture in alpine meadows",
        ]);
        let scores = try_vectorize(&documents, "Schrödinger equation").expect("vectorize");
        assert!(scores[0] > 0.0);
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn bigrams_use_adjacent_surviving_tokens() {
        let counts = term_counts("graph of neural networks");
        assert_eq!(counts.get("graph neural"), Some(&1));
        assert_eq!(counts.get("neural networks"), Some(&1));
        assert!(!counts.contains_key("graph networks"));
    }

    #[test]
    fn relevant_document_scores_higher() {
        let documents = docs(&[
            "Graph neural networks for molecule property prediction",
            "Convolutional networks for image classification",
            "A history of medieval agriculture in Europe",
        ]);
        let scores = try_vectorize(&documents, "graph neural networks").expect("vectorize");
        assert_eq!(scores.len(), 3);
        assert!(scores[0] > scores[1]);
        assert!(scores[1] >= scores[2]);
        assert!(scores[2].abs() < f64::EPSILON);
    }

    #[test]
    fn scores_lie_in_unit_interval() {
        let documents = docs(&[
            "quantum computing with superconducting qubits",
            "quantum error correction codes",
            "classical computing architectures",
            "qubits",
        ]);
        let scores = try_vectorize(&documents, "quantum computing qubits").expect("vectorize");
        for score in scores {
            assert!((0.0..=1.0).contains(&score), "{score}");
        }
    }

    #[test]
    fn stop_word_only_corpus_is_empty_vocabulary() {
        let documents = docs(&["the and of", "a an the"]);
        assert_eq!(
            try_vectorize(&documents, "of the").unwrap_err(),
            ScoringError::EmptyVocabulary
        );
    }

    #[test]
    fn terms_in_every_document_are_pruned() {
        let documents = docs(&["transformers"]);
        assert_eq!(
            try_vectorize(&documents, "transformers").unwrap_err(),
            ScoringError::AllTermsPruned
        );
    }

    #[test]
    fn rows_are_unit_length() {
        let matrix = TfidfMatrix::fit_transform(&docs(&[
            "sparse attention transformers",
            "dense retrieval models",
            "retrieval augmented generation",
        ]))
        .expect("fit");
        for row in 0..matrix.len() {
            assert!((matrix.cosine(row, row) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn feature_count_reported() {
        let matrix =
            TfidfMatrix::fit_transform(&docs(&["alpha beta", "gamma delta"])).expect("fit");
        // four unigrams and two bigrams
        assert_eq!(matrix.features(), 6);
    }

    #[test]
    fn out_of_range_rows_have_zero_similarity() {
        let matrix = TfidfMatrix::fit_transform(&docs(&["alpha", "beta"])).expect("fit");
        assert_eq!(matrix.cosine(0, 7), 0.0);
    }

    #[test]
    fn error_messages_are_stable() {
        assert!(ScoringError::EmptyVocabulary.to_string().starts_with("empty vocabulary"));
        assert!(ScoringError::AllTermsPruned.to_string().starts_with("all terms pruned"));
    }
}
