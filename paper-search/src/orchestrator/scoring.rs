//! Relevance scoring against the original query.
//!
//! Primary metric: TF-IDF cosine similarity between `title + " " + abstract`
//! and the query (see [`super::tfidf`]). When no vector space can be built
//! for the batch, every paper is scored by keyword overlap instead, so that
//! scores within one ranking are always comparable.

use std::cmp::Ordering;

use crate::types::RankedPaper;

use super::tfidf::try_vectorize;

/// Which metric produced the scores of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMethod {
    /// TF-IDF cosine similarity.
    Tfidf,
    /// Fraction of query tokens found in the paper text.
    KeywordOverlap,
}

fn document_text(paper: &RankedPaper) -> String {
    format!("{} {}", paper.title, paper.abstract_text)
}

/// Fraction of distinct lowercase query tokens that occur as substrings of
/// the lowercased `text`. Zero for a query with no tokens.
pub fn keyword_overlap(query: &str, text: &str) -> f64 {
    let lowered_query = query.to_lowercase();
    let mut keywords: Vec<&str> = lowered_query.split_whitespace().collect();
    keywords.sort_unstable();
    keywords.dedup();
    if keywords.is_empty() {
        return 0.0;
    }

    let text = text.to_lowercase();
    let matches = keywords.iter().filter(|kw| text.contains(*kw)).count();
    matches as f64 / keywords.len() as f64
}

/// Populate `relevance_score` on every paper, returning the metric used.
///
/// Order is unchanged. An empty batch is returned untouched and no metric is
/// evaluated.
pub fn score_papers_with_method(
    mut papers: Vec<RankedPaper>,
    query: &str,
) -> (Vec<RankedPaper>, Option<ScoringMethod>) {
    if papers.is_empty() {
        return (papers, None);
    }

    let documents: Vec<String> = papers.iter().map(document_text).collect();
    match try_vectorize(&documents, query) {
        Ok(scores) => {
            for (paper, score) in papers.iter_mut().zip(scores) {
                paper.relevance_score = score;
            }
            (papers, Some(ScoringMethod::Tfidf))
        }
        Err(err) => {
            tracing::warn!(error = %err, papers = papers.len(), "TF-IDF scoring failed, using keyword overlap");
            for (paper, document) in papers.iter_mut().zip(&documents) {
                paper.relevance_score = keyword_overlap(query, document);
            }
            (papers, Some(ScoringMethod::KeywordOverlap))
        }
    }
}

/// Populate `relevance_score` on every paper without reordering.
pub fn score_papers(papers: Vec<RankedPaper>, query: &str) -> Vec<RankedPaper> {
    score_papers_with_method(papers, query).0
}

/// Stable sort by `relevance_score`, highest first. Ties keep input order.
pub fn sort_by_relevance(papers: &mut [RankedPaper]) {
    papers.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
}
