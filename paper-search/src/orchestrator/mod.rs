//! Search aggregator: normalise, fan out, dedup, score, rank.
//!
//! This module sends a normalised query to each provider in turn,
//! deduplicates the merged results by title, scores them against the
//! original query with TF-IDF cosine similarity (keyword overlap as a
//! whole-batch fallback), and returns a sorted, truncated result set.

pub mod dedup;
pub mod normalize;
pub mod scoring;
pub mod search;
pub mod stopwords;
pub mod tfidf;
