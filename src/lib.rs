//! Scholar: a research assistant front end over multi-source paper search.
//!
//! This crate wires the `paper-search` engine to a command line:
//! Query → analysis → normalised provider query → search → ranked listing
//!
//! # Architecture
//!
//! - **Config**: TOML file plus environment API keys (`config`)
//! - **Query analysis**: intent, complexity and follow-up detection
//!   (`query_analysis`)
//! - **Search**: arXiv, Serper, Semantic Scholar and CrossRef, deduplicated
//!   and ranked by TF-IDF similarity (`paper_search`)
//! - **Report**: plain-text rendering of ranked papers (`report`)
//! - **Chat**: multi-turn sessions that carry context into follow-ups
//!   (`chat`)

pub mod chat;
pub mod config;
pub mod error;
pub mod query_analysis;
pub mod report;

pub use chat::{ChatReply, ChatSession};
pub use config::ScholarConfig;
pub use error::{Result, ScholarError};
pub use paper_search::{PaperSearch, RankedPaper, SearchOutcome};
pub use query_analysis::{analyze_query, ConversationHistory, QueryAnalysis};

/// Build a search engine from a loaded configuration.
///
/// # Errors
///
/// Returns [`ScholarError::Search`] if the search settings are invalid.
pub fn build_engine(config: &ScholarConfig) -> Result<PaperSearch> {
    Ok(PaperSearch::new(
        config.search.clone(),
        config.credentials.to_provider_credentials(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_builds_from_default_config() {
        assert!(build_engine(&ScholarConfig::default()).is_ok());
    }

    #[test]
    fn engine_rejects_invalid_search_config() {
        let mut config = ScholarConfig::default();
        config.search.max_results = 0;
        assert!(matches!(build_engine(&config), Err(ScholarError::Search(_))));
    }
}
