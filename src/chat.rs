//! Multi-turn research sessions.
//!
//! A [`ChatSession`] keeps the last few answered queries so that short or
//! referential follow-ups ("tell me more", "why?") are searched together
//! with the topic they refer to.

use paper_search::{PaperSearch, SearchOutcome};

use crate::config::ScholarConfig;
use crate::error::Result;
use crate::query_analysis::{
    analyze_query, contextualize_query, ConversationHistory, ConversationTurn, QueryAnalysis,
};

/// Longest turn summary kept in the history, in characters.
const MAX_SUMMARY_CHARS: usize = 500;

/// One answered question.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// The query actually searched: the user's query, or the query prefixed
    /// with recent context when it is a follow-up.
    pub contextualized: String,
    pub analysis: QueryAnalysis,
    pub outcome: SearchOutcome,
}

/// A search engine plus bounded conversation history.
pub struct ChatSession {
    engine: PaperSearch,
    history: ConversationHistory,
    max_results: usize,
}

impl ChatSession {
    pub fn new(engine: PaperSearch, history_capacity: usize, max_results: usize) -> Self {
        Self {
            engine,
            history: ConversationHistory::new(history_capacity),
            max_results,
        }
    }

    /// Build a session from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScholarError::Search`] if the search settings are invalid.
    pub fn from_config(config: &ScholarConfig) -> Result<Self> {
        Ok(Self::new(
            crate::build_engine(config)?,
            config.analysis.max_conversation_history,
            config.search.max_results,
        ))
    }

    /// Override the number of papers returned per question.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Answer `query`, then record it in the history.
    ///
    /// Blank queries are answered with an empty outcome and not recorded.
    pub async fn ask(&mut self, query: &str) -> ChatReply {
        if query.trim().is_empty() {
            return ChatReply {
                contextualized: String::new(),
                analysis: analyze_query(query),
                outcome: SearchOutcome::empty(),
            };
        }

        let contextualized = contextualize_query(query, &self.history);
        if contextualized != query {
            tracing::debug!(%contextualized, "follow-up query");
        }
        let analysis = analyze_query(&contextualized);
        let outcome = self
            .engine
            .search_papers(&contextualized, self.max_results)
            .await;

        self.history
            .push(ConversationTurn::new(query, summarize(&outcome)));

        ChatReply {
            contextualized,
            analysis,
            outcome,
        }
    }
}

/// Short description of an outcome for the history.
fn summarize(outcome: &SearchOutcome) -> String {
    let mut summary = format!("{} papers", outcome.total);
    if !outcome.papers.is_empty() {
        let titles: Vec<&str> = outcome.papers.iter().map(|p| p.title.as_str()).collect();
        summary.push_str("; top: ");
        summary.push_str(&titles.join("; "));
    }
    if summary.chars().count() > MAX_SUMMARY_CHARS {
        summary = summary.chars().take(MAX_SUMMARY_CHARS).collect();
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use paper_search::{ProviderResult, RankedPaper, Source};

    fn outcome(titles: &[&str], total: usize) -> SearchOutcome {
        SearchOutcome {
            papers: titles
                .iter()
                .map(|t| RankedPaper::from(ProviderResult::new(*t, "", "", Source::Crossref)))
                .collect(),
            total,
        }
    }

    #[test]
    fn summary_lists_titles() {
        assert_eq!(summarize(&outcome(&["A", "B"], 7)), "7 papers; top: A; B");
    }

    #[test]
    fn empty_outcome_summary() {
        assert_eq!(summarize(&SearchOutcome::empty()), "0 papers");
    }

    #[test]
    fn long_summary_truncated() {
        let title = "x".repeat(600);
        let summary = summarize(&outcome(&[title.as_str()], 1));
        assert_eq!(summary.chars().count(), MAX_SUMMARY_CHARS + 3);
        assert!(summary.ends_with("..."));
    }
}
