//! Keyword-based intent detection and follow-up handling for user queries.
//!
//! The analysis is deliberately shallow: substring checks against fixed
//! keyword lists decide whether the user wants a literature search, an
//! in-depth analysis or a comparison, and whether a query continues the
//! previous conversation.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ANALYZE_KEYWORDS: &[&str] = &[
    "analyze", "explain", "understand", "insights", "examine", "evaluate",
    "assess", "interpret", "investigate", "study", "breakdown", "dissect",
    "clarify", "describe", "elaborate", "detail",
];

const COMPARE_KEYWORDS: &[&str] = &[
    "compare", "difference", "versus", "vs", "contrast", "distinguish",
    "differentiate", "between", "relative", "similarities", "differences",
    "comparison", "relate", "correlation", "against",
];

const FOLLOWUP_INDICATORS: &[&str] = &[
    "tell me more", "give me more", "explain further", "more details", "elaborate",
    "what about", "how about", "why", "how", "when", "where",
    "this", "that", "these", "those", "it", "they", "them",
    "above", "previous", "mentioned", "discussed", "earlier",
    "compare", "difference", "versus", "vs", "contrast",
    "similar", "different", "same", "like",
    "additionally", "furthermore", "besides", "in addition",
    "but", "however", "still", "yet", "then", "next",
];

const QUESTION_STARTERS: &[&str] = &[
    "what", "how", "why", "which", "when", "where", "is", "are", "can", "could", "would",
];

/// What the user wants done with the papers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Search,
    Analyze,
    Compare,
}

/// Rough size of the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::Analyze => "analyze",
            Self::Compare => "compare",
        })
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        })
    }
}

/// Result of [`analyze_query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub intent: Intent,
    pub complexity: Complexity,
    /// Whitespace-separated words of the raw query.
    pub keywords: Vec<String>,
    pub needs_comparison: bool,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Classify a query by intent and complexity.
///
/// Analysis keywords take precedence over comparison keywords. Matching is
/// by substring, so "vs" also fires inside longer words.
pub fn analyze_query(query: &str) -> QueryAnalysis {
    let lowered = query.to_lowercase();
    let needs_comparison = contains_any(&lowered, COMPARE_KEYWORDS);

    let intent = if contains_any(&lowered, ANALYZE_KEYWORDS) {
        Intent::Analyze
    } else if needs_comparison {
        Intent::Compare
    } else {
        Intent::Search
    };

    let keywords: Vec<String> = query.split_whitespace().map(str::to_string).collect();
    let complexity = match keywords.len() {
        n if n < 5 => Complexity::Simple,
        n if n > 15 => Complexity::Complex,
        _ => Complexity::Medium,
    };

    QueryAnalysis {
        intent,
        complexity,
        keywords,
        needs_comparison,
    }
}

/// One answered query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub query: String,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(query: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            summary: summary.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded history of recent turns; the oldest turn is evicted first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        if self.capacity == 0 {
            return;
        }
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Turns from oldest to newest.
    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }
}

/// Whether `query` continues the conversation in `history`.
///
/// Always false with no history. Otherwise true when the query contains a
/// follow-up indicator, has fewer than three words, or is a short question.
pub fn is_followup_query(query: &str, history: &ConversationHistory) -> bool {
    if history.is_empty() {
        return false;
    }

    let lowered = query.trim().to_lowercase();
    let words = query.split_whitespace().count();
    let starts_with_question = QUESTION_STARTERS
        .iter()
        .any(|starter| lowered.starts_with(starter));

    contains_any(&lowered, FOLLOWUP_INDICATORS) || words < 3 || (starts_with_question && words < 5)
}

/// Prefix a follow-up query with the last two queries as context.
///
/// Non-follow-up queries are returned unchanged.
pub fn contextualize_query(query: &str, history: &ConversationHistory) -> String {
    if !is_followup_query(query, history) {
        return query.to_string();
    }

    let recent: Vec<String> = history
        .turns()
        .skip(history.len().saturating_sub(2))
        .map(|turn| turn.query.to_lowercase())
        .collect();

    format!("Context: {} \nCurrent question: {query}", recent.join(" "))
}
