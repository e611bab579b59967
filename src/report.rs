//! Plain-text rendering of ranked papers for the terminal.

use std::fmt::Write as _;

use paper_search::{RankedPaper, SearchOutcome};

use crate::query_analysis::QueryAnalysis;

/// Authors listed before the rest are folded into "et al.".
const MAX_AUTHORS: usize = 3;

/// Join authors, shortening long lists to the first three plus "et al.".
pub fn format_authors(authors: &[String]) -> String {
    match authors.len() {
        0 => "Unknown authors".to_string(),
        n if n <= MAX_AUTHORS => authors.join(", "),
        _ => format!("{} et al.", authors[..MAX_AUTHORS].join(", ")),
    }
}

fn render_paper(out: &mut String, rank: usize, paper: &RankedPaper) {
    let _ = writeln!(out, "{rank}. {}", paper.title);
    let _ = writeln!(out, "   Authors: {}", format_authors(&paper.authors));
    let _ = writeln!(out, "   Relevance: {:.3}", paper.relevance_score);
    if !paper.published_date.is_empty() {
        let _ = writeln!(out, "   Published: {}", paper.published_date);
    }
    if !paper.categories.is_empty() {
        let _ = writeln!(out, "   Categories: {}", paper.categories.join(", "));
    }
    if !paper.url.is_empty() {
        let _ = writeln!(out, "   URL: {}", paper.url);
    }
}

/// Render a search outcome as a numbered listing.
pub fn render_outcome(query: &str, outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    if outcome.papers.is_empty() {
        let _ = writeln!(out, "No papers found for \"{query}\".");
        return out;
    }

    let _ = writeln!(
        out,
        "Showing {} of {} papers for \"{query}\"\n",
        outcome.papers.len(),
        outcome.total
    );
    for (index, paper) in outcome.papers.iter().enumerate() {
        render_paper(&mut out, index + 1, paper);
        out.push('\n');
    }
    out
}

/// Render a query analysis and its normalised provider query.
pub fn render_analysis(analysis: &QueryAnalysis, normalized: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Intent: {}", analysis.intent);
    let _ = writeln!(out, "Complexity: {}", analysis.complexity);
    let _ = writeln!(out, "Needs comparison: {}", analysis.needs_comparison);
    let _ = writeln!(out, "Keywords: {}", analysis.keywords.join(", "));
    let _ = writeln!(out, "Provider query: {normalized}");
    out
}
