//! CLI binary for scholar.

use clap::{Parser, Subcommand};
use paper_search::normalize_query;
use scholar::{analyze_query, build_engine, report, ChatSession, ScholarConfig};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scholar: search and rank academic papers across several providers.
#[derive(Parser)]
#[command(name = "scholar", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search all providers and print ranked papers.
    Search {
        /// Natural-language research query.
        query: String,

        /// Maximum number of papers to show (defaults to the config value).
        #[arg(short = 'n', long)]
        max_results: Option<usize>,

        /// Print the outcome as JSON instead of a listing.
        #[arg(long)]
        json: bool,
    },

    /// Show how a query is classified and what providers will receive.
    Analyze {
        /// Natural-language research query.
        query: String,
    },

    /// Ask questions one per line on stdin; follow-ups reuse earlier queries.
    Chat {
        /// Maximum number of papers to show per question.
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so that `--json` output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scholar=info,paper_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ScholarConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Search {
            query,
            max_results,
            json,
        } => {
            let analysis = analyze_query(&query);
            info!(intent = %analysis.intent, complexity = %analysis.complexity, "query analysed");

            let engine = build_engine(&config)?;
            let limit = max_results.unwrap_or(config.search.max_results);
            let outcome = engine.search_papers(&query, limit).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", report::render_outcome(&query, &outcome));
            }
        }
        Command::Analyze { query } => {
            let analysis = analyze_query(&query);
            print!("{}", report::render_analysis(&analysis, &normalize_query(&query)));
        }
        Command::Chat { max_results } => {
            let mut session = ChatSession::from_config(&config)?;
            if let Some(limit) = max_results {
                session = session.with_max_results(limit);
            }
            eprintln!("Ask a research question (empty line or Ctrl-D to quit).");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let query = line.trim();
                if query.is_empty() {
                    break;
                }
                let reply = session.ask(query).await;
                info!(intent = %reply.analysis.intent, searched = %reply.contextualized, "question answered");
                print!("{}", report::render_outcome(query, &reply.outcome));
            }
        }
    }

    Ok(())
}
