//! Error types for the scholar front end.

/// Top-level error type for the research assistant.
#[derive(Debug, thiserror::Error)]
pub enum ScholarError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search engine construction error.
    #[error("search error: {0}")]
    Search(#[from] paper_search::SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScholarError>;
