//! Error types for the paper-search crate.
//!
//! Provider errors never leave the aggregation call: they are logged and the
//! offending provider contributes no results. Only configuration errors are
//! returned to callers, at construction time. No API keys appear in messages.

/// Errors that can occur while talking to a paper provider or building the engine.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request failed: connection error or non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A provider request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A provider response could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Classify a reqwest failure for the named provider.
    pub(crate) fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{provider} request timed out"))
        } else if err.is_decode() {
            Self::Parse(format!("{provider} response decode failed: {err}"))
        } else {
            Self::Http(format!("{provider} request failed: {err}"))
        }
    }
}

/// Convenience type alias for paper-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("arXiv request timed out".into());
        assert_eq!(err.to_string(), "request timed out: arXiv request timed out");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("unexpected end of feed".into());
        assert_eq!(err.to_string(), "parse error: unexpected end of feed");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("max_results must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: max_results must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
