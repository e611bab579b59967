//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls result limits, timeouts, request pacing and
//! provider endpoints. The defaults match the public provider APIs and a
//! polite one-second gap between outbound requests.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Default number of papers returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Base URLs of the four providers.
///
/// Overridable so that tests and self-hosted mirrors can redirect traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    pub arxiv: String,
    pub serper: String,
    pub semantic_scholar: String,
    pub crossref: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            arxiv: "http://export.arxiv.org".into(),
            serper: "https://google.serper.dev".into(),
            semantic_scholar: "https://api.semanticscholar.org".into(),
            crossref: "https://api.crossref.org".into(),
        }
    }
}

impl ProviderEndpoints {
    /// Point every provider at the same base URL.
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            arxiv: base.clone(),
            serper: base.clone(),
            semantic_scholar: base.clone(),
            crossref: base,
        }
    }

    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("arxiv", &self.arxiv),
            ("serper", &self.serper),
            ("semantic_scholar", &self.semantic_scholar),
            ("crossref", &self.crossref),
        ]
    }
}

/// Configuration for the paper search engine.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default number of papers returned when the caller does not specify one.
    pub max_results: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Fixed pause in milliseconds between consecutive outbound requests.
    pub request_delay_ms: u64,
    /// Custom User-Agent string. If `None`, a fixed crate agent is used.
    pub user_agent: Option<String>,
    /// Provider base URLs.
    pub endpoints: ProviderEndpoints,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            timeout_seconds: 15,
            request_delay_ms: 1000,
            user_agent: None,
            endpoints: ProviderEndpoints::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - every endpoint must be an absolute URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        for (name, endpoint) in self.endpoints.entries() {
            Url::parse(endpoint).map_err(|e| {
                SearchError::Config(format!("invalid {name} endpoint {endpoint:?}: {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 20);
        assert_eq!(config.timeout_seconds, 15);
        assert_eq!(config.request_delay_ms, 1000);
        assert!(config.user_agent.is_none());
        assert_eq!(config.endpoints.arxiv, "http://export.arxiv.org");
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn relative_endpoint_rejected() {
        let config = SearchConfig {
            endpoints: ProviderEndpoints {
                crossref: "api.crossref.org".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("crossref"));
    }

    #[test]
    fn zero_delay_valid() {
        let config = SearchConfig {
            request_delay_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn all_endpoints_share_base() {
        let endpoints = ProviderEndpoints::all("http://127.0.0.1:8080");
        assert_eq!(endpoints.arxiv, endpoints.crossref);
        assert_eq!(endpoints.serper, "http://127.0.0.1:8080");
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"request_delay_ms": 0}"#).expect("deserialize");
        assert_eq!(config.request_delay_ms, 0);
        assert_eq!(config.timeout_seconds, 15);
        assert_eq!(config.endpoints, ProviderEndpoints::default());
    }
}
