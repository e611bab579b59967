//! Configuration types for the research assistant.
//!
//! Stored as TOML at [`ScholarConfig::default_config_path`]. Provider API
//! keys may also come from the environment, which wins over the file.

use std::path::{Path, PathBuf};

use paper_search::{ProviderCredentials, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScholarError};

/// Environment variable holding the Serper.dev API key.
pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";
/// Environment variable holding the Semantic Scholar API key.
pub const SEMANTIC_SCHOLAR_API_KEY_ENV: &str = "SEMANTIC_SCHOLAR_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarConfig {
    pub search: SearchConfig,
    pub credentials: CredentialsConfig,
    pub analysis: AnalysisConfig,
}

/// Provider API keys as written in the config file.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serper_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_scholar_api_key: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Reuse the redacting Debug of the engine's credential type.
        std::fmt::Debug::fmt(&self.to_provider_credentials(), f)
    }
}

impl CredentialsConfig {
    /// Convert to the engine's credential holder. Empty keys become absent.
    pub fn to_provider_credentials(&self) -> ProviderCredentials {
        ProviderCredentials::new(
            self.serper_api_key.clone(),
            self.semantic_scholar_api_key.clone(),
        )
    }

    /// Override keys with values from `lookup`; empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(SERPER_API_KEY_ENV) {
            self.serper_api_key = Some(key);
        }
        if let Some(key) = non_empty(SEMANTIC_SCHOLAR_API_KEY_ENV) {
            self.semantic_scholar_api_key = Some(key);
        }
    }
}

/// Query-analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of past turns kept for follow-up detection.
    pub max_conversation_history: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_conversation_history: 5,
        }
    }
}

impl ScholarConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScholarError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScholarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/scholar/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("scholar").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("scholar")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/scholar-config/config.toml")
        }
    }

    /// Load from `path`, or from the default path when `None`.
    ///
    /// A missing default file yields the default configuration; an explicit
    /// path must exist. Environment keys are applied afterwards, and the
    /// search section is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or invalid, or the search
    /// settings fail validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        config
            .credentials
            .apply_env_with(|name| std::env::var(name).ok());
        config.search.validate()?;
        Ok(config)
    }
}
