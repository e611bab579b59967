//! Provider API keys.
//!
//! Every key is optional. A provider whose key is required but absent is
//! skipped for the whole search rather than called unauthenticated.

use std::fmt;

/// API keys for the providers that accept them.
///
/// [`Debug`] is implemented by hand and redacts all values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    /// Serper.dev key. Required by the Serper adapter.
    pub serper_api_key: Option<String>,
    /// Semantic Scholar key. Optional; raises the provider's rate limit.
    pub semantic_scholar_api_key: Option<String>,
}

impl ProviderCredentials {
    /// Build credentials, treating empty or whitespace-only keys as absent.
    pub fn new(serper_api_key: Option<String>, semantic_scholar_api_key: Option<String>) -> Self {
        Self {
            serper_api_key: non_empty(serper_api_key),
            semantic_scholar_api_key: non_empty(semantic_scholar_api_key),
        }
    }

    /// Credentials with no keys at all.
    pub fn none() -> Self {
        Self::default()
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("serper_api_key", &redact(&self.serper_api_key))
            .field(
                "semantic_scholar_api_key",
                &redact(&self.semantic_scholar_api_key),
            )
            .finish()
    }
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "[REDACTED]")
}

/// Treat empty or whitespace-only keys as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
