//! Trait definition for pluggable paper providers.
//!
//! Each provider (arXiv, Serper, Semantic Scholar, CrossRef) implements
//! [`PaperProvider`] to turn a normalised query into provider requests and
//! parse the responses into [`ProviderResult`] values. The aggregator never
//! calls [`PaperProvider::fetch`] directly: it goes through
//! [`search_provider`], which turns every failure into an empty result set.

use crate::error::SearchError;
use crate::http::RequestContext;
use crate::types::{ProviderResult, Source};

/// A pluggable academic content provider.
///
/// Implementors handle their own:
///
/// - request construction (URL, query parameters, headers, body)
/// - response parsing via explicit serde mappings that default every
///   optional field
/// - splitting one logical search into several requests, if needed
///
/// All outbound requests must go through [`RequestContext::send`] so that
/// pacing applies uniformly.
pub trait PaperProvider: Send + Sync {
    /// Query the provider for up to `limit` results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if a request fails, times out, or its
    /// response cannot be parsed.
    fn fetch(
        &self,
        query: &str,
        limit: usize,
        ctx: &mut RequestContext<'_>,
    ) -> impl std::future::Future<Output = Result<Vec<ProviderResult>, SearchError>> + Send;

    /// Which provider this implementation talks to.
    fn source(&self) -> Source;

    /// Whether the provider has the credentials it needs.
    ///
    /// Unconfigured providers are skipped without any request.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Run a provider, converting every failure into an empty result set.
///
/// Unconfigured providers are skipped silently (debug log only); failures
/// are logged at warn level with the provider name.
pub async fn search_provider<P: PaperProvider>(
    provider: &P,
    query: &str,
    limit: usize,
    ctx: &mut RequestContext<'_>,
) -> Vec<ProviderResult> {
    let source = provider.source();
    if !provider.is_configured() {
        tracing::debug!(provider = %source, "provider not configured, skipping");
        return Vec::new();
    }

    match provider.fetch(query, limit, ctx).await {
        Ok(results) => {
            tracing::debug!(provider = %source, count = results.len(), "provider returned results");
            results
        }
        Err(err) => {
            tracing::warn!(provider = %source, error = %err, "provider query failed");
            Vec::new()
        }
    }
}
