//! Shared HTTP client and request pacing for provider calls.
//!
//! Every provider request in one search goes through a single
//! [`reqwest::Client`] carrying the configured timeout, and through one
//! [`Pacer`] that spaces consecutive requests by a fixed delay.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::Source;

/// User-Agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str =
    concat!("paper-search/", env!("CARGO_PKG_VERSION"), " (academic search)");

/// Build a [`reqwest::Client`] for provider APIs.
///
/// The client has:
/// - Per-request timeout from config
/// - Fixed User-Agent (or the configured override)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Spaces outbound requests of a single search by a fixed delay.
///
/// The first request goes out immediately; every later one waits
/// `delay` first. A pacer lives for exactly one search call.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    requests: usize,
}

impl Pacer {
    /// Create a pacer with the given inter-request delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay, requests: 0 }
    }

    /// Create a pacer from `config.request_delay_ms`.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(Duration::from_millis(config.request_delay_ms))
    }

    /// Wait until the next request may be sent.
    pub async fn wait(&mut self) {
        if self.requests > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.requests += 1;
    }

    /// Number of requests released so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

/// Per-call state handed to every provider adapter.
pub struct RequestContext<'a> {
    pub client: &'a reqwest::Client,
    pub config: &'a SearchConfig,
    pub pacer: Pacer,
}

impl<'a> RequestContext<'a> {
    pub fn new(client: &'a reqwest::Client, config: &'a SearchConfig) -> Self {
        Self {
            client,
            config,
            pacer: Pacer::from_config(config),
        }
    }

    /// Pace, send `request`, require a success status and return the body.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Timeout`] when the request exceeds the client
    /// timeout and [`SearchError::Http`] for connection failures and
    /// non-success statuses.
    pub async fn send(
        &mut self,
        source: Source,
        request: reqwest::RequestBuilder,
    ) -> Result<String, SearchError> {
        self.pacer.wait().await;
        let provider = source.name();

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http(format!("{provider} returned HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(provider, e))?;
        tracing::trace!(provider, bytes = body.len(), "response received");
        Ok(body)
    }
}
