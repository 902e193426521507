//! HTTP client construction and transport error mapping.
//!
//! Each connection context wraps one [`reqwest::Client`]. The client pools
//! connections internally and is safe to use from many concurrent requests,
//! which is what lets sources on the same host share it.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Build a [`reqwest::Client`] for one source host.
///
/// The client has:
/// - Per-request timeout from config
/// - Idle connection pooling bounded by `pool_idle_timeout_seconds`
/// - The configured (or default) User-Agent
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::ConnectionContext`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_seconds))
        .user_agent(config.effective_user_agent())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::ConnectionContext(format!("failed to build HTTP client: {e}")))
}

/// Map a reqwest failure for `host` onto the search error taxonomy.
pub(crate) fn transport_error(host: &str, err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("{host}: {err}"))
    } else {
        SearchError::Network(format!("{host}: {err}"))
    }
}
