//! Per-run connection sharing, grouped by source host.
//!
//! [`SessionPool::assign`] walks the configured sources in order and opens
//! at most one [`ConnectionContext`] per distinct host. Sources are paired
//! with their context by lookup ([`SessionPool::context_for`]); the context
//! is never stored on the source, so concurrent runs cannot alias each
//! other's connections.
//!
//! Every opened context is released exactly once: explicitly through
//! [`SessionPool::close`], or on drop if a run unwinds before closing.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::{build_client, transport_error};
use crate::source::Source;
use crate::types::SessionSummary;

/// Grouping key for a host: its serialised origin.
///
/// Case, default ports and trailing slashes do not create a new group.
/// Hosts rejected by [`parse_origin`] fall back to the raw string without
/// trailing slashes, so they never share a group with a valid origin.
pub fn host_key(host: &str) -> String {
    match parse_origin(host) {
        Ok(origin) => origin.origin().ascii_serialization(),
        Err(_) => host.trim_end_matches('/').to_owned(),
    }
}

/// Parse `host` as a bare http(s) origin: scheme and authority only.
///
/// # Errors
///
/// Returns [`SearchError::ConnectionContext`] if `host` does not parse, is
/// not http(s), or carries a path, query or fragment.
pub fn parse_origin(host: &str) -> Result<Url, SearchError> {
    let origin = Url::parse(host)
        .map_err(|e| SearchError::ConnectionContext(format!("{host}: invalid host: {e}")))?;
    if !matches!(origin.scheme(), "http" | "https") || origin.host_str().is_none() {
        return Err(SearchError::ConnectionContext(format!(
            "{host}: host must be an http(s) origin"
        )));
    }
    if origin.path() != "/" || origin.query().is_some() || origin.fragment().is_some() {
        return Err(SearchError::ConnectionContext(format!(
            "{host}: host must not carry a path, query or fragment"
        )));
    }
    Ok(origin)
}

/// A shared, concurrency-safe transport bound to one host origin.
#[derive(Debug)]
pub struct ConnectionContext {
    host: String,
    origin: Url,
    client: reqwest::Client,
}

impl ConnectionContext {
    /// Open a context for `host` using the run's transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ConnectionContext`] if `host` is rejected by
    /// [`parse_origin`] or the HTTP client cannot be built.
    pub fn open(host: &str, config: &SearchConfig) -> Result<Self, SearchError> {
        let origin = parse_origin(host)?;
        let client = build_client(config)
            .map_err(|e| SearchError::ConnectionContext(format!("{host}: {e}")))?;

        Ok(Self {
            host: host_key(host),
            origin,
            client,
        })
    }

    /// The host this context serves.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `GET` `path_with_query` on this host and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Timeout`] if the per-request timeout elapses
    /// - [`SearchError::Network`] for transport failures and non-success statuses
    /// - [`SearchError::MalformedResponse`] if the body is not valid JSON
    pub async fn get_json(&self, path_with_query: &str) -> Result<Value, SearchError> {
        let url = self.origin.join(path_with_query).map_err(|e| {
            SearchError::Network(format!(
                "{}: invalid request path `{path_with_query}`: {e}",
                self.host
            ))
        })?;

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&self.host, e))?
            .error_for_status()
            .map_err(|e| transport_error(&self.host, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&self.host, e))?;

        tracing::trace!(host = %self.host, bytes = body.len(), "source response received");

        serde_json::from_str(&body).map_err(|e| {
            SearchError::MalformedResponse(format!("{}: invalid JSON body: {e}", self.host))
        })
    }
}

/// The connection contexts of one aggregation run, keyed by host.
#[derive(Debug, Default)]
pub struct SessionPool {
    contexts: HashMap<String, ConnectionContext>,
    failures: HashMap<String, SearchError>,
    opened: usize,
    released: usize,
}

impl SessionPool {
    /// Open one context per distinct host among `sources`.
    ///
    /// Hosts whose context cannot be opened are remembered as failures;
    /// every source on such a host gets the same error from
    /// [`SessionPool::context_for`].
    pub fn assign(sources: &[Arc<dyn Source>], config: &SearchConfig) -> Self {
        let mut pool = Self::default();

        for source in sources {
            let key = host_key(source.host());
            if pool.contexts.contains_key(&key) || pool.failures.contains_key(&key) {
                continue;
            }
            match ConnectionContext::open(source.host(), config) {
                Ok(context) => {
                    tracing::debug!(host = %key, "opened connection context");
                    pool.opened += 1;
                    pool.contexts.insert(key, context);
                }
                Err(err) => {
                    tracing::warn!(host = %key, error = %err, "connection context unavailable");
                    pool.failures.insert(key, err);
                }
            }
        }

        pool
    }

    /// The context assigned to `host`.
    ///
    /// # Errors
    ///
    /// Returns the host's [`SearchError::ConnectionContext`] failure, or a
    /// new one if `host` was not among the assigned sources.
    pub fn context_for(&self, host: &str) -> Result<&ConnectionContext, SearchError> {
        let key = host_key(host);
        if let Some(context) = self.contexts.get(&key) {
            return Ok(context);
        }
        Err(self.failures.get(&key).cloned().unwrap_or_else(|| {
            SearchError::ConnectionContext(format!("{key}: no context assigned for host"))
        }))
    }

    /// Number of contexts opened so far.
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Number of distinct hosts seen, including failed ones.
    pub fn host_count(&self) -> usize {
        self.contexts.len() + self.failures.len()
    }

    /// Release every open context and report the run's bookkeeping.
    pub fn close(mut self) -> SessionSummary {
        self.release_all();
        SessionSummary {
            opened: self.opened,
            released: self.released,
        }
    }

    fn release_all(&mut self) {
        for (host, context) in self.contexts.drain() {
            drop(context);
            self.released += 1;
            tracing::debug!(host = %host, "released connection context");
        }
    }
}

impl Drop for SessionPool {
    fn drop(&mut self) {
        self.release_all();
    }
}
