//! Transport configuration for aggregation runs.
//!
//! [`SearchConfig`] controls how connection contexts are built (timeouts,
//! User-Agent, idle pooling) and how large each source's URL memo may grow.
//! The source list itself is not part of this type; it is passed to
//! [`crate::run_aggregation`] alongside it.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// User-Agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("wprdc-search/", env!("CARGO_PKG_VERSION"));

/// Configuration for an aggregation run.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-request timeout in seconds. A timed-out source fails on its own;
    /// siblings keep running.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, [`DEFAULT_USER_AGENT`] is used.
    pub user_agent: Option<String>,
    /// How long an idle pooled connection is kept within a run, in seconds.
    pub pool_idle_timeout_seconds: u64,
    /// Maximum number of distinct queries memoised per source.
    pub url_cache_capacity: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 8,
            user_agent: None,
            pool_idle_timeout_seconds: 90,
            url_cache_capacity: 256,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `url_cache_capacity` must be greater than 0
    /// - `user_agent`, when set, must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.url_cache_capacity == 0 {
            return Err(SearchError::Config(
                "url_cache_capacity must be greater than 0".into(),
            ));
        }
        if self
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.trim().is_empty())
        {
            return Err(SearchError::Config("user_agent must not be blank".into()));
        }
        Ok(())
    }

    /// The User-Agent that connection contexts will send.
    pub fn effective_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
