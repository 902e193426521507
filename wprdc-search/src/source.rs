//! Trait definition for pluggable search sources.
//!
//! Each backend (the profiles directory, the open data catalogue)
//! implements [`Source`] to give the orchestrator a uniform way to build
//! request URLs and normalise responses. Sources never perform I/O
//! themselves: the orchestrator issues the request through the connection
//! context the session pool assigned to the source's host.

use serde_json::Value;

use crate::error::SearchError;
use crate::types::ResultRecord;

/// A configured backend that can be queried and produce [`ResultRecord`]s.
///
/// Implementations hold only immutable configuration (host, path) plus an
/// optional memo of built URLs, so every method is a pure function of the
/// query or the response body. All implementations must be `Send + Sync`
/// so one instance can serve concurrent runs.
pub trait Source: Send + Sync {
    /// Namespace used as the first component of every `uid`.
    fn name(&self) -> &str;

    /// Base origin (scheme + authority) used for connection grouping.
    fn host(&self) -> &str;

    /// Backend-specific resource path.
    fn path(&self) -> &str;

    /// Path and query string without the host, e.g. `/search?search=x`.
    ///
    /// The query is percent-encoded by the implementation.
    fn build_path_with_query(&self, query: &str) -> String;

    /// Full request URL: host followed by [`Source::build_path_with_query`].
    fn build_full_url(&self, query: &str) -> String {
        format!("{}{}", self.host(), self.build_path_with_query(query))
    }

    /// Extract records from a parsed response body.
    ///
    /// A body without the expected container yields an empty list. Items
    /// missing a field required to build a [`ResultRecord`] fail the whole
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedResponse`] when required fields are
    /// absent or have the wrong type.
    fn transform(&self, body: &Value) -> Result<Vec<ResultRecord>, SearchError>;

    /// Human-readable label for logs and reports, e.g. `profiles/search`.
    fn label(&self) -> String {
        format!("{}{}", self.name(), self.path())
    }
}
