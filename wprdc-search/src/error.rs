//! Error types for the wprdc-search crate.
//!
//! Every variant except [`SearchError::EmptyQuery`] and
//! [`SearchError::Config`] describes a failure local to one source (or one
//! host). Those failures are recorded in the per-source report of an
//! aggregation run and never abort sibling requests.

/// Errors that can occur while aggregating search results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The query was empty or whitespace only. No request is issued.
    #[error("query must not be empty")]
    EmptyQuery,

    /// A source body lacked fields its transform requires, or was not JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Connection, transport or non-success HTTP status failure.
    #[error("network failure: {0}")]
    Network(String),

    /// The per-request timeout elapsed before the source answered.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The shared connection context for a host could not be established.
    /// Every source mapped to that host fails with this error.
    #[error("connection context error: {0}")]
    ConnectionContext(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` for failures isolated to a single source or host.
    pub fn is_source_local(&self) -> bool {
        !matches!(self, Self::EmptyQuery | Self::Config(_))
    }
}

/// Convenience type alias for wprdc-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_query() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "query must not be empty");
    }

    #[test]
    fn display_malformed_response() {
        let err = SearchError::MalformedResponse("profiles/search: missing `slug`".into());
        assert_eq!(
            err.to_string(),
            "malformed response: profiles/search: missing `slug`"
        );
    }

    #[test]
    fn display_network() {
        let err = SearchError::Network("connection refused".into());
        assert_eq!(err.to_string(), "network failure: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 8s limit".into());
        assert_eq!(err.to_string(), "request timed out: exceeded 8s limit");
    }

    #[test]
    fn display_connection_context() {
        let err = SearchError::ConnectionContext("invalid host".into());
        assert_eq!(err.to_string(), "connection context error: invalid host");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn source_local_classification() {
        assert!(SearchError::Network("x".into()).is_source_local());
        assert!(SearchError::Timeout("x".into()).is_source_local());
        assert!(SearchError::MalformedResponse("x".into()).is_source_local());
        assert!(SearchError::ConnectionContext("x".into()).is_source_local());
        assert!(!SearchError::EmptyQuery.is_source_local());
        assert!(!SearchError::Config("x".into()).is_source_local());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
