//! # wprdc-search
//!
//! Federated search across Western Pennsylvania Regional Data Center
//! sources.
//!
//! One query string is fanned out concurrently to every configured source
//! (the community profiles directory, the open data catalogue, ...), each
//! response is normalised into a [`ResultRecord`], and the records are
//! merged into a single [`AggregationResult`] with per-source provenance
//! and timing.
//!
//! ## Design
//!
//! - Sources implement [`Source`]: URL construction and response
//!   transformation only, no I/O
//! - Sources sharing a host share one pooled connection context per run
//! - All requests run concurrently; the run waits for every one of them
//! - A failing source is isolated: it contributes no records and its error
//!   is reported alongside the merged results
//! - No ranking, deduplication, retries or caching of results
//!
//! ## Security
//!
//! - No network listeners: this is a library, not a server
//! - Search queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod session;
pub mod source;
pub mod sources;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::aggregate::run_aggregation;
pub use session::{host_key, parse_origin, ConnectionContext, SessionPool};
pub use source::Source;
pub use sources::{build_sources, SourceKind, SourceSpec};
pub use types::{AggregationResult, ResultRecord, SessionSummary, SourceReport, SourceStatus};

/// Search every source described by `specs`.
///
/// Convenience wrapper that builds the sources with [`build_sources`] and
/// calls [`run_aggregation`]. Long-lived callers should build the sources
/// once and reuse them so their URL memos stay warm.
///
/// # Errors
///
/// Same as [`run_aggregation`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wprdc_search::Result<()> {
/// use wprdc_search::{SearchConfig, SourceKind, SourceSpec};
///
/// let specs = vec![SourceSpec::new(SourceKind::Profiles, "/search")];
/// let result = wprdc_search::search("pittsburgh", &specs, &SearchConfig::default()).await?;
/// for record in &result.results {
///     println!("{}: {}", record.name, record.link_url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    specs: &[SourceSpec],
    config: &SearchConfig,
) -> Result<AggregationResult> {
    let sources = build_sources(specs, config);
    run_aggregation(query, &sources, config).await
}
