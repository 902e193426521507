//! Core orchestrator: one concurrent request per source, barrier join.
//!
//! Run states: start → sessions assigned → requests in flight → all
//! complete (possibly with per-source failures) → sessions closed → done.

use std::sync::Arc;

use tokio::time::Instant;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::session::{ConnectionContext, SessionPool};
use crate::source::Source;
use crate::types::{AggregationResult, ResultRecord};

use super::flatten::{flatten_outcomes, SourceOutcome};

/// Fan `query` out to every source and merge the normalised records.
///
/// # Pipeline
///
/// 1. Reject an empty query and invalid config before any I/O
/// 2. Open one connection context per distinct host ([`SessionPool::assign`])
/// 3. Issue one request per source concurrently with [`futures::future::join_all`]
/// 4. Wait for every request to finish (success or failure)
/// 5. Flatten records in source configuration order
/// 6. Release every connection context
///
/// Per-source failures (network, timeout, malformed body, unusable host)
/// are isolated: the source contributes no records and its error is kept
/// in its [`crate::types::SourceReport`]. Use
/// [`AggregationResult::is_degraded`] to detect a partial result.
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] if `query` is empty or whitespace only
/// - [`SearchError::Config`] if `config` fails validation
pub async fn run_aggregation(
    query: &str,
    sources: &[Arc<dyn Source>],
    config: &SearchConfig,
) -> Result<AggregationResult, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    config.validate()?;

    let started = Instant::now();
    tracing::trace!(query, "starting aggregation");

    let pool = SessionPool::assign(sources, config);
    tracing::debug!(
        sources = sources.len(),
        hosts = pool.host_count(),
        opened = pool.opened(),
        "sessions assigned"
    );

    let requests = sources.iter().map(|source| {
        let context = pool.context_for(source.host());
        query_source(source.as_ref(), context, query)
    });
    let outcomes = futures::future::join_all(requests).await;
    tracing::debug!(sources = outcomes.len(), "all source requests complete");

    let (results, reports) = flatten_outcomes(sources, query, outcomes);

    let sessions = pool.close();
    tracing::debug!(
        opened = sessions.opened,
        released = sessions.released,
        "sessions closed"
    );

    let result = AggregationResult::new(results, reports, sessions, started.elapsed());
    tracing::debug!(
        count = result.count,
        failed = result.failures().count(),
        elapsed_ms = result.elapsed.as_millis() as u64,
        "aggregation complete"
    );
    Ok(result)
}

/// Query one source, turning every failure into a terminal outcome.
async fn query_source(
    source: &dyn Source,
    context: Result<&ConnectionContext, SearchError>,
    query: &str,
) -> SourceOutcome {
    let started = Instant::now();
    let result = match context {
        Ok(context) => fetch_records(source, context, query).await,
        Err(err) => Err(err),
    };
    SourceOutcome {
        elapsed: started.elapsed(),
        result,
    }
}

async fn fetch_records(
    source: &dyn Source,
    context: &ConnectionContext,
    query: &str,
) -> Result<Vec<ResultRecord>, SearchError> {
    let path_with_query = source.build_path_with_query(query);
    tracing::trace!(source = %source.label(), path = %path_with_query, "issuing source request");
    let body = context.get_json(&path_with_query).await?;
    source.transform(&body)
}
