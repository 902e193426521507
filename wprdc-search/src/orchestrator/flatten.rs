//! Fan-in: merge per-source outcomes into one record list plus reports.
//!
//! Records are concatenated in source configuration order. A failed source
//! contributes no records; its error is kept in its [`SourceReport`].

use std::sync::Arc;
use std::time::Duration;

use crate::error::SearchError;
use crate::source::Source;
use crate::types::{ResultRecord, SourceReport, SourceStatus};

/// Terminal state of one source's request, before flattening.
#[derive(Debug)]
pub struct SourceOutcome {
    /// Time from issuing the request to the end of the transform.
    pub elapsed: Duration,
    /// Transformed records, or the failure that ended the request.
    pub result: Result<Vec<ResultRecord>, SearchError>,
}

/// Flatten `outcomes` (one per source, same order as `sources`).
///
/// Returns the concatenated records and one [`SourceReport`] per source.
pub fn flatten_outcomes(
    sources: &[Arc<dyn Source>],
    query: &str,
    outcomes: Vec<SourceOutcome>,
) -> (Vec<ResultRecord>, Vec<SourceReport>) {
    let mut results: Vec<ResultRecord> = Vec::new();
    let mut reports: Vec<SourceReport> = Vec::with_capacity(sources.len());

    for (source, outcome) in sources.iter().zip(outcomes) {
        let label = source.label();
        let status = match outcome.result {
            Ok(records) => {
                let count = records.len();
                tracing::debug!(source = %label, count, "source returned records");
                results.extend(records);
                SourceStatus::Ok { records: count }
            }
            Err(err) => {
                tracing::warn!(source = %label, error = %err, "source query failed");
                SourceStatus::Failed(err)
            }
        };

        reports.push(SourceReport {
            source: label,
            host: source.host().to_owned(),
            url: source.build_full_url(query),
            status,
            elapsed: outcome.elapsed,
        });
    }

    (results, reports)
}
