//! Core types: normalised records and the outcome of an aggregation run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A single normalised search hit, independent of the backend it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Identifier unique across all sources, e.g. `profiles/search/jane-doe`.
    pub uid: String,
    /// Identifier unique within the originating source only.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Canonical human-facing URL for the item.
    pub link_url: String,
}

/// Terminal state of one source's request within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// The response was fetched and transformed into `records` records.
    Ok {
        /// Number of records the source contributed.
        records: usize,
    },
    /// The source contributed nothing because of this error.
    Failed(SearchError),
}

impl SourceStatus {
    /// Returns `true` if the source completed successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&SearchError> {
        match self {
            Self::Ok { .. } => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// Provenance and outcome for one configured source.
#[derive(Debug, Clone)]
pub struct SourceReport {
    /// Source label (`name` + `path`), e.g. `profiles/search`.
    pub source: String,
    /// Host origin the source was grouped under.
    pub host: String,
    /// Fully built query URL.
    pub url: String,
    /// Terminal state of the request.
    pub status: SourceStatus,
    /// Time from issuing the request to the end of the transform.
    pub elapsed: Duration,
}

/// Connection context bookkeeping for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Contexts created, at most one per distinct host.
    pub opened: usize,
    /// Contexts released at teardown.
    pub released: usize,
}

/// The merged outcome of one query fanned out to every configured source.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Total number of flattened records. Always equals `results.len()`.
    pub count: usize,
    /// Wall-clock duration of the full fan-out/fan-in.
    pub elapsed: Duration,
    /// One built query URL per configured source, in configuration order.
    pub source_urls: Vec<String>,
    /// Flattened records, concatenated in source configuration order.
    pub results: Vec<ResultRecord>,
    /// One report per configured source, in configuration order.
    pub reports: Vec<SourceReport>,
    /// Connection contexts opened and released during the run.
    pub sessions: SessionSummary,
}

impl AggregationResult {
    pub(crate) fn new(
        results: Vec<ResultRecord>,
        reports: Vec<SourceReport>,
        sessions: SessionSummary,
        elapsed: Duration,
    ) -> Self {
        let source_urls = reports.iter().map(|r| r.url.clone()).collect();
        Self {
            count: results.len(),
            elapsed,
            source_urls,
            results,
            reports,
            sessions,
        }
    }

    /// Elapsed time in fractional seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Returns `true` if at least one source failed.
    pub fn is_degraded(&self) -> bool {
        self.reports.iter().any(|r| !r.status.is_ok())
    }

    /// Reports of the sources that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SourceReport> {
        self.reports.iter().filter(|r| !r.status.is_ok())
    }
}
