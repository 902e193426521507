//! JSON envelope for search output.
//!
//! Top-level keys stay snake_case (`count`, `elapsed_time`, `sources`,
//! `results`); record fields are camelCased for API consumers (`linkUrl`).

use serde::{Deserialize, Serialize};
use wprdc_search::{AggregationResult, ResultRecord, SourceReport};

/// The rendered outcome of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of records.
    pub count: usize,
    /// Wall-clock duration of the fan-out in seconds.
    pub elapsed_time: f64,
    /// One built URL per configured source, in configuration order.
    pub sources: Vec<String>,
    /// Merged records.
    pub results: Vec<RecordView>,
    /// Per-source outcome, in configuration order.
    pub status: Vec<SourceStatusView>,
}

/// A [`ResultRecord`] with camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    /// Globally unique id: source name, path and slug.
    pub uid: String,
    /// Identifier within the originating source.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Free-text description, possibly empty.
    pub description: String,
    /// Public page for the item.
    pub link_url: String,
}

/// Outcome of one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatusView {
    /// Source label (`name` + `path`).
    pub source: String,
    /// URL queried for this source.
    pub url: String,
    /// Whether the source answered with usable records.
    pub ok: bool,
    /// Records contributed by this source.
    pub count: usize,
    /// Failure message when `ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ResultRecord> for RecordView {
    fn from(record: &ResultRecord) -> Self {
        Self {
            uid: record.uid.clone(),
            slug: record.slug.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            link_url: record.link_url.clone(),
        }
    }
}

impl From<&SourceReport> for SourceStatusView {
    fn from(report: &SourceReport) -> Self {
        let count = match report.status {
            wprdc_search::SourceStatus::Ok { records } => records,
            wprdc_search::SourceStatus::Failed(_) => 0,
        };
        Self {
            source: report.source.clone(),
            url: report.url.clone(),
            ok: report.status.is_ok(),
            count,
            error: report.status.error().map(ToString::to_string),
        }
    }
}

impl From<&AggregationResult> for SearchResponse {
    fn from(result: &AggregationResult) -> Self {
        Self {
            count: result.count,
            elapsed_time: result.elapsed_seconds(),
            sources: result.source_urls.clone(),
            results: result.results.iter().map(RecordView::from).collect(),
            status: result.reports.iter().map(SourceStatusView::from).collect(),
        }
    }
}

impl SearchResponse {
    /// Whether any source failed.
    pub fn is_degraded(&self) -> bool {
        self.status.iter().any(|s| !s.ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response() -> SearchResponse {
        SearchResponse {
            count: 1,
            elapsed_time: 0.25,
            sources: vec!["https://api.profiles.wprdc.org/search?search=pittsburgh".into()],
            results: vec![RecordView {
                uid: "profiles/search/jane-doe".into(),
                slug: "jane-doe".into(),
                name: "Jane Doe".into(),
                description: "Analyst".into(),
                link_url: "https://profiles.wprdc.org/jane-doe".into(),
            }],
            status: vec![SourceStatusView {
                source: "profiles/search".into(),
                url: "https://api.profiles.wprdc.org/search?search=pittsburgh".into(),
                ok: true,
                count: 1,
                error: None,
            }],
        }
    }

    #[test]
    fn record_fields_are_camel_case() {
        let value = serde_json::to_value(response()).expect("serialize");
        assert_eq!(
            value["results"][0],
            json!({
                "uid": "profiles/search/jane-doe",
                "slug": "jane-doe",
                "name": "Jane Doe",
                "description": "Analyst",
                "linkUrl": "https://profiles.wprdc.org/jane-doe"
            })
        );
    }

    #[test]
    fn top_level_keys_keep_snake_case() {
        let value = serde_json::to_value(response()).expect("serialize");
        assert_eq!(value["count"], 1);
        assert_eq!(value["elapsed_time"], 0.25);
        assert!(value["sources"].is_array());
    }

    #[test]
    fn successful_status_omits_error() {
        let value = serde_json::to_value(response()).expect("serialize");
        assert!(value["status"][0].get("error").is_none());
        assert!(!response().is_degraded());
    }
}
