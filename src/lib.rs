//! wprdc: federated search host for Western Pennsylvania Regional Data
//! Center sources.
//!
//! This crate wires the [`wprdc_search`] engine to a TOML configuration
//! file and a JSON output envelope:
//! config → [`Searcher`] (sources built once) → aggregation → [`SearchResponse`]

pub mod config;
pub mod error;
pub mod response;

use std::sync::Arc;

use wprdc_search::{AggregationResult, SearchConfig, Source};

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use response::{RecordView, SearchResponse, SourceStatusView};

/// Sources built once at startup and reused for every query.
pub struct Searcher {
    config: SearchConfig,
    sources: Vec<Arc<dyn Source>>,
}

impl Searcher {
    /// Validate `config` and build its sources.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the configuration is invalid.
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let sources = wprdc_search::build_sources(&config.sources, &config.search);
        tracing::info!(sources = sources.len(), "searcher ready");
        Ok(Self {
            config: config.search.clone(),
            sources,
        })
    }

    /// Number of configured sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run one aggregation for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Search`] for an empty query. Per-source failures
    /// are reported inside the result, not as errors.
    pub async fn aggregate(&self, query: &str) -> Result<AggregationResult> {
        Ok(wprdc_search::run_aggregation(query, &self.sources, &self.config).await?)
    }

    /// Run one aggregation and render it as a [`SearchResponse`].
    ///
    /// # Errors
    ///
    /// Same as [`Searcher::aggregate`].
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        let result = self.aggregate(query).await?;
        if result.is_degraded() {
            tracing::warn!(
                failed = result.failures().count(),
                sources = result.reports.len(),
                "search returned partial results"
            );
        }
        Ok(SearchResponse::from(&result))
    }
}
