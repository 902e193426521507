//! Community profiles directory source.
//!
//! The profiles API answers `GET <path>?search=<query>` with
//! `{"results": [{"slug", "name", "description", ...}]}`. Several logical
//! sources can point at different resource paths on the same host; they
//! share one connection context per run.

use serde_json::Value;

use crate::error::SearchError;
use crate::source::Source;
use crate::types::ResultRecord;

use super::{container_items, required_str, Endpoint};

/// Default API origin.
pub const DEFAULT_HOST: &str = "https://api.profiles.wprdc.org";

/// Default resource path.
pub const DEFAULT_PATH: &str = "/search";

/// Public site that item links point at.
const LINK_BASE: &str = "https://profiles.wprdc.org";

/// Namespace for `uid`s produced by this source.
const NAME: &str = "profiles";

/// Profiles directory source.
#[derive(Debug, Clone)]
pub struct ProfilesSource {
    endpoint: Endpoint,
}

impl ProfilesSource {
    /// A source for `path` on [`DEFAULT_HOST`].
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(DEFAULT_HOST, path.into(), "search"),
        }
    }

    /// Override the API origin (mirrors, staging, tests).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.endpoint.set_host(host.into());
        self
    }

    /// Bound the URL memo to `capacity` distinct queries.
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.endpoint.set_cache_capacity(capacity);
        self
    }

    fn transform_record(&self, index: usize, item: &Value) -> Result<ResultRecord, SearchError> {
        let label = self.label();
        let slug = required_str(item, "slug", &label, index)?;
        let name = required_str(item, "name", &label, index)?;
        let description = required_str(item, "description", &label, index)?;

        Ok(ResultRecord {
            uid: format!("{NAME}{}/{slug}", self.endpoint.path()),
            slug: slug.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            link_url: format!("{LINK_BASE}/{slug}"),
        })
    }
}

impl Source for ProfilesSource {
    fn name(&self) -> &str {
        NAME
    }

    fn host(&self) -> &str {
        self.endpoint.host()
    }

    fn path(&self) -> &str {
        self.endpoint.path()
    }

    fn build_path_with_query(&self, query: &str) -> String {
        self.endpoint.urls(query).path_with_query.clone()
    }

    fn build_full_url(&self, query: &str) -> String {
        self.endpoint.urls(query).full_url.clone()
    }

    fn transform(&self, body: &Value) -> Result<Vec<ResultRecord>, SearchError> {
        let Some(items) = container_items(body, "results", &self.label())? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.transform_record(index, item))
            .collect()
    }
}
