//! Open data catalogue source (CKAN `package_search`).
//!
//! The catalogue answers `GET <path>?q=<query>` with a CKAN action envelope:
//! `{"success": true, "result": {"count": n, "results": [...]}}`. Each
//! package carries `name` (URL slug), `title` and an optional `notes`
//! description.

use serde_json::Value;

use crate::error::SearchError;
use crate::source::Source;
use crate::types::ResultRecord;

use super::{container_items, object_field, required_str, Endpoint};

/// Default catalogue origin.
pub const DEFAULT_HOST: &str = "https://data.wprdc.org";

/// Default action path.
pub const DEFAULT_PATH: &str = "/api/3/action/package_search";

/// Public dataset pages.
const LINK_BASE: &str = "https://data.wprdc.org/dataset";

const NAME: &str = "datasets";

/// CKAN catalogue source.
#[derive(Debug, Clone)]
pub struct DatasetsSource {
    endpoint: Endpoint,
}

impl DatasetsSource {
    /// A source for `path` on [`DEFAULT_HOST`].
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(DEFAULT_HOST, path.into(), "q"),
        }
    }

    /// Override the catalogue origin.
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
        let slug = required_str(item, "name", &label, index)?;
        let title = required_str(item, "title", &label, index)?;
        // CKAN sends `"notes": null` for packages without a description.
        let description = item.get("notes").and_then(Value::as_str).unwrap_or_default();

        Ok(ResultRecord {
            uid: format!("{NAME}{}/{slug}", self.endpoint.path()),
            slug: slug.to_owned(),
            name: title.to_owned(),
            description: description.to_owned(),
            link_url: format!("{LINK_BASE}/{slug}"),
        })
    }
}

impl Source for DatasetsSource {
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
        let label = self.label();
        let Some(result) = object_field(body, "result", &label)? else {
            return Ok(Vec::new());
        };
        let Some(items) = container_items(result, "results", &label)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.transform_record(index, item))
            .collect()
    }
}
