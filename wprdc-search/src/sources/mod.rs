//! Concrete source implementations.
//!
//! Each module provides a struct implementing [`crate::source::Source`] for
//! one backend's URL shape and response schema. [`SourceSpec`] describes a
//! source as data so the list can come from a configuration file.

pub mod datasets;
pub mod profiles;

pub use datasets::DatasetsSource;
pub use profiles::ProfilesSource;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{BuiltUrls, UrlCache};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::Source;

/// Default number of memoised queries per source.
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Supported backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The community profiles directory (`api.profiles.wprdc.org`).
    Profiles,
    /// The CKAN open data catalogue (`data.wprdc.org`).
    Datasets,
}

impl SourceKind {
    /// Returns the configuration name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Datasets => "datasets",
        }
    }

    /// Host used when a [`SourceSpec`] does not override it.
    pub fn default_host(&self) -> &'static str {
        match self {
            Self::Profiles => profiles::DEFAULT_HOST,
            Self::Datasets => datasets::DEFAULT_HOST,
        }
    }

    /// Path used when a [`SourceSpec`] does not override it.
    pub fn default_path(&self) -> &'static str {
        match self {
            Self::Profiles => profiles::DEFAULT_PATH,
            Self::Datasets => datasets::DEFAULT_PATH,
        }
    }

    /// Returns all available kinds.
    pub fn all() -> &'static [SourceKind] {
        &[Self::Profiles, Self::Datasets]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative description of one configured source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Backend type.
    pub kind: SourceKind,
    /// Resource path; defaults to [`SourceKind::default_path`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Host origin; defaults to [`SourceKind::default_host`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl SourceSpec {
    /// A spec for `kind` at `path` on the default host.
    pub fn new(kind: SourceKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: Some(path.into()),
            host: None,
        }
    }

    /// Override the host origin.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Instantiate the source described by this spec.
    pub fn build(&self, config: &SearchConfig) -> Arc<dyn Source> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| self.kind.default_path().to_owned());
        let host = self
            .host
            .clone()
            .unwrap_or_else(|| self.kind.default_host().to_owned());

        match self.kind {
            SourceKind::Profiles => Arc::new(
                ProfilesSource::new(path)
                    .with_host(host)
                    .with_cache_capacity(config.url_cache_capacity),
            ),
            SourceKind::Datasets => Arc::new(
                DatasetsSource::new(path)
                    .with_host(host)
                    .with_cache_capacity(config.url_cache_capacity),
            ),
        }
    }
}

/// Build every source in `specs`, preserving order.
pub fn build_sources(specs: &[SourceSpec], config: &SearchConfig) -> Vec<Arc<dyn Source>> {
    specs.iter().map(|spec| spec.build(config)).collect()
}

/// Host, path and URL memo shared by every concrete source.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    host: String,
    path: String,
    param: &'static str,
    memo: UrlCache,
}

impl Endpoint {
    /// `path` on `host`, with the query sent as the `param` parameter.
    pub(crate) fn new(host: &str, path: String, param: &'static str) -> Self {
        Self {
            host: host.to_owned(),
            path,
            param,
            memo: UrlCache::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    pub(crate) fn set_host(&mut self, host: String) {
        self.host = host;
        self.memo = UrlCache::new(self.memo.capacity());
    }

    pub(crate) fn set_cache_capacity(&mut self, capacity: u64) {
        self.memo = UrlCache::new(capacity);
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Memoised URLs for `query`.
    pub(crate) fn urls(&self, query: &str) -> Arc<BuiltUrls> {
        self.memo.get_or_build(query, || {
            BuiltUrls::new(&self.host, &self.path, self.param, query)
        })
    }
}

/// Read a required string field from one response item.
pub(crate) fn required_str<'a>(
    item: &'a Value,
    field: &str,
    source: &str,
    index: usize,
) -> Result<&'a str, SearchError> {
    item.get(field).and_then(Value::as_str).ok_or_else(|| {
        SearchError::MalformedResponse(format!(
            "{source}: item {index} missing required string field `{field}`"
        ))
    })
}

/// Read the value stored under `key` in a JSON object, or `None` if absent.
///
/// A `parent` that is not an object does not match the expected schema and
/// is reported as [`SearchError::MalformedResponse`].
pub(crate) fn object_field<'a>(
    parent: &'a Value,
    key: &str,
    source: &str,
) -> Result<Option<&'a Value>, SearchError> {
    let object = parent.as_object().ok_or_else(|| {
        SearchError::MalformedResponse(format!(
            "{source}: expected an object holding `{key}`"
        ))
    })?;
    Ok(object.get(key))
}

/// Read the array stored under `container`, or `None` if the key is absent.
pub(crate) fn container_items<'a>(
    parent: &'a Value,
    container: &str,
    source: &str,
) -> Result<Option<&'a Vec<Value>>, SearchError> {
    match object_field(parent, container, source)? {
        None => Ok(None),
        Some(value) => value.as_array().map(Some).ok_or_else(|| {
            SearchError::MalformedResponse(format!("{source}: `{container}` is not an array"))
        }),
    }
}
