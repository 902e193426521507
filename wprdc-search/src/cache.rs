//! Bounded per-source memo of built request URLs.
//!
//! URL construction is a pure function of the source's immutable host and
//! path plus the query, so each source keeps a small [`moka`] cache keyed by
//! the raw query string. Eviction is size-bounded only; entries never go
//! stale.

use std::fmt;
use std::sync::Arc;

use moka::sync::Cache;

/// The two URL forms a source builds for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltUrls {
    /// Path and encoded query string, without the host.
    pub path_with_query: String,
    /// Host (without trailing `/`) followed by `path_with_query`.
    pub full_url: String,
}

impl BuiltUrls {
    /// Build both forms for `query`, sent as the `param` query parameter.
    pub fn new(host: &str, path: &str, param: &str, query: &str) -> Self {
        let path_with_query = format!("{path}?{param}={}", encode_query(query));
        let full_url = format!("{}{path_with_query}", host.trim_end_matches('/'));
        Self {
            path_with_query,
            full_url,
        }
    }
}

/// Percent-encode a query value using `application/x-www-form-urlencoded`
/// rules (spaces become `+`).
pub fn encode_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

/// Size-bounded memo from query string to [`BuiltUrls`].
#[derive(Clone)]
pub struct UrlCache {
    inner: Cache<String, Arc<BuiltUrls>>,
    capacity: u64,
}

impl UrlCache {
    /// Create a memo holding at most `capacity` distinct queries.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
            capacity,
        }
    }

    /// Return the memoised URLs for `query`, building them with `build` on a miss.
    pub fn get_or_build(&self, query: &str, build: impl FnOnce() -> BuiltUrls) -> Arc<BuiltUrls> {
        self.inner.get_with(query.to_owned(), || Arc::new(build()))
    }

    /// Whether `query` is currently memoised.
    pub fn contains(&self, query: &str) -> bool {
        self.inner.contains_key(query)
    }

    /// Maximum number of memoised queries.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl fmt::Debug for UrlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn built_urls_join_host_path_and_query() {
        let urls = BuiltUrls::new("https://api.profiles.wprdc.org", "/search", "search", "pittsburgh");
        assert_eq!(urls.path_with_query, "/search?search=pittsburgh");
        assert_eq!(
            urls.full_url,
            "https://api.profiles.wprdc.org/search?search=pittsburgh"
        );
    }

    #[test]
    fn trailing_slash_on_host_is_not_doubled() {
        let urls = BuiltUrls::new("http://127.0.0.1:8080/", "/search", "search", "q");
        assert_eq!(urls.full_url, "http://127.0.0.1:8080/search?search=q");
    }

    #[test]
    fn encode_query_escapes_reserved_characters() {
        assert_eq!(encode_query("jane doe"), "jane+doe");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query("100%"), "100%25");
    }

    #[test]
    fn encode_query_keeps_unreserved_characters() {
        assert_eq!(encode_query("allegheny-county_2024.v1"), "allegheny-county_2024.v1");
    }

    #[test]
    fn get_or_build_memoises_per_query() {
        let cache = UrlCache::new(16);
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            BuiltUrls::new("https://h.test", "/p", "q", "parks")
        };

        let first = cache.get_or_build("parks", build);
        let second = cache.get_or_build("parks", || {
            builds.fetch_add(1, Ordering::SeqCst);
            BuiltUrls::new("https://h.test", "/p", "q", "parks")
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert!(cache.contains("parks"));
    }

    #[test]
    fn distinct_queries_memoised_independently() {
        let cache = UrlCache::new(16);
        let a = cache.get_or_build("a", || BuiltUrls::new("https://h.test", "/p", "q", "a"));
        let b = cache.get_or_build("b", || BuiltUrls::new("https://h.test", "/p", "q", "b"));
        assert_ne!(a.path_with_query, b.path_with_query);
        assert!(cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn debug_reports_capacity() {
        let cache = UrlCache::new(4);
        assert_eq!(cache.capacity(), 4);
        assert!(format!("{cache:?}").contains("capacity: 4"));
    }
}
