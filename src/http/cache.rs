use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::{Fetcher, Page, ResponseType};
use crate::{ScraperError, ScraperResult, StatsTracker};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPage {
    url: String,
    status: u16,
    response_type: ResponseType,
    body: String,
    first_request: DateTime<Utc>,
    last_request: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FailedRequest {
    url: String,
    error: String,
    first_request: DateTime<Utc>,
    last_request: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    successful: BTreeMap<String, CachedPage>,
    #[serde(default)]
    failed: BTreeMap<String, FailedRequest>,
}

/// Wraps a [`Fetcher`] with a JSON file of earlier responses, keyed by full URL.
///
/// Successful bodies are served from the file instead of the network. URLs
/// that failed before fail again immediately unless `ignore_failed` is set.
/// The file is rewritten after every network round trip.
pub struct CachedFetcher<F> {
    inner: F,
    path: PathBuf,
    state: Mutex<CacheFile>,
    force_refresh: bool,
    ignore_failed: bool,
}

impl<F: Fetcher> CachedFetcher<F> {
    pub fn new(inner: F, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = Self::load(&path);
        Self {
            inner,
            path,
            state: Mutex::new(state),
            force_refresh: false,
            ignore_failed: false,
        }
    }

    /// Skip cached successes and always go to the network.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Neither consult nor record failed requests.
    pub fn with_ignore_failed(mut self, ignore_failed: bool) -> Self {
        self.ignore_failed = ignore_failed;
        self
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn load(path: &Path) -> CacheFile {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Cache file {} not found. Starting with empty cache.",
                    path.display()
                );
                return CacheFile::default();
            }
            Err(e) => {
                error!("Could not read cache file {}: {}", path.display(), e);
                return CacheFile::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(
                    "Error decoding cache file {}: {}. Starting with empty cache.",
                    path.display(),
                    e
                );
                CacheFile::default()
            }
        }
    }

    fn save(&self, cache: &CacheFile) {
        let result = serde_json::to_string_pretty(cache)
            .map_err(ScraperError::from)
            .and_then(|json| fs::write(&self.path, json).map_err(ScraperError::from));
        if let Err(e) = result {
            error!("Could not save cache to {}: {}", self.path.display(), e);
        }
    }

    fn lookup_success(&self, key: &str, url: &Url) -> Option<Page> {
        let mut cache = self.state.lock();
        let entry = cache.successful.get_mut(key)?;
        entry.last_request = Utc::now();
        Some(Page {
            url: url.clone(),
            status: entry.status,
            headers: HashMap::new(),
            body: entry.body.clone(),
            response_type: entry.response_type,
            timestamp: entry.first_request,
        })
    }

    fn lookup_failure(&self, key: &str) -> Option<String> {
        let mut cache = self.state.lock();
        let entry = cache.failed.get_mut(key)?;
        entry.last_request = Utc::now();
        Some(entry.error.clone())
    }

    fn store_success(&self, key: String, page: &Page) {
        let now = Utc::now();
        let mut cache = self.state.lock();
        cache.failed.remove(&key);
        let first_request = cache
            .successful
            .get(&key)
            .map(|entry| entry.first_request)
            .unwrap_or(now);
        cache.successful.insert(
            key.clone(),
            CachedPage {
                url: key,
                status: page.status,
                response_type: page.response_type,
                body: page.body.clone(),
                first_request,
                last_request: now,
            },
        );
        self.save(&cache);
    }

    fn store_failure(&self, key: String, error: &ScraperError) {
        let now = Utc::now();
        let mut cache = self.state.lock();
        let first_request = cache
            .failed
            .get(&key)
            .map(|entry| entry.first_request)
            .unwrap_or(now);
        cache.failed.insert(
            key.clone(),
            FailedRequest {
                url: key,
                error: error.to_string(),
                first_request,
                last_request: now,
            },
        );
        self.save(&cache);
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<Page> {
        self.inner.fetch_single(url).await
    }

    fn stats(&self) -> &StatsTracker {
        self.inner.stats()
    }

    async fn fetch(&self, url: &Url) -> ScraperResult<Page> {
        let key = url.to_string();

        if !self.force_refresh {
            if let Some(page) = self.lookup_success(&key, url) {
                debug!("Cache hit for {}", url);
                self.stats().record_cache_hit();
                return Ok(page);
            }
        }

        if !self.ignore_failed {
            if let Some(message) = self.lookup_failure(&key) {
                error!("Ignoring request due to previous failure: {}", url);
                return Err(ScraperError::CachedFailure { url: key, message });
            }
        }

        match self.inner.fetch(url).await {
            Ok(page) => {
                self.store_success(key, &page);
                Ok(page)
            }
            Err(e) => {
                if !self.ignore_failed {
                    self.store_failure(key, &e);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockFetcher, MockResponse};
    use tempfile::TempDir;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mock = MockFetcher::new(vec![MockResponse::body("<html>page one</html>")]);
        let cached = CachedFetcher::new(mock.clone(), &path);

        let target = url("http://example.com/pages/forms/?page_num=1");
        let first = cached.fetch(&target).await.unwrap();
        let second = cached.fetch(&target).await.unwrap();

        assert_eq!(first.body, second.body);
        assert_eq!(mock.request_count(), 1);
        assert_eq!(cached.stats().get_stats().cache_hits, 1);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_cache_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let target = url("http://example.com/pages/simple/");

        let first_run = CachedFetcher::new(
            MockFetcher::new(vec![MockResponse::body("<html>countries</html>")]),
            &path,
        );
        first_run.fetch(&target).await.unwrap();

        let offline = MockFetcher::new(vec![]);
        let second_run = CachedFetcher::new(offline.clone(), &path);
        let page = second_run.fetch(&target).await.unwrap();

        assert_eq!(page.body, "<html>countries</html>");
        assert_eq!(offline.request_count(), 0);
    }

    #[tokio::test]
    async fn test_previous_failure_short_circuits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let mock = MockFetcher::new(vec![MockResponse::Status(500), MockResponse::body("ok")]);
        let cached = CachedFetcher::new(mock.clone(), &path);
        let target = url("http://example.com/broken");

        let first = cached.fetch(&target).await.unwrap_err();
        assert!(matches!(first, ScraperError::Status { status: 500, .. }));

        let second = cached.fetch(&target).await.unwrap_err();
        assert!(matches!(second, ScraperError::CachedFailure { .. }));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_ignore_failed_retries_and_clears_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let target = url("http://example.com/flaky");

        let cached = CachedFetcher::new(MockFetcher::new(vec![MockResponse::Status(503)]), &path);
        assert!(cached.fetch(&target).await.is_err());

        let mock = MockFetcher::new(vec![MockResponse::body("recovered")]);
        let cached = CachedFetcher::new(mock.clone(), &path).with_ignore_failed(true);
        let page = cached.fetch(&target).await.unwrap();
        assert_eq!(page.body, "recovered");
        assert_eq!(mock.request_count(), 1);

        let reloaded = CachedFetcher::new(MockFetcher::new(vec![]), &path);
        assert!(reloaded.state.lock().failed.is_empty());
        assert!(reloaded.state.lock().successful.contains_key(target.as_str()));
    }

    #[tokio::test]
    async fn test_ignore_failed_does_not_record_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let target = url("http://example.com/flaky");

        let mock = MockFetcher::new(vec![MockResponse::Status(503)]);
        let cached = CachedFetcher::new(mock.clone(), &path).with_ignore_failed(true);
        let err = cached.fetch(&target).await.unwrap_err();

        assert!(matches!(err, ScraperError::Status { status: 503, .. }));
        assert!(cached.state.lock().failed.is_empty());

        let reloaded = CachedFetcher::new(MockFetcher::new(vec![]), &path);
        assert!(reloaded.state.lock().failed.is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_does_not_fail_fetch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("cache.json");
        let target = url("http://example.com/pages/simple/");

        let mock = MockFetcher::new(vec![MockResponse::body("<html>countries</html>")]);
        let cached = CachedFetcher::new(mock.clone(), &path);
        let page = cached.fetch(&target).await.unwrap();

        assert_eq!(page.body, "<html>countries</html>");
        assert!(!path.exists());
        assert!(cached.state.lock().successful.contains_key(target.as_str()));
    }

    #[tokio::test]
    async fn test_force_refresh_goes_to_network() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let target = url("http://example.com/pages/forms/");

        let mock = MockFetcher::new(vec![MockResponse::body("old"), MockResponse::body("new")]);
        let cached = CachedFetcher::new(mock.clone(), &path).with_force_refresh(true);

        assert_eq!(cached.fetch(&target).await.unwrap().body, "old");
        assert_eq!(cached.fetch(&target).await.unwrap().body, "new");
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_cache_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();

        let mock = MockFetcher::new(vec![MockResponse::body("fresh")]);
        let cached = CachedFetcher::new(mock.clone(), &path);
        let page = cached
            .fetch(&url("http://example.com/"))
            .await
            .unwrap();

        assert_eq!(page.body, "fresh");
        assert_eq!(mock.request_count(), 1);
    }
}
