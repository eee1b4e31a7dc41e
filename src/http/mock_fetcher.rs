use async_trait::async_trait;
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;

use super::{Fetcher, Page};
use crate::{ScraperError, ScraperResult, StatsTracker};

#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(String),
    Status(u16),
}

impl MockResponse {
    pub fn body(body: impl Into<String>) -> Self {
        MockResponse::Body(body.into())
    }
}

/// Serves scripted responses in order and remembers every URL asked for.
/// Running past the script answers 404.
#[derive(Clone)]
pub struct MockFetcher {
    responses: Arc<Vec<MockResponse>>,
    requested: Arc<Mutex<Vec<Url>>>,
    stats: StatsTracker,
}

impl MockFetcher {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            requested: Arc::new(Mutex::new(Vec::new())),
            stats: StatsTracker::new(),
        }
    }

    pub fn requested(&self) -> Vec<Url> {
        self.requested.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<Page> {
        let index = {
            let mut requested = self.requested.lock();
            requested.push(url.clone());
            requested.len() - 1
        };

        match self.responses.get(index) {
            Some(MockResponse::Body(body)) => Ok(Page::new(url.clone(), 200, body.clone())),
            Some(MockResponse::Status(status)) => Err(ScraperError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => {
                warn!("No scripted response left for {}", url);
                Err(ScraperError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            }
        }
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
