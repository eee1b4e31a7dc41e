use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use url::Url;

use super::Page;
use crate::{ScraperError, ScraperResult, StatsTracker};

/// Retrieval seam: one URL in, one page body out.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<Page>;
    fn stats(&self) -> &StatsTracker;

    /// Fetches `url` once, with no retry, recording the outcome in
    /// [`Fetcher::stats`].
    async fn fetch(&self, url: &Url) -> ScraperResult<Page> {
        let start_time = Utc::now();
        info!("Fetching URL: {}", url);

        match self.fetch_single(url).await {
            Ok(page) => {
                debug!(
                    "Received response: status={}, body_length={}",
                    page.status,
                    page.body.len()
                );
                let duration = Utc::now().signed_duration_since(start_time);
                self.stats()
                    .record_request(page.status, page.body.len(), duration);
                Ok(page)
            }
            Err(e) => {
                warn!("Request for {} failed: {}", url, e);
                let status = match &e {
                    ScraperError::Status { status, .. } => Some(*status),
                    ScraperError::Http(err) => err.status().map(|s| s.as_u16()),
                    _ => None,
                };
                self.stats().record_failure(status);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Box<T> {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<Page> {
        (**self).fetch_single(url).await
    }

    fn stats(&self) -> &StatsTracker {
        (**self).stats()
    }

    async fn fetch(&self, url: &Url) -> ScraperResult<Page> {
        (**self).fetch(url).await
    }
}
