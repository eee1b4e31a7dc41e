use async_trait::async_trait;
use chrono::Utc;
use log::trace;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use url::Url;

use super::{Fetcher, Page, ResponseType};
use crate::core::Config;
use crate::{ScraperError, ScraperResult, StatsTracker};

/// [`Fetcher`] backed by a reqwest client. Any non-2xx status is an error.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    stats: StatsTracker,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> ScraperResult<Self> {
        let mut header_map = header::HeaderMap::new();
        for (key, value) in &config.headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScraperError::Config(format!("header name '{key}': {e}")))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|e| ScraperError::Config(format!("header value for '{key}': {e}")))?;
            header_map.insert(name, value);
        }

        let client = ClientBuilder::new()
            .user_agent(config.user_agent.as_str())
            .default_headers(header_map)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            stats: StatsTracker::new(),
        })
    }

    pub fn with_stats(mut self, stats: StatsTracker) -> Self {
        self.stats = stats;
        self
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<Page> {
        let timestamp = Utc::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let headers = Self::extract_headers(&response);
        let body = response.text().await?;
        trace!("Body of {}: {}", url, body);

        let response_type = ResponseType::detect(&headers, &body);

        Ok(Page {
            url: url.clone(),
            status: status.as_u16(),
            headers,
            body,
            response_type,
            timestamp,
        })
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
