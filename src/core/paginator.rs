use log::{debug, info};
use url::Url;

use super::config::DEFAULT_MAX_PAGES;
use super::{ListingRequest, ResultTable, ScraperError, ScraperResult};
use crate::http::Fetcher;
use crate::parser::RecordParser;

/// Walks a paginated listing one page at a time until a page parses to zero
/// rows.
///
/// Pages are requested strictly in sequence. Any failure aborts the walk and
/// the records gathered so far are dropped.
pub struct PaginatedTableFetcher<F, P> {
    fetcher: F,
    parser: P,
    max_pages: u32,
}

impl<F: Fetcher, P: RecordParser> PaginatedTableFetcher<F, P> {
    pub fn new(fetcher: F, parser: P) -> Self {
        Self {
            fetcher,
            parser,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Upper bound on retrievals per run, the end-of-data page included.
    /// Zero is raised to one.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn fetch_all(
        &self,
        request: ListingRequest,
    ) -> ScraperResult<ResultTable<P::Record>> {
        let mut table = ResultTable::new();
        let mut request = request;

        info!(
            "Fetching listing {} from {}={}",
            request.base_url, request.page_param, request.page
        );

        for _ in 0..self.max_pages {
            let records = self.fetch_page(&request.url(), request.page).await?;

            if records.is_empty() {
                info!(
                    "Page {} is empty, listing complete with {} records",
                    request.page,
                    table.len()
                );
                return Ok(table);
            }

            debug!("Page {}: {} records", request.page, records.len());
            table.append_page(records);
            request = request.next().ok_or(ScraperError::PageLimitExceeded {
                limit: self.max_pages,
            })?;
        }

        Err(ScraperError::PageLimitExceeded {
            limit: self.max_pages,
        })
    }

    /// One retrieval and one parse, no iteration.
    pub async fn fetch_once(&self, url: &Url) -> ScraperResult<ResultTable<P::Record>> {
        let records = self.fetch_page(url, 1).await?;
        info!("{}: {} records", url, records.len());
        Ok(ResultTable::from(records))
    }

    async fn fetch_page(&self, url: &Url, page_index: u32) -> ScraperResult<Vec<P::Record>> {
        let page = self.fetcher.fetch(url).await?;
        let records = self.parser.parse_page(&page, page_index)?;
        self.fetcher.stats().record_page(records.len());
        Ok(records)
    }
}
