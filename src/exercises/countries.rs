//! Countries: a single page at `/pages/simple/`.

use crate::core::{Config, PaginatedTableFetcher, ResultTable};
use crate::http::Fetcher;
use crate::parser::HtmlTableParser;
use crate::records::CountryRecord;
use crate::ScraperResult;

pub const DEFAULT_URL: &str = "https://www.scrapethissite.com/pages/simple/";

pub async fn run<F: Fetcher>(
    fetcher: F,
    config: &Config,
) -> ScraperResult<ResultTable<CountryRecord>> {
    PaginatedTableFetcher::new(fetcher, HtmlTableParser::<CountryRecord>::new()?)
        .fetch_once(&config.base_url)
        .await
}
