//! Hockey teams: the paginated listing at `/pages/forms/`.

use crate::core::{Config, ListingRequest, PaginatedTableFetcher, ResultTable};
use crate::http::Fetcher;
use crate::parser::HtmlTableParser;
use crate::records::TeamRecord;
use crate::ScraperResult;

pub const DEFAULT_URL: &str = "https://www.scrapethissite.com/pages/forms/";
pub const PAGE_PARAM: &str = "page_num";
pub const FIRST_PAGE: u32 = 1;

pub async fn run<F: Fetcher>(
    fetcher: F,
    config: &Config,
) -> ScraperResult<ResultTable<TeamRecord>> {
    let paginator = PaginatedTableFetcher::new(fetcher, HtmlTableParser::<TeamRecord>::new()?)
        .with_max_pages(config.max_pages);
    let request = ListingRequest::new(config.base_url.clone(), PAGE_PARAM, FIRST_PAGE);
    paginator.fetch_all(request).await
}
