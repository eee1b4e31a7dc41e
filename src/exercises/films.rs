//! Oscar-winning films: a landing page of year links at
//! `/pages/ajax-javascript/`, then one JSON listing per year.

use log::{debug, info};
use url::Url;

use crate::core::{Config, ResultTable};
use crate::http::Fetcher;
use crate::parser::{HtmlTableParser, JsonRecordParser, RecordParser};
use crate::records::{FilmRecord, FilmYear};
use crate::{ScraperError, ScraperResult};

pub const DEFAULT_URL: &str = "https://www.scrapethissite.com/pages/ajax-javascript/";

pub fn year_url(base_url: &Url, year: u16) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("ajax", "true")
        .append_pair("year", &year.to_string());
    url
}

/// Years are fetched one after another, in the order the landing page lists
/// them.
pub async fn run<F: Fetcher>(
    fetcher: F,
    config: &Config,
) -> ScraperResult<ResultTable<FilmRecord>> {
    let landing = fetcher.fetch(&config.base_url).await?;
    let years = HtmlTableParser::<FilmYear>::new()?.parse_page(&landing, 1)?;
    fetcher.stats().record_page(years.len());

    if years.is_empty() {
        return Err(ScraperError::ParseStructure {
            url: config.base_url.to_string(),
            reason: "no year links found".to_string(),
        });
    }
    info!("Found {} film years", years.len());

    let parser = JsonRecordParser::<FilmRecord>::new();
    let mut table = ResultTable::new();
    for (i, FilmYear(year)) in years.into_iter().enumerate() {
        let page = fetcher.fetch(&year_url(&config.base_url, year)).await?;
        let films = parser.parse_page(&page, i as u32 + 1)?;
        fetcher.stats().record_page(films.len());

        debug!("{}: {} films", year, films.len());
        table.append_page(films);
    }

    Ok(table)
}
