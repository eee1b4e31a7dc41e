use log::{debug, trace};
use scraper::{Html, Selector};
use std::marker::PhantomData;

use super::Row;
use crate::http::Page;
use crate::parser::RecordParser;
use crate::{ScraperError, ScraperResult};

/// A record read from one row of an HTML listing.
///
/// `CONTAINER` must match on every well-formed page, including the page past
/// the end of data. `ROW` is the row marker searched for inside it. `FIELDS`
/// maps field names to selectors relative to the row.
pub trait TableRecord: Sized {
    const CONTAINER: &'static str;
    const ROW: &'static str;
    const FIELDS: &'static [(&'static str, &'static str)];

    fn from_row(row: &Row<'_>) -> ScraperResult<Self>;
}

pub struct HtmlTableParser<R> {
    container: Selector,
    row: Selector,
    fields: Vec<(&'static str, Selector)>,
    _record: PhantomData<fn() -> R>,
}

fn compile(css: &str) -> ScraperResult<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("'{css}': {e}")))
}

impl<R: TableRecord> HtmlTableParser<R> {
    pub fn new() -> ScraperResult<Self> {
        let fields = R::FIELDS
            .iter()
            .map(|(name, css)| compile(css).map(|selector| (*name, selector)))
            .collect::<ScraperResult<Vec<_>>>()?;

        Ok(Self {
            container: compile(R::CONTAINER)?,
            row: compile(R::ROW)?,
            fields,
            _record: PhantomData,
        })
    }

    fn structure_error(page: &Page, reason: impl Into<String>) -> ScraperError {
        ScraperError::ParseStructure {
            url: page.url.to_string(),
            reason: reason.into(),
        }
    }
}

impl<R: TableRecord + Send> RecordParser for HtmlTableParser<R> {
    type Record = R;

    fn parse_page(&self, page: &Page, page_index: u32) -> ScraperResult<Vec<R>> {
        if page.body.trim().is_empty() {
            return Err(Self::structure_error(page, "empty body"));
        }

        let document = Html::parse_document(&page.body);
        trace!("Parsing HTML content: {}", page.body);

        let container = document.select(&self.container).next().ok_or_else(|| {
            Self::structure_error(page, format!("no element matches '{}'", R::CONTAINER))
        })?;

        let records = container
            .select(&self.row)
            .enumerate()
            .map(|(i, element)| R::from_row(&Row::new(element, &self.fields, page_index, i + 1)))
            .collect::<ScraperResult<Vec<R>>>()?;

        debug!(
            "Page {} ({}): {} rows matching '{}'",
            page_index,
            page.url,
            records.len(),
            R::ROW
        );
        Ok(records)
    }
}
