use crate::http::Page;
use crate::ScraperResult;

/// Structural parse seam: one retrieved page in, its records out.
///
/// `Ok(vec![])` means the page was well formed but held no rows, which the
/// paginated fetcher reads as end of data. A body that does not have the
/// expected structure at all is a [`crate::ScraperError::ParseStructure`].
pub trait RecordParser: Send + Sync {
    type Record: Send;

    fn parse_page(&self, page: &Page, page_index: u32) -> ScraperResult<Vec<Self::Record>>;
}
