use scraper::{ElementRef, Selector};
use std::fmt::Display;
use std::str::FromStr;

use crate::{ScraperError, ScraperResult};

/// One element matched by a row marker, with the table's field selectors.
pub struct Row<'a> {
    element: ElementRef<'a>,
    fields: &'a [(&'static str, Selector)],
    page: u32,
    index: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(
        element: ElementRef<'a>,
        fields: &'a [(&'static str, Selector)],
        page: u32,
        index: usize,
    ) -> Self {
        Self {
            element,
            fields,
            page,
            index,
        }
    }

    /// 1-based position of the row within its page.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Trimmed text of the first element matching `field`'s selector.
    pub fn text(&self, field: &'static str) -> ScraperResult<String> {
        let selector = self
            .fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, selector)| selector)
            .ok_or_else(|| ScraperError::Selector(format!("no selector declared for '{field}'")))?;

        self.element
            .select(selector)
            .next()
            .map(trimmed_text)
            .ok_or_else(|| self.error(field, "is missing"))
    }

    /// Trimmed text of the row element itself.
    pub fn own_text(&self) -> String {
        trimmed_text(self.element)
    }

    /// Required field: must be present, non-empty and parse as `T`.
    pub fn parse<T>(&self, field: &'static str) -> ScraperResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.text(field)?;
        self.coerce(field, &raw)
    }

    /// Field whose cell must exist but may be blank.
    pub fn parse_optional<T>(&self, field: &'static str) -> ScraperResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.text(field)?;
        if raw.is_empty() {
            return Ok(None);
        }
        self.coerce(field, &raw).map(Some)
    }

    /// Parses `raw` as `T`. Thousands separators are stripped first.
    pub fn coerce<T>(&self, field: &'static str, raw: &str) -> ScraperResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        if raw.is_empty() {
            return Err(self.error(field, "is empty"));
        }
        let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
        cleaned
            .parse::<T>()
            .map_err(|e| self.error(field, &format!("could not parse '{raw}': {e}")))
    }

    pub fn error(&self, field: &str, reason: &str) -> ScraperError {
        ScraperError::FieldExtraction {
            page: self.page,
            row: self.index,
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
