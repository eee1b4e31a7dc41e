use serde::{Deserialize, Deserializer, Serialize};

use crate::parser::{Row, TableRecord};
use crate::ScraperResult;

/// One Oscar-winning film from the AJAX listing (`/pages/ajax-javascript/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilmRecord {
    #[serde(deserialize_with = "trimmed")]
    pub title: String,
    pub year: u16,
    pub nominations: u32,
    pub awards: u32,
    /// Only sent for the best picture winner.
    #[serde(default)]
    pub best_picture: bool,
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// A year link on the landing page; each one has its own JSON listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmYear(pub u16);

impl TableRecord for FilmYear {
    const CONTAINER: &'static str = "body";
    const ROW: &'static str = "a.year-link";
    const FIELDS: &'static [(&'static str, &'static str)] = &[];

    fn from_row(row: &Row<'_>) -> ScraperResult<Self> {
        row.coerce("year", &row.own_text()).map(FilmYear)
    }
}
