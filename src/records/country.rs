use serde::{Deserialize, Serialize};

use crate::parser::{Row, TableRecord};
use crate::ScraperResult;

/// One country from the single-page listing (`/pages/simple/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub capital: String,
    pub population: u64,
    pub area_km2: f64,
}

impl TableRecord for CountryRecord {
    const CONTAINER: &'static str = "section#countries";
    const ROW: &'static str = "div.country";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "h3.country-name"),
        ("capital", "span.country-capital"),
        ("population", "span.country-population"),
        ("area_km2", "span.country-area"),
    ];

    fn from_row(row: &Row<'_>) -> ScraperResult<Self> {
        let name = row.text("name")?;
        if name.is_empty() {
            return Err(row.error("name", "is empty"));
        }

        Ok(Self {
            name,
            capital: row.text("capital")?,
            population: row.parse("population")?,
            area_km2: row.parse("area_km2")?,
        })
    }
}
