use serde::{Deserialize, Serialize};

use crate::parser::{Row, TableRecord};
use crate::ScraperResult;

/// One season of one team from the hockey listing (`/pages/forms/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub year: u16,
    pub wins: u32,
    pub losses: u32,
    /// Blank on the source for seasons before overtime losses were counted.
    pub ot_losses: Option<u32>,
    pub win_pct: f64,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
}

impl TableRecord for TeamRecord {
    const CONTAINER: &'static str = "table.table";
    const ROW: &'static str = "tr.team";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "td.name"),
        ("year", "td.year"),
        ("wins", "td.wins"),
        ("losses", "td.losses"),
        ("ot_losses", "td.ot-losses"),
        ("win_pct", "td.pct"),
        ("goals_for", "td.gf"),
        ("goals_against", "td.ga"),
        ("goal_diff", "td.diff"),
    ];

    fn from_row(row: &Row<'_>) -> ScraperResult<Self> {
        let name = row.text("name")?;
        if name.is_empty() {
            return Err(row.error("name", "is empty"));
        }

        Ok(Self {
            name,
            year: row.parse("year")?,
            wins: row.parse("wins")?,
            losses: row.parse("losses")?,
            ot_losses: row.parse_optional("ot_losses")?,
            win_pct: row.parse("win_pct")?,
            goals_for: row.parse("goals_for")?,
            goals_against: row.parse("goals_against")?,
            goal_diff: row.parse("goal_diff")?,
        })
    }
}
