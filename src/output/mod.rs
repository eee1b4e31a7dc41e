//! Output sink: renders a finished [`ResultTable`] as JSON or CSV.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::core::ResultTable;
use crate::{ScraperError, ScraperResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ScraperError::Config(format!(
                "unknown output format '{other}', expected json or csv"
            ))),
        }
    }
}

pub enum OutputWriter {
    File(fs::File),
    Stdout(io::Stdout),
}

impl OutputWriter {
    /// Truncates `path` if given, otherwise writes to stdout.
    pub fn open(path: Option<&Path>) -> ScraperResult<Self> {
        match path {
            Some(path) => Ok(Self::File(fs::File::create(path)?)),
            None => Ok(Self::Stdout(io::stdout())),
        }
    }

    pub fn write_table<R: Serialize>(
        &mut self,
        table: &ResultTable<R>,
        format: OutputFormat,
    ) -> ScraperResult<()> {
        match self {
            Self::File(file) => render(file, table, format),
            Self::Stdout(stdout) => render(&mut stdout.lock(), table, format),
        }
    }
}

/// Writes `table` to `writer`. CSV takes its header row from the record's
/// field names; an empty table produces an empty CSV.
pub fn render<W: Write, R: Serialize>(
    writer: &mut W,
    table: &ResultTable<R>,
    format: OutputFormat,
) -> ScraperResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, table)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *writer);
            for record in table {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
    }
    Ok(())
}

/// Writes `table` where `path` points (stdout when `None`).
pub fn write_output<R: Serialize>(
    table: &ResultTable<R>,
    path: Option<&Path>,
    format: OutputFormat,
) -> ScraperResult<()> {
    let mut writer = OutputWriter::open(path)?;
    writer.write_table(table, format)?;
    if let Some(path) = path {
        info!(
            "Wrote {} records to {} as {:?}",
            table.len(),
            path.display(),
            format
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TeamRecord;
    use tempfile::TempDir;

    fn table() -> ResultTable<TeamRecord> {
        ResultTable::from(vec![
            TeamRecord {
                name: "Boston Bruins".to_string(),
                year: 1990,
                wins: 44,
                losses: 24,
                ot_losses: None,
                win_pct: 0.55,
                goals_for: 299,
                goals_against: 264,
                goal_diff: 35,
            },
            TeamRecord {
                name: "Buffalo Sabres, NY".to_string(),
                year: 2011,
                wins: 39,
                losses: 32,
                ot_losses: Some(11),
                win_pct: 0.476,
                goals_for: 218,
                goals_against: 230,
                goal_diff: -12,
            },
        ])
    }

    #[test]
    fn test_csv_has_header_and_one_line_per_record() {
        let mut buf = Vec::new();
        render(&mut buf, &table(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "name,year,wins,losses,ot_losses,win_pct,goals_for,goals_against,goal_diff",
                "Boston Bruins,1990,44,24,,0.55,299,264,35",
                "\"Buffalo Sabres, NY\",2011,39,32,11,0.476,218,230,-12",
            ]
        );
    }

    #[test]
    fn test_json_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teams.json");
        fs::write(&path, "stale content from an earlier run").unwrap();

        write_output(&table(), Some(&path), OutputFormat::Json).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: Vec<TeamRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, table().into_records());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("tsv".parse::<OutputFormat>().is_err());
    }
}
