//! The three sandbox jobs and the plumbing their binaries share.

pub mod countries;
pub mod films;
pub mod teams;

use log::{error, info};
use serde::Serialize;

use crate::core::{Config, ResultTable};
use crate::http::{CachedFetcher, Fetcher, HttpFetcher};
use crate::output::write_output;
use crate::{ScraperResult, StatsTracker};

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("tablescraper", log::LevelFilter::Info)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();
}

/// HTTP fetcher for `config`, behind the response cache when one is set.
pub fn fetcher_from_config(config: &Config) -> ScraperResult<Box<dyn Fetcher>> {
    let http = HttpFetcher::new(config)?;
    match &config.cache_path {
        Some(path) => {
            info!("Using response cache at {}", path.display());
            Ok(Box::new(
                CachedFetcher::new(http, path)
                    .with_force_refresh(config.force_refresh)
                    .with_ignore_failed(config.ignore_failed),
            ))
        }
        None => Ok(Box::new(http)),
    }
}

/// Logs the run summary, then writes the table or hands back the error.
pub fn report<R: Serialize>(
    result: ScraperResult<ResultTable<R>>,
    stats: &StatsTracker,
    config: &Config,
) -> ScraperResult<()> {
    stats.finish();
    stats.log_summary();

    match result {
        Ok(table) => write_output(&table, config.output_path.as_deref(), config.output_format),
        Err(e) => {
            error!("Run aborted: {}", e);
            Err(e)
        }
    }
}
