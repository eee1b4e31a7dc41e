use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use url::Url;

use super::{ScraperError, ScraperResult};
use crate::output::OutputFormat;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_MAX_PAGES: u32 = 1000;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "TABLESCRAPER_BASE_URL";
pub const ENV_OUTPUT: &str = "TABLESCRAPER_OUTPUT";
pub const ENV_FORMAT: &str = "TABLESCRAPER_FORMAT";
pub const ENV_CACHE: &str = "TABLESCRAPER_CACHE";
pub const ENV_TIMEOUT_SECS: &str = "TABLESCRAPER_TIMEOUT_SECS";
pub const ENV_MAX_PAGES: &str = "TABLESCRAPER_MAX_PAGES";
pub const ENV_USER_AGENT: &str = "TABLESCRAPER_USER_AGENT";
pub const ENV_FORCE_REFRESH: &str = "TABLESCRAPER_FORCE_REFRESH";
pub const ENV_IGNORE_FAILED: &str = "TABLESCRAPER_IGNORE_FAILED";

/// Settings for one run, handed to the fetcher and the output sink
/// explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub max_pages: u32,
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub cache_path: Option<PathBuf>,
    pub force_refresh: bool,
    pub ignore_failed: bool,
    pub output_path: Option<PathBuf>,
    pub output_format: OutputFormat,
}

impl Config {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            cache_path: None,
            force_refresh: false,
            ignore_failed: false,
            output_path: None,
            output_format: OutputFormat::default(),
        }
    }

    /// Defaults for `default_url`, overridden by `TABLESCRAPER_*` variables.
    pub fn from_env(default_url: &str) -> ScraperResult<Self> {
        Self::from_lookup(default_url, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_url: &str, lookup: F) -> ScraperResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(ENV_BASE_URL) {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| ScraperError::Config(format!("{ENV_BASE_URL}={raw}: {e}")))?,
            None => Url::parse(default_url)?,
        };
        let mut config = Self::new(base_url);

        if let Some(path) = lookup(ENV_OUTPUT) {
            config.output_path = Some(PathBuf::from(path));
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            config.output_format = format.parse()?;
        }
        if let Some(path) = lookup(ENV_CACHE) {
            config.cache_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| ScraperError::Config(format!("{ENV_TIMEOUT_SECS}={raw}: {e}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_MAX_PAGES) {
            let max_pages = raw
                .parse::<u32>()
                .map_err(|e| ScraperError::Config(format!("{ENV_MAX_PAGES}={raw}: {e}")))?;
            if max_pages == 0 {
                return Err(ScraperError::Config(format!(
                    "{ENV_MAX_PAGES} must be at least 1"
                )));
            }
            config.max_pages = max_pages;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = agent;
        }
        if let Some(raw) = lookup(ENV_FORCE_REFRESH) {
            config.force_refresh = parse_flag(ENV_FORCE_REFRESH, &raw)?;
        }
        if let Some(raw) = lookup(ENV_IGNORE_FAILED) {
            config.ignore_failed = parse_flag(ENV_IGNORE_FAILED, &raw)?;
        }

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Zero is raised to one; every run makes at least one request.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn with_ignore_failed(mut self, ignore_failed: bool) -> Self {
        self.ignore_failed = ignore_failed;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        self.output_path = Some(path.into());
        self.output_format = format;
        self
    }
}

fn parse_flag(key: &str, raw: &str) -> ScraperResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ScraperError::Config(format!("{key}={raw}: expected true or false"))),
    }
}
