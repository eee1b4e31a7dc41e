use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} previously failed: {message}")]
    CachedFailure { url: String, message: String },

    #[error("Unexpected document structure at {url}: {reason}")]
    ParseStructure { url: String, reason: String },

    #[error("Page {page}, row {row}: field '{field}' {reason}")]
    FieldExtraction {
        page: u32,
        row: usize,
        field: String,
        reason: String,
    },

    #[error("No end-of-data page within {limit} pages")]
    PageLimitExceeded { limit: u32 },

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScraperError {
    /// True for failures of the retrieval itself, as opposed to failures
    /// interpreting what was retrieved.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_) | ScraperError::Status { .. } | ScraperError::CachedFailure { .. }
        )
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
