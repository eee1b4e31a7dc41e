pub mod core;
pub mod exercises;
pub mod http;
pub mod output;
pub mod parser;
pub mod records;
pub mod stats;

pub use crate::core::{Config, ListingRequest, PaginatedTableFetcher, ResultTable};
pub use crate::core::{ScraperError, ScraperResult};
pub use http::{Fetcher, HttpFetcher, Page};
pub use parser::RecordParser;
pub use stats::StatsTracker;
