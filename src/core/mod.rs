pub mod config;
mod errors;
mod listing;
mod paginator;
mod table;

pub use config::Config;
pub use errors::{ScraperError, ScraperResult};
pub use listing::ListingRequest;
pub use paginator::PaginatedTableFetcher;
pub use table::ResultTable;
