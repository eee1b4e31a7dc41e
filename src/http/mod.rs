pub mod cache;
mod fetcher;
pub mod http_fetcher;
pub mod mock_fetcher;
mod page;

pub use cache::CachedFetcher;
pub use fetcher::Fetcher;
pub use http_fetcher::HttpFetcher;
pub use mock_fetcher::{MockFetcher, MockResponse};
pub use page::{Page, ResponseType};
