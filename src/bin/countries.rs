use tablescraper::exercises::{self, countries};
use tablescraper::{Config, Fetcher, ScraperResult};

#[tokio::main]
async fn main() -> ScraperResult<()> {
    exercises::init_logging();

    let config = Config::from_env(countries::DEFAULT_URL)?;
    let fetcher = exercises::fetcher_from_config(&config)?;
    let stats = fetcher.stats().clone();

    let result = countries::run(fetcher, &config).await;
    exercises::report(result, &stats, &config)
}
