use tablescraper::exercises::{self, teams};
use tablescraper::{Config, Fetcher, ScraperResult};

#[tokio::main]
async fn main() -> ScraperResult<()> {
    exercises::init_logging();

    let config = Config::from_env(teams::DEFAULT_URL)?;
    let fetcher = exercises::fetcher_from_config(&config)?;
    let stats = fetcher.stats().clone();

    let result = teams::run(fetcher, &config).await;
    exercises::report(result, &stats, &config)
}
