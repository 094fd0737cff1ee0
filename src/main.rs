use slog::Logger;

use huskerscrape::config::{self, Config};
use huskerscrape::output::{self, SchedulePayload};
use huskerscrape::scraping::huskers::Scraper;
use huskerscrape::scraping::ScheduleSource;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let logger = huskerscrape::log::setup();
    let config = config::load()?;

    let _log_guard = slog_scope::set_global_logger(logger.clone());
    slog_stdlog::init_with_level(log::Level::Info)?;
    slog::info!(logger, "boot");

    let mut scraper = Scraper::new(&config.scraper, &logger)?;
    let games = scrape_once(&mut scraper, config, &logger).await?;

    slog::info!(logger, "done"; "games" => games);
    Ok(())
}

async fn scrape_once<Source: ScheduleSource>(
    source: &mut Source,
    config: &'static Config,
    logger: &Logger,
) -> eyre::Result<usize> {
    slog::info!(logger, "scrape.start"; "source" => Source::NAME);
    let games = source.fetch_schedule().await?;

    let payload = SchedulePayload {
        source_url: config.scraper.source_url.clone(),
        scraped_at: chrono::Utc::now(),
        games,
    };
    output::write(&payload, &config.output, logger)?;

    Ok(payload.games.len())
}
