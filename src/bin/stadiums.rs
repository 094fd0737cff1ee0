fn main() -> eyre::Result<()> {
    let logger = huskerscrape::log::setup();
    let config = huskerscrape::config::load()?;

    let _log_guard = slog_scope::set_global_logger(logger.clone());
    slog_stdlog::init_with_level(log::Level::Info)?;
    slog::info!(logger, "boot");

    huskerscrape::stadiums::run(&config.stadiums, &logger)
}
