use std::path::Path;

use crate::{output, scraping::huskers, stadiums};

#[derive(serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub scraper: huskers::Config,
    pub output: output::Config,
    pub stadiums: stadiums::Config,
}

/// Reads the config file named on the command line, `config.toml` by
/// default. Running without any config file at all is fine; an explicitly
/// named file that doesn't exist is not.
pub fn load() -> eyre::Result<&'static Config> {
    let config_file = std::env::args().nth(1).unwrap_or("config.toml".to_string());

    let config = match Path::new(&config_file).exists() {
        true => toml::from_str(std::fs::read_to_string(&config_file)?.as_ref())?,
        false if config_file == "config.toml" => Config::default(),
        false => eyre::bail!("config file not found: {config_file}"),
    };

    Ok(Box::leak(Box::new(config)))
}
