pub mod config;
pub mod log;
pub mod output;
pub mod scraping;
pub mod stadiums;
