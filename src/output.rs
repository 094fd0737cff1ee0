use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slog::Logger;

use crate::scraping::types::Game;

/// What actually lands on disk: the games plus enough provenance to tell
/// where and when they were scraped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SchedulePayload {
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    pub games: Vec<Game>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub out: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out: PathBuf::from("data/huskers_schedule.json"),
        }
    }
}

pub fn write(payload: &SchedulePayload, config: &Config, logger: &Logger) -> eyre::Result<()> {
    if let Some(parent) = config.out.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&config.out, serde_json::to_string_pretty(payload)?)?;

    slog::info!(logger, "output.written";
        "path" => config.out.display().to_string(),
        "games" => payload.games.len(),
    );
    Ok(())
}

pub fn read(path: &Path) -> eyre::Result<SchedulePayload> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::types::{GameStatus, VenueType};
    use chrono::TimeZone;

    fn sample_payload() -> SchedulePayload {
        SchedulePayload {
            source_url: "https://huskers.com/sports/football/schedule".to_owned(),
            scraped_at: Utc.with_ymd_and_hms(2025, 9, 6, 18, 0, 0).unwrap(),
            games: vec![Game {
                venue_type: Some(VenueType::Home),
                weekday: "Saturday".to_owned(),
                date_text: "Sep 6".to_owned(),
                status: GameStatus::Tbd,
                result: None,
                kickoff: None,
                divider_text: "vs.".to_owned(),
                nebraska_logo_url: "https://cdn.huskers.com/logos/nebraska.svg".to_owned(),
                opponent_logo_url: "https://cdn.huskers.com/logos/akron.svg".to_owned(),
                opponent_name: "Akron".to_owned(),
                location: "Lincoln, Neb. / Memorial Stadium".to_owned(),
                tv_network_logo_url: None,
                links: Vec::new(),
            }],
        }
    }

    fn test_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huskerscrape-{}-{name}", std::process::id()))
    }

    #[test]
    fn envelope_keeps_provenance_next_to_the_games() {
        let value = serde_json::to_value(sample_payload()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(
            object["source_url"],
            "https://huskers.com/sports/football/schedule"
        );
        assert!(object["scraped_at"]
            .as_str()
            .unwrap()
            .starts_with("2025-09-06T18:00:00"));
        assert_eq!(object["games"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn write_creates_parent_directories_and_reads_back() {
        let dir = temp_dir("write");
        let config = Config {
            out: dir.join("data/huskers_schedule.json"),
        };

        let payload = sample_payload();
        write(&payload, &config, &test_logger()).unwrap();
        let read_back = read(&config.out).unwrap();

        assert_eq!(read_back, payload);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn read_of_a_missing_file_is_an_error() {
        let dir = temp_dir("missing");
        assert!(read(&dir.join("nope.json")).is_err());
    }
}
