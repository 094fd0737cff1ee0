//! Turns the display strings captured off the page into [`Game`] values.

use slog::Logger;

use super::{RawGameItem, RawLink};
use crate::scraping::types::{Game, GameLink, GameResult, GameStatus, Outcome, VenueType};

pub fn multi(
    input: impl Iterator<Item = RawGameItem>,
    origin: &str,
    logger: &Logger,
) -> Vec<Game> {
    input
        .enumerate()
        .map(|(index, item)| deduct_all(item, origin, index, logger))
        .collect()
}

pub fn deduct_all(item: RawGameItem, origin: &str, index: usize, logger: &Logger) -> Game {
    let venue_type = deduct_venue(&item, index, logger);
    let (status, result, kickoff) = deduct_status(&item);
    let links = deduct_links(&item.links, origin);

    if let Some(result) = &result {
        if result.score.is_empty() {
            slog::warn!(logger, "field.missing"; "field" => "result.score", "item" => index);
        }
    }

    // a hole in one field degrades that field, never the whole record
    let require = |field: &'static str, value: Option<String>| -> String {
        match value.filter(|text| !text.is_empty()) {
            Some(text) => text,
            None => {
                slog::warn!(logger, "field.missing"; "field" => field, "item" => index);
                String::new()
            }
        }
    };

    Game {
        venue_type,
        weekday: require("weekday", item.weekday),
        date_text: require("date_text", item.date_text),
        status,
        result,
        kickoff,
        divider_text: require("divider_text", item.divider),
        nebraska_logo_url: require("nebraska_logo_url", item.nebraska_logo),
        opponent_logo_url: require("opponent_logo_url", item.opponent_logo),
        opponent_name: require("opponent_name", item.opponent_name),
        location: require("location", item.location),
        tv_network_logo_url: item.tv_logo,
        links,
    }
}

pub fn deduct_venue(item: &RawGameItem, index: usize, logger: &Logger) -> Option<VenueType> {
    let label = item.venue_label.as_deref()?.trim().to_lowercase();

    match label.parse::<VenueType>() {
        Ok(venue) => Some(venue),
        Err(_) => {
            slog::warn!(logger, "venue.unrecognized"; "label" => label, "item" => index);
            None
        }
    }
}

pub fn deduct_status(item: &RawGameItem) -> (GameStatus, Option<GameResult>, Option<String>) {
    if item.has_win || item.has_loss || item.has_tie {
        let outcome = match (item.has_win, item.has_loss) {
            (true, _) => Outcome::W,
            (_, true) => Outcome::L,
            _ => Outcome::T,
        };
        let score = item.result_label.as_deref().map(pick_score).unwrap_or_default();

        return (GameStatus::Final, Some(GameResult { outcome, score }), None);
    }

    match item.time_label.as_deref().filter(|text| !text.is_empty()) {
        Some(kickoff) => (GameStatus::Upcoming, None, Some(kickoff.to_owned())),
        None => (GameStatus::Tbd, None, None),
    }
}

// result labels mix words and the score ("Final 20-17", "W 31-14 2OT");
// the score is the last hyphenated token, or the whole label when none is
fn pick_score(label: &str) -> String {
    label
        .split_whitespace()
        .filter(|token| token.contains('-'))
        .last()
        .unwrap_or(label)
        .to_owned()
}

pub fn deduct_links(raw_links: &[RawLink], origin: &str) -> Vec<GameLink> {
    raw_links
        .iter()
        .filter_map(|link| {
            let href = link.href.as_deref()?;
            let href = match href.starts_with('/') && !href.starts_with("//") {
                true => format!("{origin}{href}"),
                false => href.to_owned(),
            };
            let title = link
                .title
                .clone()
                .unwrap_or_else(|| link.anchor_text.clone());

            Some(GameLink { title, href })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://huskers.com";

    fn test_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn deduct(item: RawGameItem) -> Game {
        deduct_all(item, ORIGIN, 0, &test_logger())
    }

    #[test]
    fn venue_labels_map_case_insensitively() {
        let venue = |label: &str| {
            deduct(RawGameItem {
                venue_label: Some(label.to_owned()),
                ..RawGameItem::default()
            })
            .venue_type
        };

        assert_eq!(venue("Home"), Some(VenueType::Home));
        assert_eq!(venue("AWAY"), Some(VenueType::Away));
        assert_eq!(venue("Neutral"), Some(VenueType::Neutral));
        assert_eq!(venue("  Neutral Site  "), Some(VenueType::Neutral));
        assert_eq!(venue("Exhibition"), None);
    }

    #[test]
    fn absent_venue_marker_yields_none() {
        assert_eq!(deduct(RawGameItem::default()).venue_type, None);
    }

    #[test]
    fn win_marker_beats_loss_and_tie() {
        let game = deduct(RawGameItem {
            has_win: true,
            has_loss: true,
            has_tie: true,
            result_label: Some("Final 20-17".to_owned()),
            ..RawGameItem::default()
        });

        assert_eq!(game.status, GameStatus::Final);
        assert_eq!(game.result.unwrap().outcome, Outcome::W);
    }

    #[test]
    fn loss_marker_alone_yields_a_loss() {
        let game = deduct(RawGameItem {
            has_loss: true,
            result_label: Some("Final 13-24".to_owned()),
            ..RawGameItem::default()
        });

        let result = game.result.unwrap();
        assert_eq!(result.outcome, Outcome::L);
        assert_eq!(result.score, "13-24");
    }

    #[test]
    fn tie_marker_alone_yields_a_tie() {
        let game = deduct(RawGameItem {
            has_tie: true,
            result_label: Some("Final 10-10".to_owned()),
            ..RawGameItem::default()
        });

        assert_eq!(game.result.unwrap().outcome, Outcome::T);
    }

    #[test]
    fn score_is_the_last_hyphenated_token() {
        assert_eq!(pick_score("Final 20-17"), "20-17");
        assert_eq!(pick_score("W 31-14 2OT"), "31-14");
        assert_eq!(pick_score("Series 1-0 Final 20-17"), "20-17");
    }

    #[test]
    fn label_without_hyphen_is_kept_whole() {
        assert_eq!(pick_score("Canceled"), "Canceled");
    }

    #[test]
    fn final_without_label_gets_an_empty_score() {
        let game = deduct(RawGameItem {
            has_win: true,
            ..RawGameItem::default()
        });

        assert_eq!(game.result.unwrap().score, "");
    }

    #[test]
    fn kickoff_text_without_markers_means_upcoming() {
        let game = deduct(RawGameItem {
            time_label: Some("11:00 AM CST".to_owned()),
            ..RawGameItem::default()
        });

        assert_eq!(game.status, GameStatus::Upcoming);
        assert_eq!(game.kickoff.as_deref(), Some("11:00 AM CST"));
        assert_eq!(game.result, None);
    }

    #[test]
    fn blank_kickoff_text_means_tbd() {
        let game = deduct(RawGameItem {
            time_label: Some(String::new()),
            ..RawGameItem::default()
        });

        assert_eq!(game.status, GameStatus::Tbd);
        assert_eq!(game.kickoff, None);
    }

    #[test]
    fn relative_links_resolve_against_the_origin() {
        let links = deduct_links(
            &[RawLink {
                title: Some("Box Score".to_owned()),
                href: Some("/boxscore/123".to_owned()),
                ..RawLink::default()
            }],
            ORIGIN,
        );

        assert_eq!(links[0].href, "https://huskers.com/boxscore/123");
    }

    #[test]
    fn absolute_and_protocol_relative_links_pass_through() {
        let links = deduct_links(
            &[
                RawLink {
                    href: Some("https://stats.example.com/recap".to_owned()),
                    ..RawLink::default()
                },
                RawLink {
                    href: Some("//cdn.example.com/live".to_owned()),
                    ..RawLink::default()
                },
            ],
            ORIGIN,
        );

        assert_eq!(links[0].href, "https://stats.example.com/recap");
        assert_eq!(links[1].href, "//cdn.example.com/live");
    }

    #[test]
    fn link_without_href_is_dropped() {
        let links = deduct_links(
            &[RawLink {
                title: Some("Gameday Info".to_owned()),
                ..RawLink::default()
            }],
            ORIGIN,
        );

        assert_eq!(links, Vec::new());
    }

    #[test]
    fn link_title_falls_back_to_anchor_text() {
        let links = deduct_links(
            &[RawLink {
                title: None,
                anchor_text: "Tickets".to_owned(),
                href: Some("/tickets".to_owned()),
            }],
            ORIGIN,
        );

        assert_eq!(links[0].title, "Tickets");
    }

    #[test]
    fn missing_required_fields_default_to_empty_strings() {
        let game = deduct(RawGameItem::default());

        assert_eq!(game.status, GameStatus::Tbd);
        assert_eq!(game.weekday, "");
        assert_eq!(game.date_text, "");
        assert_eq!(game.divider_text, "");
        assert_eq!(game.opponent_name, "");
        assert_eq!(game.location, "");
        assert_eq!(game.tv_network_logo_url, None);
    }
}
