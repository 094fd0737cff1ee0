use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    PartialEq,
    Eq,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    #[strum(serialize = "home")]
    Home,
    #[strum(serialize = "away")]
    Away,
    // to_string is the display form; serialize is only a FromStr alias
    #[strum(to_string = "neutral", serialize = "neutral site")]
    Neutral,
}

#[derive(
    Debug, Serialize, Deserialize, Clone, PartialEq, Eq, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[strum(serialize = "final")]
    Final,
    #[strum(serialize = "upcoming")]
    Upcoming,
    #[strum(serialize = "tbd")]
    Tbd,
}

#[derive(
    Debug, Serialize, Deserialize, Clone, PartialEq, Eq, strum::Display, strum::IntoStaticStr,
)]
pub enum Outcome {
    W,
    L,
    T,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub score: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameLink {
    pub title: String,
    pub href: String,
}

/// One schedule entry, field order matching the emitted JSON object.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Game {
    pub venue_type: Option<VenueType>,
    pub weekday: String,
    pub date_text: String,
    pub status: GameStatus,

    // exactly one of result/kickoff is set, matching status; tbd carries neither
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickoff: Option<String>,

    pub divider_text: String,
    pub nebraska_logo_url: String,
    pub opponent_logo_url: String,
    pub opponent_name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv_network_logo_url: Option<String>,
    pub links: Vec<GameLink>,
}
