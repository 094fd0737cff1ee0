use std::panic::Location;

use scraper::{ElementRef, Html, Selector};
use slog::Logger;

use super::types::Game;

const SOURCE_URL: &'static str = "https://huskers.com/sports/football/schedule";
const USER_AGENT: &'static str = "huskers-schedule-scraper/1.0 (+https://example.com)";

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),
    #[error("huskers.com has changed their webpage")]
    ParsingFailed(&'static Location<'static>),
}

macro_rules! loc {
    () => {
        Location::caller()
    };
}

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub user_agent: String,
    pub timeout: std::time::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_owned(),
            user_agent: USER_AGENT.to_owned(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}

/// Everything read off one `.schedule-event-item`, still as display strings.
/// Normalization into a [`Game`] happens in [`deduct`].
#[derive(Debug, Default)]
pub struct RawGameItem {
    pub venue_label: Option<String>,
    pub weekday: Option<String>,
    pub date_text: Option<String>,

    pub has_win: bool,
    pub has_loss: bool,
    pub has_tie: bool,
    pub result_label: Option<String>,
    pub time_label: Option<String>,

    pub divider: Option<String>,
    pub nebraska_logo: Option<String>,
    pub opponent_logo: Option<String>,
    pub opponent_name: Option<String>,
    pub location: Option<String>,
    pub tv_logo: Option<String>,
    pub links: Vec<RawLink>,
}

#[derive(Debug, Default)]
pub struct RawLink {
    pub title: Option<String>,
    pub anchor_text: String,
    pub href: Option<String>,
}

mod deduct;

pub struct Scraper {
    client: reqwest::Client,
    config: &'static Config,
    origin: String,
    logger: Logger,
}

impl Scraper {
    pub fn new(config: &'static Config, logger: &Logger) -> eyre::Result<Self> {
        let origin = source_origin(&config.source_url)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            origin,
            logger: logger.new(slog::o!("subsystem" => "scraper")),
        })
    }

    async fn fetch(&self) -> Result<String, ScrapeError> {
        slog::debug!(self.logger, "fetch.start"; "url" => self.config.source_url.clone());

        let body = self
            .client
            .get(&self.config.source_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        slog::debug!(self.logger, "fetch.done"; "bytes" => body.len());
        Ok(body)
    }

    /// Split out from [`Scraper::scrape`] so unit tests can run it on canned
    /// HTML without a network.
    pub fn parse_document(html: &str) -> Result<Vec<RawGameItem>, ScrapeError> {
        const ITEM_SELECTOR: &str = ".schedule-event-item";

        let document = Html::parse_document(html);
        let item_selector = Selector::parse(ITEM_SELECTOR).expect("static selector");

        let items: Vec<RawGameItem> = document.select(&item_selector).map(parse_item).collect();

        // zero matches means the markup moved out from under us
        if items.is_empty() {
            return Err(ScrapeError::ParsingFailed(loc!()));
        }

        Ok(items)
    }

    pub async fn scrape(&self) -> Result<Vec<Game>, ScrapeError> {
        let html = self.fetch().await?;
        let raw = Self::parse_document(&html)?;

        let games = deduct::multi(raw.into_iter(), &self.origin, &self.logger);
        slog::debug!(self.logger, "parse.done"; "games" => games.len());
        Ok(games)
    }
}

fn parse_item(item: ElementRef<'_>) -> RawGameItem {
    const VENUE_SELECTOR: &str = ".schedule-event-venue__type-label";
    const WEEKDAY_SELECTOR: &str = ".schedule-event-date__time time";
    const DATE_SELECTOR: &str = ".schedule-event-date__label";

    const WIN_SELECTOR: &str = ".schedule-event-item-result__win";
    const LOSS_SELECTOR: &str = ".schedule-event-item-result__loss";
    const TIE_SELECTOR: &str = ".schedule-event-item-result__tie";
    const RESULT_LABEL_SELECTOR: &str =
        ".schedule-event-item-result__label, .schedule-event-item-result__wrapper";
    const TIME_LABEL_SELECTOR: &str = ".schedule-event-item-result__label";

    const IMAGE_WRAPPER_SELECTOR: &str =
        ".schedule-event-item-default__images .schedule-event-item-default__image-wrapper";
    const IMG_SELECTOR: &str = "img";
    const DIVIDER_SELECTOR: &str = ".schedule-event-item-default__divider";
    const OPPONENT_SELECTOR: &str = ".schedule-event-item-default__opponent-name";
    const LOCATION_SELECTOR: &str =
        ".schedule-event-item-default__location .schedule-event-location";

    const TV_LOGO_SELECTOR: &str =
        ".schedule-event-bottom__link img, .schedule-event-item-links__image";
    const LINK_SELECTOR: &str = ".schedule-event-bottom__link";
    const LINK_TITLE_SELECTOR: &str = ".schedule-event-item-links__title";

    let img_selector = Selector::parse(IMG_SELECTOR).expect("static selector");
    let wrappers: Vec<ElementRef> = {
        let wrapper_selector = Selector::parse(IMAGE_WRAPPER_SELECTOR).expect("static selector");
        item.select(&wrapper_selector).collect()
    };
    let wrapper_img = |index: usize| -> Option<String> {
        wrappers
            .get(index)
            .and_then(|wrapper| wrapper.select(&img_selector).next())
            .and_then(img_src)
    };

    let link_selector = Selector::parse(LINK_SELECTOR).expect("static selector");
    let links = item
        .select(&link_selector)
        .map(|anchor| RawLink {
            title: first_text(anchor, LINK_TITLE_SELECTOR),
            anchor_text: collapsed_text(anchor),
            href: anchor.attr("href").map(str::to_owned),
        })
        .collect();

    RawGameItem {
        venue_label: first_text(item, VENUE_SELECTOR),
        weekday: first_text(item, WEEKDAY_SELECTOR),
        date_text: first_text(item, DATE_SELECTOR),

        has_win: first_element(item, WIN_SELECTOR).is_some(),
        has_loss: first_element(item, LOSS_SELECTOR).is_some(),
        has_tie: first_element(item, TIE_SELECTOR).is_some(),
        result_label: first_element(item, RESULT_LABEL_SELECTOR).map(collapsed_text),
        time_label: first_text(item, TIME_LABEL_SELECTOR),

        divider: first_text(item, DIVIDER_SELECTOR),
        nebraska_logo: wrapper_img(0),
        opponent_logo: wrapper_img(1),
        opponent_name: first_text(item, OPPONENT_SELECTOR),
        location: first_element(item, LOCATION_SELECTOR).map(collapsed_text),
        tv_logo: first_element(item, TV_LOGO_SELECTOR).and_then(img_src),
        links,
    }
}

fn first_element<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).expect("static selector");
    scope.select(&selector).next()
}

fn first_text(scope: ElementRef<'_>, selector: &str) -> Option<String> {
    first_element(scope, selector).map(text_of)
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// src with a data-src fallback; lazy-load placeholders don't count as a URL
fn img_src(img: ElementRef<'_>) -> Option<String> {
    for attr in ["src", "data-src"] {
        if let Some(value) = img.attr(attr) {
            if !value.is_empty() && !value.starts_with("data:image") {
                return Some(value.to_owned());
            }
        }
    }
    None
}

fn source_origin(source_url: &str) -> eyre::Result<String> {
    let url = reqwest::Url::parse(source_url)?;
    Ok(url.origin().ascii_serialization())
}

impl super::ScheduleSource for Scraper {
    fn fetch_schedule(
        &mut self,
    ) -> impl std::future::Future<Output = eyre::Result<Vec<Game>>> + Send {
        async move { self.scrape().await.map_err(eyre::Report::from) }
    }

    const NAME: &'static str = "huskers";
}
