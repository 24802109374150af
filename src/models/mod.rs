use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Formats accepted for `commence_time` besides RFC 3339
const COMMENCE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A single sporting event as written by the odds scraper.
///
/// Only `sport_key` and `sport_title` are required. A record missing any other
/// field still loads, with that field left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportEvent {
    #[serde(default)]
    pub id: String,
    pub sport_key: String,
    pub sport_title: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub commence_time: String, // "YYYY-MM-DD HH:MM:SS", RFC 3339 or "TBD"
    #[serde(default)]
    pub bookmaker: String,
    #[serde(default)]
    pub odds: Odds,
    /// Fields the scraper may add later, echoed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SportEvent {
    /// Start time as local wall-clock time, `None` for "TBD" or an unknown format
    pub fn commence_at(&self) -> Option<NaiveDateTime> {
        self.commence_in(&Local)
    }

    /// Start time as wall-clock time in `tz`. Offset-qualified times are
    /// converted; naive times are taken to already be in `tz`.
    pub fn commence_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDateTime> {
        let raw = self.commence_time.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(tz).naive_local());
        }
        COMMENCE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    pub fn format(&self) -> String {
        let h2h = &self.odds.h2h;
        format!(
            "{} @ {} [{}] | {} | Home: {} | Draw: {} | Away: {} | {}",
            self.away_team,
            self.home_team,
            self.sport_title,
            self.commence_time,
            format_price(h2h.home()),
            format_price(h2h.draw()),
            format_price(h2h.away()),
            if self.bookmaker.is_empty() {
                "-"
            } else {
                &self.bookmaker
            }
        )
    }
}

fn format_price(price: Option<&Number>) -> String {
    match price.and_then(Number::as_f64) {
        Some(p) => format!("{:.2}", p),
        None => "-".to_string(),
    }
}

/// Markets available for an event. Only head-to-head is scraped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    #[serde(default)]
    pub h2h: HeadToHead,
}

/// Decimal head-to-head prices keyed by side, kept exactly as the scraper
/// wrote them (`2` stays `2`). A missing or null side means no price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadToHead(Map<String, Value>);

impl HeadToHead {
    pub fn new(home: Option<f64>, away: Option<f64>, draw: Option<f64>) -> Self {
        let mut prices = Map::new();
        for (side, price) in [("home", home), ("away", away), ("draw", draw)] {
            let value = price
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number);
            prices.insert(side.to_string(), value);
        }
        Self(prices)
    }

    pub fn home(&self) -> Option<&Number> {
        self.price("home")
    }

    pub fn away(&self) -> Option<&Number> {
        self.price("away")
    }

    pub fn draw(&self) -> Option<&Number> {
        self.price("draw")
    }

    fn price(&self, side: &str) -> Option<&Number> {
        match self.0.get(side) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }
}

/// One distinct sport present in the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportSummary {
    pub key: String,
    pub title: String,
}

/// Body of `POST /api/auth/login`. Fields are optional so a missing one is a 400, not a 422.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
