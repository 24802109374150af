use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Number;

use crate::models::SportEvent;

/// Flat CSV row for one event; odds columns are empty when no price exists
/// and otherwise hold the price exactly as the snapshot wrote it
#[derive(Debug, Serialize)]
struct EventRow<'a> {
    #[serde(rename = "Id")]
    id: &'a str,
    #[serde(rename = "Sport")]
    sport_title: &'a str,
    #[serde(rename = "Sport Key")]
    sport_key: &'a str,
    #[serde(rename = "Home Team")]
    home_team: &'a str,
    #[serde(rename = "Away Team")]
    away_team: &'a str,
    #[serde(rename = "Commence Time")]
    commence_time: &'a str,
    #[serde(rename = "Bookmaker")]
    bookmaker: &'a str,
    #[serde(rename = "Home Odds")]
    home: Option<&'a Number>,
    #[serde(rename = "Draw Odds")]
    draw: Option<&'a Number>,
    #[serde(rename = "Away Odds")]
    away: Option<&'a Number>,
}

impl<'a> From<&'a SportEvent> for EventRow<'a> {
    fn from(event: &'a SportEvent) -> Self {
        Self {
            id: &event.id,
            sport_title: &event.sport_title,
            sport_key: &event.sport_key,
            home_team: &event.home_team,
            away_team: &event.away_team,
            commence_time: &event.commence_time,
            bookmaker: &event.bookmaker,
            home: event.odds.h2h.home(),
            draw: event.odds.h2h.draw(),
            away: event.odds.h2h.away(),
        }
    }
}

/// Write events as CSV with a header row
pub fn write_events_csv<W: Write>(events: &[SportEvent], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for event in events {
        csv_writer
            .serialize(EventRow::from(event))
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write events as pretty JSON in the snapshot's own shape
pub fn write_events_json<W: Write>(events: &[SportEvent], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, events).context("Failed to serialize events")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Numbered one-line-per-event listing
pub fn write_events_table<W: Write>(events: &[SportEvent], mut writer: W) -> Result<()> {
    if events.is_empty() {
        writeln!(writer, "No events found.")?;
    }
    for (i, event) in events.iter().enumerate() {
        writeln!(writer, "{}. {}", i + 1, event.format())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::repository::tests::sample_event;

    #[test]
    fn test_csv_has_header_and_blank_missing_odds() {
        let events = vec![sample_event("a", "soccer_epl", "EPL")];
        let mut out = Vec::new();
        write_events_csv(&events, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Id,Sport,Sport Key,Home Team,Away Team,Commence Time,Bookmaker,Home Odds,Draw Odds,Away Odds"
        );
        assert_eq!(
            lines.next().unwrap(),
            "a,EPL,soccer_epl,a home,a away,2025-03-01 15:00:00,Betfair,1.91,,2.05"
        );
    }

    #[test]
    fn test_csv_keeps_integer_prices() {
        let raw = r#"[{"id":"a","sport_key":"soccer_epl","sport_title":"EPL","home_team":"A",
            "away_team":"B","commence_time":"TBD","bookmaker":"","odds":{"h2h":{"home":2,"away":3.5}}}]"#;
        let events: Vec<SportEvent> = serde_json::from_str(raw).unwrap();
        let mut out = Vec::new();
        write_events_csv(&events, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1).unwrap(), "a,EPL,soccer_epl,A,B,TBD,,2,,3.5");
    }

    #[test]
    fn test_table_output() {
        let events = vec![sample_event("a", "soccer_epl", "EPL")];
        let mut out = Vec::new();
        write_events_table(&events, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1. a away @ a home [EPL]"));

        let mut out = Vec::new();
        write_events_table(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No events found.\n");
    }

    #[test]
    fn test_json_output_matches_snapshot_shape() {
        let events = vec![sample_event("a", "soccer_epl", "EPL")];
        let mut out = Vec::new();
        write_events_json(&events, &mut out).unwrap();
        let parsed: Vec<SportEvent> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, events);
    }
}
