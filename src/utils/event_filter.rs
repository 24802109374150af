use chrono::NaiveDate;

use crate::models::SportEvent;

/// Dashboard-style narrowing applied after the repository has loaded events
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Keep only events starting on this local calendar date
    pub on_date: Option<NaiveDate>,
    /// Keep only these event ids; empty keeps everything
    pub favorites: Vec<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &SportEvent) -> bool {
        if let Some(date) = self.on_date {
            match event.commence_at() {
                Some(at) if at.date() == date => {}
                _ => return false,
            }
        }

        self.favorites.is_empty() || self.favorites.iter().any(|id| *id == event.id)
    }

    /// Filter, then sort by start time. Events without a parseable time go last.
    pub fn apply(&self, events: Vec<SportEvent>) -> Vec<SportEvent> {
        let mut filtered: Vec<SportEvent> = events.into_iter().filter(|e| self.matches(e)).collect();
        sort_by_commence_time(&mut filtered);
        filtered
    }
}

/// Stable sort, earliest first
pub fn sort_by_commence_time(events: &mut [SportEvent]) {
    events.sort_by_key(|event| match event.commence_at() {
        Some(at) => (0, Some(at)),
        None => (1, None),
    });
}
