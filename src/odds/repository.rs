use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{error, info};

use crate::error::SnapshotError;
use crate::models::{SportEvent, SportSummary};
use crate::odds::cache::SnapshotCache;

/// Read-only access to the scraper's JSON snapshot.
///
/// Without a cache every call re-reads and re-parses the whole file, so two
/// calls in quick succession may see different data if the scraper rewrote it.
pub struct OddsRepository {
    path: PathBuf,
    cache: Option<SnapshotCache>,
}

impl OddsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    /// A zero `ttl` disables caching
    pub fn with_cache_ttl(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            cache: (!ttl.is_zero()).then(|| SnapshotCache::new(ttl)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_snapshot(&self) -> Result<Vec<SportEvent>, SnapshotError> {
        match &self.cache {
            Some(cache) => cache.load(&self.path).await,
            None => read_snapshot(&self.path).await,
        }
    }

    pub async fn list_by_sport(&self, key: &str) -> Result<Vec<SportEvent>, SnapshotError> {
        let events = filter_by_sport(self.load_snapshot().await?, key);
        info!(sport_key = key, count = events.len(), "filtered odds by sport");
        Ok(events)
    }

    pub async fn list_sports(&self) -> Result<Vec<SportSummary>, SnapshotError> {
        let sports = distinct_sports(&self.load_snapshot().await?);
        info!(count = sports.len(), "found unique sports");
        Ok(sports)
    }
}

/// Read and parse the snapshot at `path`, bypassing any cache
pub async fn read_snapshot(path: &Path) -> Result<Vec<SportEvent>, SnapshotError> {
    info!(path = %path.display(), "reading odds data");

    let raw = tokio::fs::read(path).await.map_err(|source| {
        error!(path = %path.display(), error = %source, "odds data file not readable");
        SnapshotError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let events = parse_snapshot(&raw).map_err(|reason| {
        error!(path = %path.display(), %reason, "odds data file malformed");
        SnapshotError::MalformedSnapshot {
            path: path.to_path_buf(),
            reason,
        }
    })?;

    info!(bytes = raw.len(), events = events.len(), "loaded odds data");
    Ok(events)
}

/// Parse snapshot bytes into events. Every record must carry a non-empty `sport_key`.
pub fn parse_snapshot(raw: &[u8]) -> Result<Vec<SportEvent>, String> {
    let events: Vec<SportEvent> = serde_json::from_slice(raw).map_err(|e| e.to_string())?;

    if let Some(index) = events.iter().position(|e| e.sport_key.trim().is_empty()) {
        return Err(format!("record {index} has an empty sport_key"));
    }

    Ok(events)
}

/// Keep events whose `sport_key` equals `key` exactly, or whose `sport_title`
/// contains `key` ignoring case
pub fn filter_by_sport(events: Vec<SportEvent>, key: &str) -> Vec<SportEvent> {
    let needle = key.to_lowercase();
    events
        .into_iter()
        .filter(|event| {
            event.sport_key == key || event.sport_title.to_lowercase().contains(&needle)
        })
        .collect()
}

/// One summary per distinct `sport_key`, in first-seen order. The first title seen for a key wins.
pub fn distinct_sports(events: &[SportEvent]) -> Vec<SportSummary> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|event| seen.insert(event.sport_key.as_str()))
        .map(|event| SportSummary {
            key: event.sport_key.clone(),
            title: event.sport_title.clone(),
        })
        .collect()
}
