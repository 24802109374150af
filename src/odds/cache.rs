use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::SnapshotError;
use crate::models::SportEvent;
use crate::odds::repository::read_snapshot;

struct CachedSnapshot {
    events: Vec<SportEvent>,
    modified: Option<SystemTime>,
    loaded_at: Instant,
}

/// Time-boxed snapshot cache.
///
/// An entry is served only while it is younger than `ttl` and the file's
/// modification time is unchanged. The file is stat'ed on every call, so a
/// deleted snapshot fails immediately instead of serving stale data.
pub struct SnapshotCache {
    ttl: Duration,
    slot: RwLock<Option<CachedSnapshot>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub async fn load(&self, path: &Path) -> Result<Vec<SportEvent>, SnapshotError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| SnapshotError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        let modified = metadata.modified().ok();

        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref() {
                if cached.modified == modified && cached.loaded_at.elapsed() < self.ttl {
                    debug!(path = %path.display(), "serving cached odds snapshot");
                    return Ok(cached.events.clone());
                }
            }
        }

        let events = read_snapshot(path).await?;
        let mut slot = self.slot.write().await;
        *slot = Some(CachedSnapshot {
            events: events.clone(),
            modified,
            loaded_at: Instant::now(),
        });
        Ok(events)
    }

    #[cfg(test)]
    pub(crate) async fn invalidate(&self) {
        self.slot.write().await.take();
    }
}
