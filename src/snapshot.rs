//! Periodic JSON checkpoints for offline inspection. Observability output
//! only; nothing in the simulation reads these back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::world::WorldSnapshot;

/// One snapshot file: capture time plus the world view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub captured_at: String,
    pub world: WorldSnapshot,
}

pub struct SnapshotWriter {
    dir: PathBuf,
    interval_ticks: u64,
}

impl SnapshotWriter {
    pub fn new(dir: impl AsRef<Path>, interval_ticks: u64) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            interval_ticks,
        }
    }

    /// Write `tick_NNNNNN.json` under `<dir>/<scenario>/` when the tick
    /// lands on the configured interval. Interval 0 disables snapshots.
    pub fn maybe_write(&self, snapshot: &WorldSnapshot) -> Result<Option<PathBuf>> {
        if self.interval_ticks == 0 || snapshot.tick % self.interval_ticks != 0 {
            return Ok(None);
        }
        let dir = self.dir.join(&snapshot.scenario);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create snapshot dir {}", dir.display()))?;
        let path = dir.join(format!("tick_{:06}.json", snapshot.tick));
        let record = SnapshotRecord {
            captured_at: Utc::now().to_rfc3339(),
            world: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        tracing::debug!(path = %path.display(), tick = snapshot.tick, "snapshot written");
        Ok(Some(path))
    }
}
