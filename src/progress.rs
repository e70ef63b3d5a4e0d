//! Best-progress store
//!
//! Tracks the furthest rounded percentage reached on each level. Persisted as
//! JSON next to the settings file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistError, load_json, save_json};
use crate::sim::ProgressReport;

/// Best progress per level id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestProgress {
    pub levels: BTreeMap<String, u8>,
}

impl BestProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best rounded percent for a level (0 if never played)
    pub fn best(&self, level_id: &str) -> u8 {
        self.levels.get(level_id).copied().unwrap_or(0)
    }

    /// Merge an attempt result. Returns true if it set a new best.
    pub fn record(&mut self, report: &ProgressReport) -> bool {
        let percent = report.progress_percent.clamp(0.0, 100.0).round() as u8;
        let best = self.levels.entry(report.level_id.clone()).or_insert(0);
        if percent > *best {
            log::info!("New best on {}: {}% (was {}%)", report.level_id, percent, best);
            *best = percent;
            true
        } else {
            false
        }
    }

    /// Levels finished at 100%
    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.levels
            .iter()
            .filter(|(_, p)| **p >= 100)
            .map(|(id, _)| id.as_str())
    }

    /// Load from disk, starting fresh on any failure
    pub fn load(path: &Path) -> Self {
        match load_json::<BestProgress>(path) {
            Ok(progress) => {
                log::info!("Loaded best progress for {} level(s)", progress.levels.len());
                progress
            }
            Err(PersistError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No best progress found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable best progress: {e}");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        save_json(path, self)?;
        log::info!("Best progress saved ({} level(s))", self.levels.len());
        Ok(())
    }
}
