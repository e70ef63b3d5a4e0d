//! Built-in level catalog
//!
//! Shipped as JSON and parsed through the same path as user levels.

use crate::sim::{LevelDescriptor, LevelError};

const CATALOG: &[&str] = &[
    include_str!("../levels/stereo_madness.json"),
    include_str!("../levels/back_on_track.json"),
    include_str!("../levels/polargeist.json"),
];

/// Number of built-in levels
pub fn count() -> usize {
    CATALOG.len()
}

/// Best-progress key for a catalog index (1-based: "level1", ...)
pub fn level_id(index: usize) -> String {
    format!("level{}", index + 1)
}

/// Parse catalog entry `index` (0-based). `None` past the end.
pub fn builtin(index: usize) -> Option<Result<LevelDescriptor, LevelError>> {
    CATALOG.get(index).map(|json| LevelDescriptor::from_json(json))
}

/// Catalog index for a level id such as "level2"
pub fn index_of(level_id: &str) -> Option<usize> {
    let n: usize = level_id.strip_prefix("level")?.parse().ok()?;
    (1..=count()).contains(&n).then(|| n - 1)
}
