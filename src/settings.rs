//! Game settings and preferences
//!
//! Persisted separately from best progress as a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TRAIL_LENGTH;
use crate::persistence::{PersistError, load_json, save_json};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.3,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Avatar trail
    pub trails: bool,
    /// Jump dust and death bursts
    pub particles: bool,
    /// White flash on death
    pub screen_flash: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            trails: true,
            particles: true,
            screen_flash: true,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables the flash for performance
        if preset == QualityPreset::Low {
            self.screen_flash = false;
        }
    }

    /// Effective death flash (respects reduced_motion)
    pub fn effective_screen_flash(&self) -> bool {
        self.screen_flash && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Number of trail samples the renderer should draw
    pub fn trail_samples(&self) -> usize {
        if !self.trails {
            return 0;
        }
        (TRAIL_LENGTH as f32 * self.quality.trail_quality()).round() as usize
    }

    /// Sound effect gain after the master volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Music gain after the master volume
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match load_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(PersistError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_low_preset_disables_flash() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.effective_screen_flash());
        assert_eq!(settings.max_particles(), 100);
        assert_eq!(settings.trail_samples(), 3);
    }

    #[test]
    fn test_reduced_motion_and_toggles() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_flash());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_flash());

        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
        settings.trails = false;
        assert_eq!(settings.trail_samples(), 0);
    }

    #[test]
    fn test_effective_volumes() {
        let mut settings = Settings::default();
        settings.master_volume = 0.5;
        settings.sfx_volume = 0.5;
        settings.music_volume = 1.0;
        assert_eq!(settings.effective_sfx_volume(), 0.25);
        assert_eq!(settings.effective_music_volume(), 0.5);

        settings.master_volume = 3.0;
        assert_eq!(settings.effective_music_volume(), 1.0);
        settings.master_volume = 0.0;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_high_preset_full_trail() {
        assert_eq!(
            Settings::from_preset(QualityPreset::High).trail_samples(),
            TRAIL_LENGTH
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"quality": "High", "show_fps": true}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.show_fps);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.music_volume = 0.25;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }
}
