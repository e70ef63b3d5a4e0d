//! Dash Runner headless entry point
//!
//! Plays levels in idle mode on a jittery simulated frame clock, feeding
//! events to the effects layer and the best-progress store.
//!
//! Usage: `dash-runner [LEVEL...] [--attempts N] [--seed N] [--quality PRESET]`

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use dash_runner::consts::SIM_DT;
use dash_runner::effects::ParticleField;
use dash_runner::levels;
use dash_runner::renderer::{RenderSnapshot, Viewport};
use dash_runner::sim::{GameEvent, GamePhase, LevelDescriptor, LevelError, Session, TickInput, advance};
use dash_runner::{BestProgress, QualityPreset, Settings};

/// Give up on an attempt after this many frames (10 minutes at 60 fps)
const MAX_FRAMES: u32 = 60 * 60 * 10;

/// Play Dash Runner levels headlessly with the idle pilot
#[derive(Debug, Parser)]
#[command(name = "dash-runner", version, about)]
struct Options {
    /// Catalog number (`2`), level id (`level2`) or level JSON path.
    /// Every built-in level when omitted.
    #[arg(value_name = "LEVEL")]
    levels: Vec<String>,
    /// Attempts per level (stops early on completion)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    attempts: u32,
    /// Seed for the frame clock and particle effects
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Override the saved quality preset (low, medium, high)
    #[arg(long, value_name = "PRESET", value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

impl Options {
    /// Requested levels, or the whole catalog
    fn level_args(&self) -> Vec<String> {
        if self.levels.is_empty() {
            (0..levels::count()).map(levels::level_id).collect()
        } else {
            self.levels.clone()
        }
    }
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset: {s}"))
}

/// Resolve a command-line level into (level id, descriptor)
fn load_level(arg: &str) -> Result<(String, LevelDescriptor), String> {
    let index = levels::index_of(arg).or_else(|| {
        arg.parse::<usize>()
            .ok()
            .filter(|n| (1..=levels::count()).contains(n))
            .map(|n| n - 1)
    });

    if let Some(index) = index {
        let level = levels::builtin(index)
            .ok_or_else(|| format!("no built-in level {arg}"))?
            .map_err(|e| format!("built-in level {arg}: {e}"))?;
        return Ok((levels::level_id(index), level));
    }

    let path = Path::new(arg);
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let level = LevelDescriptor::from_json(&json)
        .map_err(|e: LevelError| format!("{}: {e}", path.display()))?;
    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg.to_string());
    Ok((id, level))
}

fn data_dir() -> PathBuf {
    std::env::var_os("DASH_RUNNER_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".dash-runner"))
}

/// Runs one level and owns everything that reacts to it
struct Runner<'a> {
    session: Session,
    effects: ParticleField,
    settings: &'a Settings,
    progress: &'a mut BestProgress,
    clock: Pcg32,
    // FPS tracking over simulated frame times
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
    elapsed: f64,
}

impl<'a> Runner<'a> {
    fn new(
        session: Session,
        settings: &'a Settings,
        progress: &'a mut BestProgress,
        seed: u64,
    ) -> Self {
        Self {
            session,
            effects: ParticleField::new(seed, settings),
            settings,
            progress,
            clock: Pcg32::seed_from_u64(seed ^ 0xc10c),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            elapsed: 0.0,
        }
    }

    /// Play one attempt to the end (or the frame cap)
    fn play_attempt(&mut self) -> GamePhase {
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..MAX_FRAMES {
            // Roughly 30-144 Hz with occasional hitches
            let dt = if self.clock.random_ratio(1, 200) {
                self.clock.random_range(0.05..0.25)
            } else {
                self.clock.random_range(SIM_DT * 0.4..SIM_DT * 2.0)
            };
            self.elapsed += dt as f64;

            let substeps = advance(&mut self.session, &input, dt);
            self.dispatch_events();
            for _ in 0..substeps {
                self.effects.update();
            }
            self.track_fps();

            if self.session.phase.is_terminal() {
                break;
            }
        }

        let snapshot = RenderSnapshot::capture(&self.session, Viewport::default(), self.settings);
        log::debug!(
            "Final frame: {} quads, {} live particles",
            snapshot.instances(Some(&self.effects)).len(),
            self.effects.particles.len()
        );
        self.session.phase
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            if let Some(cue) = event.sound() {
                log::debug!(
                    "sound: {} at volume {:.2}",
                    cue.as_str(),
                    self.settings.effective_sfx_volume()
                );
            }
            match &event {
                GameEvent::Jump { at } => log::trace!("jump at ({:.0}, {:.0})", at.x, at.y),
                GameEvent::AttemptEnded(report) => {
                    self.progress.record(report);
                }
                GameEvent::Death { .. } | GameEvent::LevelComplete { .. } => {}
            }
            self.effects.handle(&event, self.session.world.scroll_cursor);
        }
    }

    fn track_fps(&mut self) {
        self.frame_times[self.frame_index] = self.elapsed;
        self.frame_index = (self.frame_index + 1) % 60;

        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let window = self.elapsed - oldest_time;
            if window > 0.0 {
                self.fps = (60.0 / window).round() as u32;
            }
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.effects.clear();
    }
}

fn main() {
    env_logger::init();
    log::info!("Dash Runner (headless) starting...");

    let options = Options::parse();

    let dir = data_dir();
    let settings_path = dir.join("settings.json");
    let progress_path = dir.join("progress.json");
    let mut settings = Settings::load(&settings_path);
    if let Some(preset) = options.quality {
        settings.apply_preset(preset);
        log::info!("Quality preset: {}", preset.as_str());
    }
    let mut progress = BestProgress::load(&progress_path);

    for (n, arg) in options.level_args().iter().enumerate() {
        let (level_id, level) = match load_level(arg) {
            Ok(loaded) => loaded,
            Err(msg) => {
                eprintln!("error: {msg}");
                process::exit(1);
            }
        };
        let session = match Session::new(level_id.clone(), &level) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("error: {}: {e}", level.name);
                process::exit(1);
            }
        };

        if let Some(track) = &level.music {
            log::info!(
                "music: {} at volume {:.2}",
                track,
                settings.effective_music_volume()
            );
        }

        let seed = options.seed.wrapping_add(n as u64);
        let mut runner = Runner::new(session, &settings, &mut progress, seed);
        for attempt in 1..=options.attempts {
            if attempt > 1 {
                runner.restart();
            }
            let phase = runner.play_attempt();
            let s = &runner.session;
            let fps = if settings.show_fps {
                format!(", ~{} fps", runner.fps)
            } else {
                String::new()
            };
            println!(
                "{:<16} attempt {:>2}: {:<9} {:>5.1}%  ({} ticks{})",
                level.name,
                s.attempts,
                format!("{phase:?}"),
                s.world.progress_percent,
                s.time_ticks,
                fps,
            );
            if phase == GamePhase::Completed {
                break;
            }
        }
        println!("{:<16} best: {}%", level.name, progress.best(&level_id));
    }

    if let Err(e) = progress.save(&progress_path) {
        log::warn!("Could not save best progress: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_play_whole_catalog() {
        let options = Options::try_parse_from(["dash-runner"]).unwrap();
        assert_eq!(options.attempts, 1);
        assert_eq!(options.seed, 0x5eed);
        assert_eq!(options.quality, None);
        assert_eq!(options.level_args(), ["level1", "level2", "level3"]);
    }

    #[test]
    fn test_levels_and_flags() {
        let options = Options::try_parse_from([
            "dash-runner",
            "2",
            "custom.json",
            "--attempts",
            "3",
            "--quality",
            "HIGH",
        ])
        .unwrap();
        assert_eq!(options.level_args(), ["2", "custom.json"]);
        assert_eq!(options.attempts, 3);
        assert_eq!(options.quality, Some(QualityPreset::High));
    }

    #[test]
    fn test_rejects_zero_attempts_and_bad_quality() {
        assert!(Options::try_parse_from(["dash-runner", "--attempts", "0"]).is_err());
        assert!(Options::try_parse_from(["dash-runner", "--quality", "ultra"]).is_err());
    }

    #[test]
    fn test_load_level_resolves_catalog() {
        let (id, level) = load_level("2").unwrap();
        assert_eq!(id, "level2");
        assert_eq!(level.name, "Back On Track");
        assert_eq!(load_level("level3").unwrap().0, "level3");
        assert!(load_level("no-such-level.json").is_err());
    }
}
