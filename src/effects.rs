//! Particle and flash effects
//!
//! A downstream consumer of simulation events. Nothing here feeds back into
//! the simulation; randomness is seeded so effect playback is reproducible.
//! Particles live in world space so they stay behind as the level scrolls.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::colors;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Ticks a particle lives
pub const PARTICLE_LIFE: u32 = 30;
/// Alpha lost per tick
pub const PARTICLE_FADE: f32 = 0.02;
/// Particles per jump
pub const JUMP_BURST: usize = 10;
/// Particles per death (50 bursts of 20)
pub const DEATH_BURST: usize = 1000;

/// A single visual particle (world space)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    pub size: f32,
    pub life: u32,
    pub alpha: f32,
}

/// Full-screen flash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash {
    pub ticks_left: u32,
    pub intensity: f32,
}

/// Live particles and flashes
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub flashes: Vec<Flash>,
    rng: Pcg32,
    max_particles: usize,
    flash_enabled: bool,
}

impl ParticleField {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            particles: Vec::new(),
            flashes: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_particles: settings.max_particles(),
            flash_enabled: settings.effective_screen_flash(),
        }
    }

    /// React to a simulation event. Event positions are camera space and are
    /// moved into world space with `scroll_cursor`.
    pub fn handle(&mut self, event: &GameEvent, scroll_cursor: f32) {
        let to_world = |at: Vec2| Vec2::new(at.x + scroll_cursor, at.y);
        match event {
            GameEvent::Jump { at } => self.burst(to_world(*at), JUMP_BURST, colors::JUMP_DUST),
            GameEvent::Death { at } => {
                self.burst(to_world(*at), DEATH_BURST, colors::DEATH_BURST);
                if self.flash_enabled {
                    self.flashes.push(Flash {
                        ticks_left: 10,
                        intensity: 0.7,
                    });
                }
            }
            GameEvent::LevelComplete { .. } | GameEvent::AttemptEnded(_) => {}
        }
    }

    /// Spawn up to `count` particles radiating from `at`
    pub fn burst(&mut self, at: Vec2, count: usize, color: [f32; 4]) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(1.0..6.0);
            let size = self.rng.random_range(2.0..6.0);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                color,
                size,
                life: PARTICLE_LIFE,
                alpha: 1.0,
            });
        }
    }

    /// Age everything by one tick and drop what has faded
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
            p.alpha -= PARTICLE_FADE;
        }
        self.particles.retain(|p| p.life > 0 && p.alpha > 0.0);

        for flash in &mut self.flashes {
            flash.ticks_left = flash.ticks_left.saturating_sub(1);
        }
        self.flashes.retain(|f| f.ticks_left > 0);
    }

    /// Strongest active flash (0 when none)
    pub fn flash_intensity(&self) -> f32 {
        self.flashes
            .iter()
            .map(|f| f.intensity)
            .fold(0.0, f32::max)
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.flashes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::ProgressReport;

    fn field() -> ParticleField {
        ParticleField::new(7, &Settings::from_preset(QualityPreset::High))
    }

    #[test]
    fn test_jump_spawns_dust() {
        let mut fx = field();
        fx.handle(
            &GameEvent::Jump {
                at: Vec2::new(120.0, 500.0),
            },
            0.0,
        );
        assert_eq!(fx.particles.len(), JUMP_BURST);
        assert!(fx.particles.iter().all(|p| p.pos == Vec2::new(120.0, 500.0)));
        assert!(fx.flashes.is_empty());
    }

    #[test]
    fn test_death_burst_is_capped_and_flashes() {
        let mut fx = field();
        fx.handle(&GameEvent::Death { at: Vec2::ZERO }, 0.0);
        assert_eq!(fx.particles.len(), 1000);
        assert_eq!(fx.flash_intensity(), 0.7);

        let mut low = ParticleField::new(7, &Settings::from_preset(QualityPreset::Low));
        low.handle(&GameEvent::Death { at: Vec2::ZERO }, 0.0);
        assert_eq!(low.particles.len(), 100);
        assert!(low.flashes.is_empty());
    }

    #[test]
    fn test_burst_lands_in_world_space() {
        let mut fx = field();
        fx.handle(
            &GameEvent::Jump {
                at: Vec2::new(120.0, 500.0),
            },
            365.0,
        );
        assert!(fx.particles.iter().all(|p| p.pos == Vec2::new(485.0, 500.0)));
    }

    #[test]
    fn test_particles_expire() {
        let mut fx = field();
        fx.handle(&GameEvent::Jump { at: Vec2::ZERO }, 0.0);
        for _ in 0..PARTICLE_LIFE - 1 {
            fx.update();
        }
        assert_eq!(fx.particles.len(), JUMP_BURST);
        assert!(fx.particles.iter().all(|p| p.pos != Vec2::ZERO));
        fx.update();
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_flash_expires() {
        let mut fx = field();
        fx.handle(&GameEvent::Death { at: Vec2::ZERO }, 0.0);
        for _ in 0..10 {
            fx.update();
        }
        assert_eq!(fx.flash_intensity(), 0.0);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = field();
        let mut b = field();
        a.handle(&GameEvent::Jump { at: Vec2::ONE }, 0.0);
        b.handle(&GameEvent::Jump { at: Vec2::ONE }, 0.0);
        a.update();
        b.update();
        assert_eq!(a.particles, b.particles);
    }

    #[test]
    fn test_ignores_bookkeeping_events() {
        let mut fx = field();
        fx.handle(
            &GameEvent::AttemptEnded(ProgressReport {
                level_id: "level1".into(),
                progress_percent: 50.0,
            }),
            0.0,
        );
        fx.handle(&GameEvent::LevelComplete { at: Vec2::ZERO }, 0.0);
        assert!(fx.particles.is_empty());
        fx.clear();
    }
}
