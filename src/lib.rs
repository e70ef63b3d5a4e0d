//! Dash Runner - a side-scrolling one-button obstacle dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, scrolling world, collisions)
//! - `effects`: Particle/flash collaborator fed by simulation events
//! - `renderer`: Read-only render snapshots and GPU instance data
//! - `progress`: Best-progress store per level
//! - `persistence`: JSON file load/save helpers
//! - `levels`: Built-in level catalog

pub mod effects;
pub mod levels;
pub mod persistence;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use progress::BestProgress;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Physics values are per fixed simulation tick, not per second.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the level data was tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Cosmetic spin per unit of vertical velocity
    pub const ROTATION_COEFF: f32 = 0.1;

    /// Ground line (screen y grows downward)
    pub const GROUND_Y: f32 = 500.0;
    /// Avatar is a square of this size
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Fixed horizontal screen position of the avatar
    pub const PLAYER_X: f32 = 100.0;
    /// Number of trail samples kept for rendering
    pub const TRAIL_LENGTH: usize = 10;

    /// World distance scrolled per tick
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Obstacles this far behind the camera are dropped for good
    pub const REMOVAL_MARGIN: f32 = 100.0;

    /// Logical viewport
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Portal spin per tick (radians)
    pub const PORTAL_SPIN: f32 = 0.1;
    /// Moving platform excursion when a level omits `moveDistance`
    pub const DEFAULT_MOVE_DISTANCE: f32 = 100.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
