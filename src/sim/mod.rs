//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, constants expressed per tick
//! - Single writer: only `tick` mutates a running session
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod level;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use avatar::{Avatar, TrailPoint};
pub use level::{
    Decoration, DecorationShape, LevelDescriptor, LevelError, ObstacleOptions, ObstacleTemplate,
    PortalKind, ShapeKind,
};
pub use obstacle::{Obstacle, ObstacleKind};
pub use rect::{Rect, overlaps};
pub use state::{GameEvent, GamePhase, ProgressReport, Session, SoundCue};
pub use tick::{TickInput, TickOutcome, advance, tick};
pub use world::{World, WorldState, progress_for};
