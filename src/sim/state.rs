//! Session state and core simulation events
//!
//! A `Session` is one player working through one level: the avatar, the
//! world for the current attempt, and everything collaborators read after a
//! tick. There is no global game instance; callers own the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::level::{LevelDescriptor, LevelError};
use super::world::World;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World scrolling, collisions live
    Running,
    /// Frozen by the player, resumes where it left off
    Paused,
    /// Attempt ended by a deadly obstacle
    Dead,
    /// Attempt reached the end of the level
    Completed,
}

impl GamePhase {
    /// Dead or Completed
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Dead | GamePhase::Completed)
    }
}

/// Sound identifiers for the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Death,
    Complete,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Death => "death",
            SoundCue::Complete => "complete",
        }
    }
}

/// Result of an attempt, for the best-progress store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub level_id: String,
    pub progress_percent: f32,
}

/// Discrete events for effects, audio and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Avatar left the ground (at its bottom-centre)
    Jump { at: Vec2 },
    /// Avatar hit a deadly obstacle (at its centre)
    Death { at: Vec2 },
    /// Scroll cursor reached the level length
    LevelComplete { at: Vec2 },
    /// Emitted once per attempt on death or completion
    AttemptEnded(ProgressReport),
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Jump { .. } => Some(SoundCue::Jump),
            GameEvent::Death { .. } => Some(SoundCue::Death),
            GameEvent::LevelComplete { .. } => Some(SoundCue::Complete),
            GameEvent::AttemptEnded(_) => None,
        }
    }
}

/// One player on one level
#[derive(Debug, Clone)]
pub struct Session {
    /// Key for the best-progress store
    pub level_id: String,
    pub avatar: Avatar,
    /// World for the current attempt
    pub world: World,
    pub phase: GamePhase,
    /// Attempts started on this level, including the current one
    pub attempts: u32,
    /// Simulation ticks in the current attempt
    pub time_ticks: u64,
    /// Untouched world used to start each new attempt
    initial_world: World,
    /// Jump latched between ticks
    jump_requested: bool,
    /// Pending events for collaborators
    events: Vec<GameEvent>,
    /// Fixed-step wall-clock accumulator (seconds)
    pub(crate) accumulator: f32,
}

impl Session {
    /// Start the first attempt on `level`
    pub fn new(level_id: impl Into<String>, level: &LevelDescriptor) -> Result<Self, LevelError> {
        let world = World::new(level)?;
        let level_id = level_id.into();
        log::info!("Session started: {} ('{}')", level_id, level.name);

        Ok(Self {
            level_id,
            avatar: Avatar::new(),
            world: world.clone(),
            phase: GamePhase::Running,
            attempts: 1,
            time_ticks: 0,
            initial_world: world,
            jump_requested: false,
            events: Vec::new(),
            accumulator: 0.0,
        })
    }

    /// Ask for a jump on the next tick. Extra requests are harmless.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Consume the latched jump request
    pub(crate) fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Paused at {:.0}%", self.world.progress_percent);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            self.accumulator = 0.0;
            log::info!("Resumed");
        }
    }

    /// Begin a new attempt from the start of the level
    pub fn restart(&mut self) {
        self.attempts += 1;
        self.avatar.reset();
        self.world = self.initial_world.clone();
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.jump_requested = false;
        self.accumulator = 0.0;
        log::info!("Attempt {} on {}", self.attempts, self.level_id);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand pending events to collaborators
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn progress_report(&self) -> ProgressReport {
        ProgressReport {
            level_id: self.level_id.clone(),
            progress_percent: self.world.progress_percent,
        }
    }
}
