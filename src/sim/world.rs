//! The scrolling world
//!
//! Owns the scroll cursor and every live obstacle for one attempt.

use serde::{Deserialize, Serialize};

use super::level::{Decoration, LevelDescriptor, LevelError, ObstacleTemplate, validate_template};
use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::consts::REMOVAL_MARGIN;

/// Per-attempt world state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldState {
    /// Scrolling and colliding
    Running,
    /// Frozen after death or completion; never resumes
    Halted,
}

/// Scroll world for a single attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub name: String,
    /// Level background colour, if any
    pub background: Option<String>,
    /// Parallax scenery (never collides)
    pub decorations: Vec<Decoration>,
    /// Distance travelled so far, never decreases
    pub scroll_cursor: f32,
    /// Distance needed to complete the level
    pub world_length: f32,
    /// Live obstacles (order is irrelevant to collision)
    pub obstacles: Vec<Obstacle>,
    /// Always within [0, 100]
    pub progress_percent: f32,
    pub state: WorldState,
    /// Id handed to the next spawned obstacle
    next_id: u32,
}

impl World {
    /// Build a fresh world, rejecting malformed level data
    pub fn new(level: &LevelDescriptor) -> Result<Self, LevelError> {
        level.validate()?;

        let obstacles = level
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, t)| Obstacle::from_template(i as u32, t))
            .collect::<Vec<_>>();

        log::info!(
            "World '{}' built: length {}, {} obstacles",
            level.name,
            level.length,
            obstacles.len()
        );

        Ok(Self {
            name: level.name.clone(),
            background: level.background.clone(),
            decorations: level.decorations.clone(),
            scroll_cursor: 0.0,
            world_length: level.length,
            obstacles,
            progress_percent: 0.0,
            state: WorldState::Running,
            next_id: level.obstacles.len() as u32,
        })
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == WorldState::Running
    }

    /// Scroll the world forward by `scroll_delta`
    pub fn tick(&mut self, scroll_delta: f32) {
        if !self.is_running() {
            return;
        }

        let delta = scroll_delta.max(0.0);
        self.scroll_cursor += delta;

        for obstacle in &mut self.obstacles {
            obstacle.tick(delta);
        }

        self.progress_percent = progress_for(self.scroll_cursor, self.world_length);

        // Camera-space right edge at or beyond -margin is far behind the avatar
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.rect.right() > -REMOVAL_MARGIN);
        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::debug!(
                "Culled {} obstacle(s) at cursor {}, {} live",
                culled,
                self.scroll_cursor,
                self.obstacles.len()
            );
        }
    }

    /// True if any deadly obstacle touches the avatar
    pub fn check_collision(&self, avatar: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.collides_with(avatar))
    }

    /// First deadly obstacle touching the avatar, if any
    pub fn colliding_obstacle(&self, avatar: &Rect) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.collides_with(avatar))
    }

    pub fn is_complete(&self) -> bool {
        self.scroll_cursor >= self.world_length
    }

    /// Freeze the world for the rest of this attempt
    pub fn halt(&mut self) {
        self.state = WorldState::Halted;
    }

    /// Add an obstacle mid-attempt. `template.x` is a world coordinate.
    pub fn spawn(&mut self, template: &ObstacleTemplate) -> Result<u32, LevelError> {
        let id = self.next_id;
        validate_template(id as usize, template)?;

        let mut obstacle = Obstacle::from_template(id, template);
        obstacle.rect.x -= self.scroll_cursor;
        self.obstacles.push(obstacle);
        self.next_id += 1;

        log::debug!("Spawned obstacle {} at world x {}", id, template.x);
        Ok(id)
    }

    /// Obstacles overlapping the viewport
    pub fn visible_obstacles(
        &self,
        camera_x: f32,
        viewport_width: f32,
    ) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(move |o| o.is_visible(camera_x, viewport_width))
    }

    /// Nearest deadly obstacle whose left edge is at or right of `from_x`
    pub fn next_deadly_ahead(&self, from_x: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.deadly && o.rect.x >= from_x)
            .min_by(|a, b| {
                a.rect
                    .x
                    .partial_cmp(&b.rect.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Percent of `length` covered by `cursor`, capped at 100
pub fn progress_for(cursor: f32, length: f32) -> f32 {
    (cursor / length * 100.0).clamp(0.0, 100.0)
}
