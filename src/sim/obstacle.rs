//! Obstacles
//!
//! Obstacle rects live in camera space: the avatar never moves horizontally,
//! so scrolling the world right is the same as sliding every obstacle left.
//! At scroll cursor 0 camera space and world space coincide, so
//! `world_x = rect.x + scroll_cursor`.

use serde::{Deserialize, Serialize};

use super::level::{ObstacleTemplate, PortalKind, ShapeKind};
use super::rect::{Rect, overlaps};
use crate::consts::{DEFAULT_MOVE_DISTANCE, PORTAL_SPIN};
use crate::wrap_angle;

/// Shape plus shape-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Block,
    /// Oscillates horizontally around its authored world position
    MovingPlatform {
        /// World-space displacement from the origin, |offset| <= amplitude
        offset: f32,
        amplitude: f32,
        /// +1.0 or -1.0
        direction: f32,
        /// Distance per tick
        speed: f32,
    },
    /// Spinning non-deadly marker
    Portal { rotation: f32, portal: PortalKind },
}

impl ObstacleKind {
    pub fn shape(&self) -> ShapeKind {
        match self {
            ObstacleKind::Spike => ShapeKind::Spike,
            ObstacleKind::Block => ShapeKind::Block,
            ObstacleKind::MovingPlatform { .. } => ShapeKind::MovingPlatform,
            ObstacleKind::Portal { .. } => ShapeKind::Portal,
        }
    }
}

/// A live obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Index of the template this obstacle was built from
    pub id: u32,
    pub kind: ObstacleKind,
    /// Camera-space rectangle
    pub rect: Rect,
    pub deadly: bool,
}

impl Obstacle {
    /// Build from a validated template
    pub fn from_template(id: u32, template: &ObstacleTemplate) -> Self {
        let opts = &template.options;
        let kind = match template.kind {
            ShapeKind::Spike => ObstacleKind::Spike,
            ShapeKind::Block => ObstacleKind::Block,
            ShapeKind::MovingPlatform => ObstacleKind::MovingPlatform {
                offset: 0.0,
                amplitude: opts.move_distance.unwrap_or(DEFAULT_MOVE_DISTANCE),
                direction: opts.direction.unwrap_or(1.0),
                speed: opts.speed.unwrap_or(0.0),
            },
            ShapeKind::Portal => ObstacleKind::Portal {
                rotation: 0.0,
                portal: opts.portal_type.unwrap_or_default(),
            },
        };

        Self {
            id,
            kind,
            rect: Rect::new(template.x, template.y, template.width, template.height),
            deadly: template.deadly(),
        }
    }

    /// Advance one tick with the world scrolling by `scroll_delta`
    pub fn tick(&mut self, scroll_delta: f32) {
        self.rect.x -= scroll_delta;

        match &mut self.kind {
            ObstacleKind::MovingPlatform {
                offset,
                amplitude,
                direction,
                speed,
            } => {
                let step = *speed * *direction;
                *offset += step;
                self.rect.x += step;

                // Band is world-space; clamp to the bound on the flip
                if offset.abs() >= *amplitude {
                    let clamped = offset.clamp(-*amplitude, *amplitude);
                    self.rect.x += clamped - *offset;
                    *offset = clamped;
                    *direction = -*direction;
                }
            }
            ObstacleKind::Portal { rotation, .. } => {
                *rotation = wrap_angle(*rotation + PORTAL_SPIN);
            }
            ObstacleKind::Spike | ObstacleKind::Block => {}
        }
    }

    /// Render-side culling: does any part fall inside the viewport?
    pub fn is_visible(&self, camera_x: f32, viewport_width: f32) -> bool {
        let screen_x = self.rect.x - camera_x;
        screen_x + self.rect.width > 0.0 && screen_x < viewport_width
    }

    /// Would touching `avatar` kill?
    pub fn collides_with(&self, avatar: &Rect) -> bool {
        self.deadly && overlaps(avatar, &self.rect)
    }

    /// Absolute world x for the current scroll position
    #[inline]
    pub fn world_x(&self, scroll_cursor: f32) -> f32 {
        self.rect.x + scroll_cursor
    }

    /// Cosmetic rotation for rendering
    pub fn rotation(&self) -> f32 {
        match self.kind {
            ObstacleKind::Portal { rotation, .. } => rotation,
            _ => 0.0,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.kind.shape()
    }
}
