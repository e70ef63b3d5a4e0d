//! Read-only view of a session for drawing
//!
//! Captured after a tick; holds screen-space geometry only, so a renderer
//! never touches live simulation state.

use serde::{Deserialize, Serialize};

use super::vertex::{QuadInstance, QuadShape, colors, obstacle_style, parse_hex_color};
use crate::consts::{GROUND_Y, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::effects::ParticleField;
use crate::settings::Settings;
use crate::sim::{DecorationShape, GamePhase, ObstacleKind, Rect, Session, ShapeKind, TrailPoint};

/// Scenery scrolls slower than the obstacles
pub const DECORATION_PARALLAX: f32 = 0.7;

/// Visible window onto the camera-space scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal offset from the scroll cursor (0 keeps the avatar at its
    /// spawn column)
    pub camera_x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            camera_x: 0.0,
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarView {
    pub rect: Rect,
    pub rotation: f32,
    pub alive: bool,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub shape: ShapeKind,
    pub kind: ObstacleKind,
    /// Screen space
    pub rect: Rect,
    pub rotation: f32,
    pub deadly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationView {
    pub shape: DecorationShape,
    /// Screen space bounding box
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub avatar: AvatarView,
    pub scroll_cursor: f32,
    /// World x of the left screen edge
    pub camera_x: f32,
    pub progress_percent: f32,
    pub phase: GamePhase,
    pub attempts: u32,
    pub obstacles: Vec<ObstacleView>,
    pub decorations: Vec<DecorationView>,
    pub background: [f32; 4],
    pub viewport: Viewport,
}

impl RenderSnapshot {
    pub fn capture(session: &Session, viewport: Viewport, settings: &Settings) -> Self {
        let avatar = &session.avatar;
        let world = &session.world;

        let samples = settings.trail_samples().min(avatar.trail.len());
        let skip = avatar.trail.len() - samples;
        let trail = avatar
            .trail
            .iter()
            .skip(skip)
            .map(|p| TrailPoint {
                x: p.x - viewport.camera_x,
                ..*p
            })
            .collect();

        let obstacles = world
            .visible_obstacles(viewport.camera_x, viewport.width)
            .map(|o| ObstacleView {
                id: o.id,
                shape: o.shape(),
                kind: o.kind,
                rect: o.rect.translated_x(-viewport.camera_x),
                rotation: o.rotation(),
                deadly: o.deadly,
            })
            .collect();

        let parallax_x = world.scroll_cursor * DECORATION_PARALLAX + viewport.camera_x;
        let decorations = world
            .decorations
            .iter()
            .filter_map(|d| {
                let rect = match d.shape {
                    DecorationShape::Circle => Rect::new(
                        d.x - d.width / 2.0,
                        d.y - d.width / 2.0,
                        d.width,
                        d.width,
                    ),
                    DecorationShape::Rect => Rect::new(d.x, d.y, d.width, d.height),
                }
                .translated_x(-parallax_x);
                let on_screen = rect.right() > 0.0 && rect.x < viewport.width;
                on_screen.then(|| DecorationView {
                    shape: d.shape,
                    rect,
                    color: parse_hex_color(&d.color).unwrap_or(colors::BLOCK),
                })
            })
            .collect();

        let background = world
            .background
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(colors::BACKGROUND);

        Self {
            avatar: AvatarView {
                rect: avatar.rect().translated_x(-viewport.camera_x),
                rotation: avatar.rotation,
                alive: avatar.alive,
                trail,
            },
            scroll_cursor: world.scroll_cursor,
            camera_x: world.scroll_cursor + viewport.camera_x,
            progress_percent: world.progress_percent,
            phase: session.phase,
            attempts: session.attempts,
            obstacles,
            decorations,
            background,
            viewport,
        }
    }

    /// Flatten into GPU instances, back to front
    pub fn instances(&self, effects: Option<&ParticleField>) -> Vec<QuadInstance> {
        let particle_count = effects.map_or(0, |fx| fx.particles.len());
        let mut out = Vec::with_capacity(
            3 + self.decorations.len()
                + self.obstacles.len()
                + self.avatar.trail.len()
                + particle_count,
        );

        for decoration in &self.decorations {
            let shape = match decoration.shape {
                DecorationShape::Circle => QuadShape::Circle,
                DecorationShape::Rect => QuadShape::Rect,
            };
            out.push(QuadInstance::new(
                decoration.rect.center().into(),
                [decoration.rect.width, decoration.rect.height],
                shape,
                decoration.color,
            ));
        }

        // Ground strip
        let ground_height = (self.viewport.height - GROUND_Y).max(0.0);
        out.push(QuadInstance::new(
            [self.viewport.width / 2.0, GROUND_Y + ground_height / 2.0],
            [self.viewport.width, ground_height],
            QuadShape::Rect,
            colors::GROUND,
        ));

        for obstacle in &self.obstacles {
            let (shape, color) = obstacle_style(&obstacle.kind);
            let center = obstacle.rect.center();
            out.push(
                QuadInstance::new(
                    center.into(),
                    [obstacle.rect.width, obstacle.rect.height],
                    shape,
                    color,
                )
                .with_rotation(obstacle.rotation),
            );
        }

        let avatar = &self.avatar;
        let trail_len = avatar.trail.len() as f32;
        for (i, point) in avatar.trail.iter().enumerate() {
            let mut color = colors::TRAIL;
            color[3] = i as f32 / trail_len * 0.5;
            out.push(
                QuadInstance::new(
                    [
                        point.x + avatar.rect.width / 2.0,
                        point.y + avatar.rect.height / 2.0,
                    ],
                    [avatar.rect.width, avatar.rect.height],
                    QuadShape::Rect,
                    color,
                )
                .with_rotation(point.rotation),
            );
        }

        let body = if avatar.alive {
            colors::AVATAR
        } else {
            colors::AVATAR_DEAD
        };
        out.push(
            QuadInstance::new(
                avatar.rect.center().into(),
                [avatar.rect.width, avatar.rect.height],
                QuadShape::Rect,
                body,
            )
            .with_rotation(avatar.rotation),
        );

        if let Some(fx) = effects {
            for p in &fx.particles {
                let mut color = p.color;
                color[3] *= p.alpha.clamp(0.0, 1.0);
                out.push(QuadInstance::new(
                    [p.pos.x - self.camera_x, p.pos.y],
                    [p.size, p.size],
                    QuadShape::Circle,
                    color,
                ));
            }

            let flash = fx.flash_intensity();
            if flash > 0.0 {
                let mut color = colors::FLASH;
                color[3] = flash;
                out.push(QuadInstance::new(
                    [self.viewport.width / 2.0, self.viewport.height / 2.0],
                    [self.viewport.width, self.viewport.height],
                    QuadShape::Rect,
                    color,
                ));
            }
        }

        out
    }
}
