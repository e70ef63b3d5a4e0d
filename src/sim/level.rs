//! Level descriptors
//!
//! A level is plain data: world length plus obstacle templates. Descriptors
//! are validated once, before any world is built from them.

use serde::{Deserialize, Serialize};

/// Obstacle shape tag as written in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Spike,
    Block,
    #[serde(rename = "moving", alias = "moving_platform")]
    MovingPlatform,
    Portal,
}

/// Portal flavour (cosmetic only, selects the renderer's colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalKind {
    #[default]
    Normal,
    Gravity,
}

/// Shape-specific knobs; anything omitted falls back to a default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObstacleOptions {
    /// Platform speed per tick
    pub speed: Option<f32>,
    /// Platform excursion either side of its origin
    pub move_distance: Option<f32>,
    /// Initial platform direction (+1 right, -1 left)
    pub direction: Option<f32>,
    /// Overrides the shape's default deadliness
    pub is_deadly: Option<bool>,
    pub portal_type: Option<PortalKind>,
    /// Render colour, ignored by the simulation
    pub color: Option<String>,
}

/// One obstacle as authored in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub options: ObstacleOptions,
}

impl ObstacleTemplate {
    pub fn new(kind: ShapeKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            options: ObstacleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ObstacleOptions) -> Self {
        self.options = options;
        self
    }

    /// Deadliness after applying shape defaults and overrides
    pub fn deadly(&self) -> bool {
        match self.kind {
            ShapeKind::Portal => false,
            _ => self.options.is_deadly.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationShape {
    Circle,
    Rect,
}

/// Parallax decoration, passed through for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    #[serde(rename = "type")]
    pub shape: DecorationShape,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

/// Immutable level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub name: String,
    /// Scroll distance needed to finish the level
    pub length: f32,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
    pub obstacles: Vec<ObstacleTemplate>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
}

/// Rejected level data
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level length must be positive and finite, got {0}")]
    InvalidLength(f32),

    #[error("obstacle {index}: {field} must be finite, got {value}")]
    NonFinite {
        index: usize,
        field: &'static str,
        value: f32,
    },

    #[error("obstacle {index}: {field} must not be negative, got {value}")]
    Negative {
        index: usize,
        field: &'static str,
        value: f32,
    },

    #[error("obstacle {index}: direction must be 1 or -1, got {value}")]
    InvalidDirection { index: usize, value: f32 },

    #[error("obstacle {index}: portals cannot be deadly")]
    DeadlyPortal { index: usize },
}

impl LevelDescriptor {
    /// Parse and validate a JSON level
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelDescriptor = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check every contract the simulation relies on
    pub fn validate(&self) -> Result<(), LevelError> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(LevelError::InvalidLength(self.length));
        }
        for (index, template) in self.obstacles.iter().enumerate() {
            validate_template(index, template)?;
        }
        Ok(())
    }
}

fn finite(index: usize, field: &'static str, value: f32) -> Result<(), LevelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LevelError::NonFinite {
            index,
            field,
            value,
        })
    }
}

fn non_negative(index: usize, field: &'static str, value: f32) -> Result<(), LevelError> {
    finite(index, field, value)?;
    if value < 0.0 {
        return Err(LevelError::Negative {
            index,
            field,
            value,
        });
    }
    Ok(())
}

pub(crate) fn validate_template(index: usize, t: &ObstacleTemplate) -> Result<(), LevelError> {
    finite(index, "x", t.x)?;
    finite(index, "y", t.y)?;
    non_negative(index, "width", t.width)?;
    non_negative(index, "height", t.height)?;

    let opts = &t.options;
    if let Some(speed) = opts.speed {
        non_negative(index, "speed", speed)?;
    }
    if let Some(distance) = opts.move_distance {
        non_negative(index, "moveDistance", distance)?;
    }
    match opts.direction {
        None => {}
        Some(d) if d == 1.0 || d == -1.0 => {}
        Some(value) => return Err(LevelError::InvalidDirection { index, value }),
    }
    if t.kind == ShapeKind::Portal && opts.is_deadly == Some(true) {
        return Err(LevelError::DeadlyPortal { index });
    }
    Ok(())
}
