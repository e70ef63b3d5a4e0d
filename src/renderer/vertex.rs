//! GPU instance data for 2D quads

use bytemuck::{Pod, Zeroable};

use crate::sim::{ObstacleKind, PortalKind};

/// Shape selector read by the fragment shader
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuadShape {
    Rect = 0,
    Triangle = 1,
    Diamond = 2,
    Circle = 3,
}

/// One instanced quad: centre, size, rotation, shape, colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 2], // offset 0
    pub size: [f32; 2],   // offset 8
    pub rotation: f32,    // offset 16
    pub shape: u32,       // offset 20
    pub color: [f32; 4],  // offset 24
}

impl QuadInstance {
    pub fn new(center: [f32; 2], size: [f32; 2], shape: QuadShape, color: [f32; 4]) -> Self {
        Self {
            center,
            size,
            rotation: 0.0,
            shape: shape as u32,
            color,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Shape and colour an obstacle is drawn with
pub fn obstacle_style(kind: &ObstacleKind) -> (QuadShape, [f32; 4]) {
    match kind {
        ObstacleKind::Spike => (QuadShape::Triangle, colors::SPIKE),
        ObstacleKind::Block => (QuadShape::Rect, colors::BLOCK),
        ObstacleKind::MovingPlatform { .. } => (QuadShape::Rect, colors::PLATFORM),
        ObstacleKind::Portal { portal, .. } => match portal {
            PortalKind::Normal => (QuadShape::Diamond, colors::PORTAL_NORMAL),
            PortalKind::Gravity => (QuadShape::Diamond, colors::PORTAL_GRAVITY),
        },
    }
}

/// Parse `#rgb` or `#rrggbb` into linear RGBA
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match digits.len() {
        3 => {
            let mut rgb = [0.0; 3];
            for (i, c) in digits.char_indices() {
                let v = c.to_digit(16)? as f32;
                rgb[i] = v * 17.0 / 255.0;
            }
            Some([rgb[0], rgb[1], rgb[2], 1.0])
        }
        6 if digits.is_ascii() => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
            1.0,
        ]),
        _ => None,
    }
}

/// Colors for game elements
pub mod colors {
    pub const AVATAR: [f32; 4] = [1.0, 0.85, 0.0, 1.0];
    pub const AVATAR_DEAD: [f32; 4] = [0.5, 0.45, 0.3, 1.0];
    pub const TRAIL: [f32; 4] = [1.0, 0.85, 0.0, 0.5];
    pub const SPIKE: [f32; 4] = [1.0, 0.27, 0.27, 1.0];
    pub const BLOCK: [f32; 4] = [0.27, 0.53, 1.0, 1.0];
    pub const PLATFORM: [f32; 4] = [0.27, 1.0, 0.53, 1.0];
    pub const PORTAL_NORMAL: [f32; 4] = [1.0, 0.0, 1.0, 1.0]; // Magenta
    pub const PORTAL_GRAVITY: [f32; 4] = [0.0, 1.0, 1.0, 1.0]; // Cyan
    pub const GROUND: [f32; 4] = [0.2, 0.2, 0.3, 1.0];
    pub const JUMP_DUST: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const DEATH_BURST: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.1, 0.1, 0.18, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 40);
        let quad = QuadInstance::new([1.0, 2.0], [3.0, 4.0], QuadShape::Circle, colors::AVATAR);
        let bytes: &[u8] = bytemuck::bytes_of(&quad);
        assert_eq!(bytes.len(), 40);
        assert_eq!(bytemuck::pod_read_unaligned::<u32>(&bytes[20..24]), 3);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse_hex_color("#0f0"), Some([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(parse_hex_color("#333"), parse_hex_color("#333333"));
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#ggg"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_portal_colour_follows_kind() {
        let normal = ObstacleKind::Portal {
            rotation: 0.0,
            portal: PortalKind::Normal,
        };
        let gravity = ObstacleKind::Portal {
            rotation: 0.0,
            portal: PortalKind::Gravity,
        };
        assert_eq!(obstacle_style(&normal).1, colors::PORTAL_NORMAL);
        assert_eq!(obstacle_style(&gravity).1, colors::PORTAL_GRAVITY);
        assert_eq!(obstacle_style(&ObstacleKind::Spike).0, QuadShape::Triangle);
    }
}
