//! The player's avatar
//!
//! Fixed horizontal position; only the vertical axis is simulated.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Trail sample for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

/// The avatar entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    /// Grounded avatars may jump
    pub on_ground: bool,
    /// Dead avatars are frozen in place
    pub alive: bool,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    /// Ground line the avatar rests on
    pub floor: f32,
    /// Recent positions, oldest first
    #[serde(skip)]
    pub trail: VecDeque<TrailPoint>,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Avatar {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_SIZE,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            velocity_y: 0.0,
            on_ground: true,
            alive: true,
            rotation: 0.0,
            floor: GROUND_Y,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Lowest allowed `y` (resting on the floor)
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.floor - self.height
    }

    /// Start a jump if grounded and alive.
    ///
    /// Returns true when the impulse was applied; the caller emits effects.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground || !self.alive {
            return false;
        }
        self.velocity_y = JUMP_IMPULSE;
        self.on_ground = false;
        true
    }

    /// Advance vertical physics by one tick
    pub fn tick(&mut self) {
        if !self.alive {
            return;
        }

        self.velocity_y += GRAVITY;
        self.y += self.velocity_y;

        let max_y = self.max_y();
        if self.y >= max_y {
            self.y = max_y;
            self.velocity_y = 0.0;
            self.on_ground = true;
        }

        // Ceiling stops upward motion but is not ground
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity_y = 0.0;
        }

        self.rotation += self.velocity_y * ROTATION_COEFF;
        self.record_trail();
    }

    fn record_trail(&mut self) {
        self.trail.push_back(TrailPoint {
            x: self.x,
            y: self.y,
            rotation: self.rotation,
        });
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Freeze the avatar where it died
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Back to spawn (restart)
    pub fn reset(&mut self) {
        let floor = self.floor;
        *self = Self::new();
        self.floor = floor;
        self.y = self.max_y();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn airborne(ticks: usize) -> Avatar {
        let mut avatar = Avatar::new();
        assert!(avatar.jump());
        for _ in 0..ticks {
            avatar.tick();
        }
        avatar
    }

    #[test]
    fn test_spawn_on_ground() {
        let avatar = Avatar::new();
        assert!(avatar.on_ground);
        assert!(avatar.alive);
        assert_eq!(avatar.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(avatar.rect(), Rect::new(PLAYER_X, 460.0, 40.0, 40.0));
    }

    #[test]
    fn test_jump_sets_impulse() {
        let mut avatar = Avatar::new();
        assert!(avatar.jump());
        assert_eq!(avatar.velocity_y, JUMP_IMPULSE);
        assert!(!avatar.on_ground);
    }

    #[test]
    fn test_jump_once_per_ground_contact() {
        let mut avatar = Avatar::new();
        assert!(avatar.jump());
        avatar.tick();
        let v = avatar.velocity_y;
        assert!(!avatar.jump());
        assert!(!avatar.jump());
        assert_eq!(avatar.velocity_y, v);
    }

    #[test]
    fn test_dead_avatar_cannot_jump_or_move() {
        let mut avatar = airborne(3);
        avatar.kill();
        let frozen = avatar.clone();
        assert!(!avatar.jump());
        avatar.tick();
        assert_eq!(avatar, frozen);
        assert_eq!(avatar.trail, frozen.trail);
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let mut avatar = Avatar::new();
        avatar.jump();
        let mut prev = avatar.velocity_y;
        for _ in 0..10 {
            avatar.tick();
            assert!(!avatar.on_ground);
            assert!((avatar.velocity_y - (prev + GRAVITY)).abs() < 1e-4);
            prev = avatar.velocity_y;
        }
    }

    #[test]
    fn test_lands_on_floor() {
        let mut avatar = Avatar::new();
        avatar.jump();
        let mut landed_after = None;
        for i in 0..100 {
            avatar.tick();
            if avatar.on_ground {
                landed_after = Some(i);
                break;
            }
        }
        assert!(landed_after.is_some());
        assert_eq!(avatar.y, avatar.max_y());
        assert_eq!(avatar.velocity_y, 0.0);
        // Grounded again, so a new jump is allowed
        assert!(avatar.jump());
    }

    #[test]
    fn test_ceiling_clamp_does_not_ground() {
        let mut avatar = Avatar::new();
        avatar.y = 5.0;
        avatar.on_ground = false;
        avatar.velocity_y = -20.0;
        avatar.tick();
        assert_eq!(avatar.y, 0.0);
        assert_eq!(avatar.velocity_y, 0.0);
        assert!(!avatar.on_ground);
    }

    #[test]
    fn test_rotation_follows_velocity() {
        let mut avatar = Avatar::new();
        avatar.jump();
        avatar.tick();
        let expected = (JUMP_IMPULSE + GRAVITY) * ROTATION_COEFF;
        assert!((avatar.rotation - expected).abs() < 1e-5);
    }

    #[test]
    fn test_trail_is_bounded_fifo() {
        let avatar = airborne(TRAIL_LENGTH + 5);
        assert_eq!(avatar.trail.len(), TRAIL_LENGTH);
        let newest = avatar.trail.back().copied().unwrap();
        assert_eq!(newest.y, avatar.y);
        assert_eq!(newest.rotation, avatar.rotation);
        // Oldest first: still rising, so older samples sit lower on screen
        assert!(avatar.velocity_y < 0.0);
        let oldest = avatar.trail.front().copied().unwrap();
        assert!(oldest.y > newest.y);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut avatar = airborne(7);
        avatar.kill();
        avatar.reset();
        assert_eq!(avatar, Avatar::new());
        assert!(avatar.trail.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = airborne(4);
        once.reset();
        let mut twice = airborne(4);
        twice.reset();
        twice.reset();
        assert_eq!(once, twice);
        assert_eq!(once.trail, twice.trail);
    }

    proptest! {
        #[test]
        fn y_stays_in_bounds(jumps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut avatar = Avatar::new();
            for jump in jumps {
                if jump {
                    avatar.jump();
                }
                avatar.tick();
                prop_assert!(avatar.y >= 0.0);
                prop_assert!(avatar.y <= avatar.max_y());
            }
        }

        #[test]
        fn one_impulse_per_contact(extra in 1usize..20) {
            let mut avatar = Avatar::new();
            let mut applied = 0;
            for _ in 0..=extra {
                if avatar.jump() {
                    applied += 1;
                }
            }
            prop_assert_eq!(applied, 1);
        }
    }
}
