//! Gravity and directional movement.
//!
//! Gravity is an explicit Euler step run on its own fixed tick.  The ground
//! is a constant floor line, not a collision surface.

use crate::clock::Millis;
use crate::entities::Drawable;

/// Anything with `y` below this line is airborne.
pub const GROUND_Y: f64 = 180.0;
pub const GRAVITY: f64 = 2.5;
/// Generic jump impulse (used by thrown bottles).  The character overrides it.
pub const JUMP_IMPULSE: f64 = 30.0;
/// 25 Hz.
pub const GRAVITY_INTERVAL: Millis = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Horizontal step per movement call; direction comes from the call.
    pub speed: f64,
    /// Upward velocity (positive = rising).
    pub speed_y: f64,
    pub acceleration: f64,
}

impl Motion {
    pub fn new(speed: f64) -> Self {
        Self { speed, speed_y: 0.0, acceleration: GRAVITY }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::new(0.15)
    }
}

pub trait Physics: Drawable {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;

    fn jump_impulse(&self) -> f64 {
        JUMP_IMPULSE
    }

    fn is_above_ground(&self) -> bool {
        self.sprite().y < GROUND_Y
    }

    /// One gravity tick.
    fn apply_gravity(&mut self) {
        if self.is_above_ground() || self.motion().speed_y > 0.0 {
            let speed_y = self.motion().speed_y;
            self.sprite_mut().y -= speed_y;
            let acceleration = self.motion().acceleration;
            self.motion_mut().speed_y -= acceleration;
        }
    }

    /// Unbounded; clamping is the caller's job.
    fn move_right(&mut self) {
        let speed = self.motion().speed;
        self.sprite_mut().x += speed;
    }

    fn move_left(&mut self) {
        let speed = self.motion().speed;
        self.sprite_mut().x -= speed;
    }

    fn jump(&mut self) {
        let impulse = self.jump_impulse();
        self.motion_mut().speed_y = impulse;
    }
}
