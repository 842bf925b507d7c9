//! Frame cycling and pose selection.
//!
//! Animations are endless cycles over a named image sequence, advanced on
//! their own tick independent of physics.  The pose enums decide *which*
//! sequence to play; precedence is encoded in the order of the checks.

use crate::entities::Drawable;

pub trait Animatable: Drawable {
    /// Show `sequence[cursor % len]` from the image cache and advance the
    /// cursor.  Keys missing from the cache leave the current image alone.
    fn play_animation(&mut self, sequence: &[&'static str]) {
        if sequence.is_empty() {
            return;
        }
        let sprite = self.sprite_mut();
        let path = sequence[sprite.current_image % sequence.len()];
        if let Some(image) = sprite.image_cache.get(path) {
            sprite.img = Some(image.clone());
        }
        sprite.current_image += 1;
    }
}

impl<T: Drawable> Animatable for T {}

// ── Character ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterPose {
    Dead,
    Hurt,
    JumpUp,
    JumpDown,
    Walking,
    LongIdle,
    Idle,
}

/// Everything pose selection needs to know about the character.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharacterStatus {
    pub dead: bool,
    pub hurt: bool,
    pub airborne: bool,
    pub speed_y: f64,
    pub walking: bool,
    pub sleeping: bool,
}

impl CharacterPose {
    /// dead > hurt > airborne > walking > long idle > idle.
    pub fn select(status: &CharacterStatus) -> Self {
        if status.dead {
            CharacterPose::Dead
        } else if status.hurt {
            CharacterPose::Hurt
        } else if status.airborne {
            if status.speed_y > 0.0 {
                CharacterPose::JumpUp
            } else {
                CharacterPose::JumpDown
            }
        } else if status.walking {
            CharacterPose::Walking
        } else if status.sleeping {
            CharacterPose::LongIdle
        } else {
            CharacterPose::Idle
        }
    }
}

// ── End boss ──────────────────────────────────────────────────────────────────

/// Boss charges when the character is at most this far to its left.
pub const BOSS_ENGAGE_RANGE: f64 = 450.0;
/// Boss starts walking when the character is closer than this.
pub const BOSS_APPROACH_RANGE: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPose {
    Dead,
    Hurt,
    Attack,
    Walk,
    Alert,
}

impl BossPose {
    /// `distance` is boss x minus character x.
    pub fn select(dead: bool, hurt: bool, distance: f64) -> Self {
        if dead {
            BossPose::Dead
        } else if hurt {
            BossPose::Hurt
        } else {
            BossPose::for_distance(distance)
        }
    }

    /// Range-only part of the decision, also used to drive movement.
    pub fn for_distance(distance: f64) -> Self {
        if distance <= BOSS_ENGAGE_RANGE {
            BossPose::Attack
        } else if distance < BOSS_APPROACH_RANGE {
            BossPose::Walk
        } else {
            BossPose::Alert
        }
    }
}
