//! Bounding-box tests and the collision resolution table.
//!
//! Two overlap predicates coexist: the inset-aware one for anything the
//! character touches, and a raw visual-box one for thrown bottles.  What
//! happens on contact is decided by [`resolve`], a pure function of the pair
//! of kinds involved.

use crate::entities::Sprite;

/// Overlap of the offset-narrowed hit-boxes.
pub fn is_colliding(a: &Sprite, b: &Sprite) -> bool {
    a.x + a.width - a.offset.right > b.x + b.offset.left
        && a.x + a.offset.left < b.x + b.width - b.offset.right
        && a.y + a.height - a.offset.bottom > b.y + b.offset.top
        && a.y + a.offset.top < b.y + b.height - b.offset.bottom
}

/// Overlap of the full visual boxes, ignoring offsets.
pub fn is_overlapping_raw(a: &Sprite, b: &Sprite) -> bool {
    a.bounds().intersects(&b.bounds())
}

// ── Resolution table ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColliderKind {
    Character,
    Projectile,
    /// Any enemy that is not the boss.
    Enemy,
    Boss,
    Coin,
    BottlePickup,
}

/// Attacker state relevant to the outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contact {
    pub airborne: bool,
    pub speed_y: f64,
}

impl Contact {
    pub fn new(airborne: bool, speed_y: f64) -> Self {
        Self { airborne, speed_y }
    }

    /// Airborne and falling.
    pub fn is_descending(&self) -> bool {
        self.airborne && self.speed_y < 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Ignore,
    /// Enemy dies, character bounces, no damage.
    StompKill,
    DamageCharacter,
    DamageBoss,
    KillEnemy,
    CollectCoin,
    CollectBottle,
}

pub fn resolve(attacker: ColliderKind, defender: ColliderKind, contact: Contact) -> Resolution {
    use ColliderKind::*;

    match (attacker, defender) {
        (Character, Enemy) if contact.is_descending() => Resolution::StompKill,
        (Character, Enemy) | (Character, Boss) => Resolution::DamageCharacter,
        (Character, Coin) => Resolution::CollectCoin,
        (Character, BottlePickup) => Resolution::CollectBottle,
        (Projectile, Boss) => Resolution::DamageBoss,
        (Projectile, Enemy) => Resolution::KillEnemy,
        _ => Resolution::Ignore,
    }
}
