//! Energy, hurt window and death.

use crate::clock::Millis;

pub const MAX_ENERGY: u32 = 100;
/// Energy lost per hit unless the combatant says otherwise.
pub const DEFAULT_DAMAGE: u32 = 5;
/// How long after a hit the combatant counts as hurt.
pub const HURT_WINDOW: Millis = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target was already dead.
    Ignored,
    Hurt,
    /// This hit brought energy to exactly zero.
    Killed,
}

/// Energy in `0..=MAX_ENERGY`; it never goes back up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health {
    energy: u32,
    last_hit: Option<Millis>,
}

impl Default for Health {
    fn default() -> Self {
        Self::full()
    }
}

impl Health {
    pub fn full() -> Self {
        Self { energy: MAX_ENERGY, last_hit: None }
    }

    pub fn with_energy(energy: u32) -> Self {
        Self { energy: energy.min(MAX_ENERGY), last_hit: None }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn last_hit(&self) -> Option<Millis> {
        self.last_hit
    }

    pub fn is_dead(&self) -> bool {
        self.energy == 0
    }

    pub fn is_hurt(&self, now: Millis) -> bool {
        self.last_hit
            .map(|hit| now.saturating_sub(hit) < HURT_WINDOW)
            .unwrap_or(false)
    }

    pub fn apply(&mut self, damage: u32, now: Millis) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        self.energy = self.energy.saturating_sub(damage);
        self.last_hit = Some(now);
        if self.is_dead() {
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt
        }
    }

    /// Drop straight to zero without counting as a hit.
    pub fn kill(&mut self) {
        self.energy = 0;
    }
}

pub trait Combatant {
    fn health(&self) -> &Health;
    fn health_mut(&mut self) -> &mut Health;

    fn damage_per_hit(&self) -> u32 {
        DEFAULT_DAMAGE
    }

    fn take_hit(&mut self, now: Millis) -> HitOutcome {
        let damage = self.damage_per_hit();
        self.health_mut().apply(damage, now)
    }

    fn energy(&self) -> u32 {
        self.health().energy()
    }

    fn is_dead(&self) -> bool {
        self.health().is_dead()
    }

    fn is_hurt(&self, now: Millis) -> bool {
        self.health().is_hurt(now)
    }
}
