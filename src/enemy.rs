//! Enemies: two chicken species and the end boss, as one tagged union.

use log::{debug, info};
use rand::Rng;

use crate::animation::{Animatable, BossPose};
use crate::audio::{Cue, SoundBank};
use crate::clock::Millis;
use crate::collision::ColliderKind;
use crate::combat::{Combatant, Health, HitOutcome, DEFAULT_DAMAGE};
use crate::entities::{Drawable, Sprite};
use crate::physics::{Motion, Physics};

/// Energy the boss loses per bottle.
pub const BOSS_DAMAGE: u32 = 25;
pub const BOSS_WALK_SPEED: f64 = 1.5;
pub const BOSS_CHARGE_SPEED: f64 = 15.0;

const CHICKEN_WALK: [&str; 3] = [
    "img/3_enemies_chicken/chicken_normal/1_walk/1_w.png",
    "img/3_enemies_chicken/chicken_normal/1_walk/2_w.png",
    "img/3_enemies_chicken/chicken_normal/1_walk/3_w.png",
];
const CHICKEN_DEAD: &str = "img/3_enemies_chicken/chicken_normal/2_dead/dead.png";

const SMALL_CHICKEN_WALK: [&str; 3] = [
    "img/3_enemies_chicken/chicken_small/1_walk/1_w.png",
    "img/3_enemies_chicken/chicken_small/1_walk/2_w.png",
    "img/3_enemies_chicken/chicken_small/1_walk/3_w.png",
];
const SMALL_CHICKEN_DEAD: &str = "img/3_enemies_chicken/chicken_small/2_dead/dead.png";

pub const BOSS_ALERT: [&str; 8] = [
    "img/4_enemie_boss_chicken/2_alert/G5.png",
    "img/4_enemie_boss_chicken/2_alert/G6.png",
    "img/4_enemie_boss_chicken/2_alert/G7.png",
    "img/4_enemie_boss_chicken/2_alert/G8.png",
    "img/4_enemie_boss_chicken/2_alert/G9.png",
    "img/4_enemie_boss_chicken/2_alert/G10.png",
    "img/4_enemie_boss_chicken/2_alert/G11.png",
    "img/4_enemie_boss_chicken/2_alert/G12.png",
];

pub const BOSS_WALKING: [&str; 4] = [
    "img/4_enemie_boss_chicken/1_walk/G1.png",
    "img/4_enemie_boss_chicken/1_walk/G2.png",
    "img/4_enemie_boss_chicken/1_walk/G3.png",
    "img/4_enemie_boss_chicken/1_walk/G4.png",
];

pub const BOSS_ATTACK: [&str; 8] = [
    "img/4_enemie_boss_chicken/3_attack/G13.png",
    "img/4_enemie_boss_chicken/3_attack/G14.png",
    "img/4_enemie_boss_chicken/3_attack/G15.png",
    "img/4_enemie_boss_chicken/3_attack/G16.png",
    "img/4_enemie_boss_chicken/3_attack/G17.png",
    "img/4_enemie_boss_chicken/3_attack/G18.png",
    "img/4_enemie_boss_chicken/3_attack/G19.png",
    "img/4_enemie_boss_chicken/3_attack/G20.png",
];

pub const BOSS_HURT: [&str; 3] = [
    "img/4_enemie_boss_chicken/4_hurt/G21.png",
    "img/4_enemie_boss_chicken/4_hurt/G22.png",
    "img/4_enemie_boss_chicken/4_hurt/G23.png",
];

pub const BOSS_DEAD: [&str; 3] = [
    "img/4_enemie_boss_chicken/5_dead/G24.png",
    "img/4_enemie_boss_chicken/5_dead/G25.png",
    "img/4_enemie_boss_chicken/5_dead/G26.png",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Chicken,
    SmallChicken,
    Endboss,
}

impl EnemyKind {
    fn walk_images(self) -> &'static [&'static str] {
        match self {
            EnemyKind::Chicken => &CHICKEN_WALK,
            EnemyKind::SmallChicken => &SMALL_CHICKEN_WALK,
            EnemyKind::Endboss => &BOSS_WALKING,
        }
    }

    /// Terminal sprite for the chicken species.
    fn dead_image(self) -> &'static str {
        match self {
            EnemyKind::Chicken => CHICKEN_DEAD,
            EnemyKind::SmallChicken => SMALL_CHICKEN_DEAD,
            EnemyKind::Endboss => BOSS_DEAD[BOSS_DEAD.len() - 1],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub sprite: Sprite,
    pub motion: Motion,
    pub health: Health,
    pub sounds: SoundBank,
}

impl Enemy {
    fn chicken_like(kind: EnemyKind, x: f64, speed: f64) -> Self {
        let walk = kind.walk_images();
        let mut sprite = Sprite::new(x, 370.0, 60.0, 60.0).with_image(walk[0]);
        sprite.load_images(walk);
        Self {
            kind,
            sprite,
            motion: Motion::new(speed),
            health: Health::full(),
            sounds: SoundBank::default(),
        }
    }

    pub fn chicken(x: f64, speed: f64) -> Self {
        Self::chicken_like(EnemyKind::Chicken, x, speed)
    }

    pub fn small_chicken(x: f64, speed: f64) -> Self {
        Self::chicken_like(EnemyKind::SmallChicken, x, speed)
    }

    /// A chicken of `kind` somewhere in the level with a random pace.
    pub fn random_chicken(kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let x = 500.0 + rng.gen::<f64>() * 6000.0;
        let speed = 0.15 + rng.gen::<f64>() * 0.5;
        Self::chicken_like(kind, x, speed)
    }

    pub fn endboss() -> Self {
        let mut sprite = Sprite::new(6800.0, -20.0, 300.0, 500.0).with_image(BOSS_ALERT[0]);
        for seq in [
            &BOSS_WALKING[..],
            &BOSS_HURT[..],
            &BOSS_ALERT[..],
            &BOSS_DEAD[..],
            &BOSS_ATTACK[..],
        ] {
            sprite.load_images(seq);
        }
        Self {
            kind: EnemyKind::Endboss,
            sprite,
            motion: Motion::new(BOSS_WALK_SPEED),
            health: Health::full(),
            sounds: SoundBank::new(&[Cue::BossHurt, Cue::Win]),
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Endboss
    }

    pub fn collider_kind(&self) -> ColliderKind {
        if self.is_boss() {
            ColliderKind::Boss
        } else {
            ColliderKind::Enemy
        }
    }

    // ── Chickens ──────────────────────────────────────────────────────────────

    /// Movement tick: chickens walk left forever and never clamp.
    pub fn walk(&mut self) {
        if !self.is_dead() {
            self.move_left();
        }
    }

    pub fn animate_walk(&mut self) {
        if !self.is_dead() {
            let walk = self.kind.walk_images();
            self.play_animation(walk);
        }
    }

    /// Switch to the terminal sprite; the enemy stops moving for good.
    pub fn change_to_dead_image(&mut self) {
        self.sprite.load_image(self.kind.dead_image());
        self.health.kill();
        debug!("{:?} at x={:.0} is dead", self.kind, self.sprite.x);
    }

    // ── Boss ──────────────────────────────────────────────────────────────────

    /// Boss behaviour tick: approach or charge depending on how far the
    /// character is, then pick the pose.
    pub fn boss_tick(&mut self, character_x: f64, now: Millis) -> BossPose {
        let distance = self.sprite.x - character_x;
        if !self.is_dead() {
            match BossPose::for_distance(distance) {
                BossPose::Attack => {
                    self.motion.speed = BOSS_CHARGE_SPEED;
                    self.move_left();
                }
                BossPose::Walk => {
                    self.motion.speed = BOSS_WALK_SPEED;
                    self.move_left();
                }
                _ => self.motion.speed = BOSS_WALK_SPEED,
            }
        }

        let pose = BossPose::select(self.is_dead(), self.is_hurt(now), distance);
        match pose {
            BossPose::Dead => self.play_animation(&BOSS_DEAD),
            BossPose::Hurt => self.play_animation(&BOSS_HURT),
            BossPose::Attack => self.play_animation(&BOSS_ATTACK),
            BossPose::Walk => self.play_animation(&BOSS_WALKING),
            BossPose::Alert => self.play_animation(&BOSS_ALERT),
        }
        pose
    }

    pub fn hit(&mut self, now: Millis) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        self.sounds.play(Cue::BossHurt);
        let outcome = self.take_hit(now);
        match outcome {
            HitOutcome::Killed => {
                info!("end boss defeated");
                self.play_animation(&BOSS_DEAD);
                self.sounds.play(Cue::Win);
            }
            HitOutcome::Hurt => self.play_animation(&BOSS_HURT),
            HitOutcome::Ignored => {}
        }
        outcome
    }
}

impl Drawable for Enemy {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physics for Enemy {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Combatant for Enemy {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn damage_per_hit(&self) -> u32 {
        match self.kind {
            EnemyKind::Endboss => BOSS_DAMAGE,
            _ => DEFAULT_DAMAGE,
        }
    }
}
