//! The player character.

use log::debug;

use crate::animation::{Animatable, CharacterPose, CharacterStatus};
use crate::audio::{Cue, SoundBank};
use crate::clock::Millis;
use crate::combat::{Combatant, Health, HitOutcome};
use crate::entities::{Drawable, Offset, Sprite};
use crate::input::Controls;
use crate::physics::{Motion, Physics};

pub const CHARACTER_JUMP_IMPULSE: f64 = 27.0;
/// Inactivity ticks (100ms each) before the character falls asleep.
pub const SLEEP_AFTER_TICKS: u32 = 50;

pub const IMAGES_WALKING: [&str; 6] = [
    "img/2_character_pepe/2_walk/W-21.png",
    "img/2_character_pepe/2_walk/W-22.png",
    "img/2_character_pepe/2_walk/W-23.png",
    "img/2_character_pepe/2_walk/W-24.png",
    "img/2_character_pepe/2_walk/W-25.png",
    "img/2_character_pepe/2_walk/W-26.png",
];

pub const IMAGES_IDLE: [&str; 10] = [
    "img/2_character_pepe/1_idle/idle/I-1.png",
    "img/2_character_pepe/1_idle/idle/I-2.png",
    "img/2_character_pepe/1_idle/idle/I-3.png",
    "img/2_character_pepe/1_idle/idle/I-4.png",
    "img/2_character_pepe/1_idle/idle/I-5.png",
    "img/2_character_pepe/1_idle/idle/I-6.png",
    "img/2_character_pepe/1_idle/idle/I-7.png",
    "img/2_character_pepe/1_idle/idle/I-8.png",
    "img/2_character_pepe/1_idle/idle/I-9.png",
    "img/2_character_pepe/1_idle/idle/I-10.png",
];

pub const IMAGES_LONG_IDLE: [&str; 10] = [
    "img/2_character_pepe/1_idle/long_idle/I-11.png",
    "img/2_character_pepe/1_idle/long_idle/I-12.png",
    "img/2_character_pepe/1_idle/long_idle/I-13.png",
    "img/2_character_pepe/1_idle/long_idle/I-14.png",
    "img/2_character_pepe/1_idle/long_idle/I-15.png",
    "img/2_character_pepe/1_idle/long_idle/I-16.png",
    "img/2_character_pepe/1_idle/long_idle/I-17.png",
    "img/2_character_pepe/1_idle/long_idle/I-18.png",
    "img/2_character_pepe/1_idle/long_idle/I-19.png",
    "img/2_character_pepe/1_idle/long_idle/I-20.png",
];

pub const IMAGES_JUMPING_UP: [&str; 4] = [
    "img/2_character_pepe/3_jump/J-31.png",
    "img/2_character_pepe/3_jump/J-32.png",
    "img/2_character_pepe/3_jump/J-33.png",
    "img/2_character_pepe/3_jump/J-34.png",
];

pub const IMAGES_JUMPING_DOWN: [&str; 3] = [
    "img/2_character_pepe/3_jump/J-35.png",
    "img/2_character_pepe/3_jump/J-36.png",
    "img/2_character_pepe/3_jump/J-37.png",
];

pub const IMAGES_DEAD: [&str; 7] = [
    "img/2_character_pepe/5_dead/D-51.png",
    "img/2_character_pepe/5_dead/D-52.png",
    "img/2_character_pepe/5_dead/D-53.png",
    "img/2_character_pepe/5_dead/D-54.png",
    "img/2_character_pepe/5_dead/D-55.png",
    "img/2_character_pepe/5_dead/D-56.png",
    "img/2_character_pepe/5_dead/D-57.png",
];

pub const IMAGES_HURT: [&str; 3] = [
    "img/2_character_pepe/4_hurt/H-41.png",
    "img/2_character_pepe/4_hurt/H-42.png",
    "img/2_character_pepe/4_hurt/H-43.png",
];

const SOUNDS: [Cue; 6] = [
    Cue::Walking,
    Cue::Jump,
    Cue::Hurt,
    Cue::Dead,
    Cue::CollectCoin,
    Cue::Snoring,
];

#[derive(Clone, Debug)]
pub struct Character {
    pub sprite: Sprite,
    pub motion: Motion,
    pub health: Health,
    pub is_walking: bool,
    pub is_sleeping: bool,
    /// Consecutive 100ms ticks spent not walking.
    pub inactivity_duration: u32,
    pub sounds: SoundBank,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    pub fn new() -> Self {
        let mut sprite = Sprite::new(120.0, 70.0, 100.0, 250.0)
            .with_offset(Offset::new(110.0, 5.0, 5.0, 0.0))
            .with_image(IMAGES_IDLE[0]);
        for seq in [
            &IMAGES_WALKING[..],
            &IMAGES_JUMPING_UP[..],
            &IMAGES_JUMPING_DOWN[..],
            &IMAGES_DEAD[..],
            &IMAGES_HURT[..],
            &IMAGES_IDLE[..],
            &IMAGES_LONG_IDLE[..],
        ] {
            sprite.load_images(seq);
        }
        Self {
            sprite,
            motion: Motion::new(10.0),
            health: Health::full(),
            is_walking: false,
            is_sleeping: false,
            inactivity_duration: 0,
            sounds: SoundBank::new(&SOUNDS),
        }
    }

    // ── Movement tick ─────────────────────────────────────────────────────────

    /// Apply the held controls.  Ignored while asleep: the inactivity tick
    /// wakes the character first.
    pub fn update_movement(&mut self, controls: &Controls, level_end_x: f64) {
        if !self.is_sleeping {
            self.handle_horizontal_movement(controls, level_end_x);
            self.handle_jump(controls);
        }
        if self.is_walking && !self.is_above_ground() {
            self.sounds.play(Cue::Walking);
        } else {
            self.sounds.pause(Cue::Walking);
        }
    }

    fn handle_horizontal_movement(&mut self, controls: &Controls, level_end_x: f64) {
        if controls.right && self.sprite.x < level_end_x {
            self.move_right();
            self.sprite.other_direction = false;
            self.start_walking();
        } else if controls.left && self.sprite.x > 0.0 {
            self.move_left();
            self.sprite.other_direction = true;
            self.start_walking();
        } else {
            self.is_walking = false;
        }
    }

    fn start_walking(&mut self) {
        self.sounds.pause(Cue::Snoring);
        self.is_walking = true;
        self.is_sleeping = false;
    }

    fn handle_jump(&mut self, controls: &Controls) {
        if controls.jump && !self.is_above_ground() {
            self.start_jump();
            self.is_walking = true;
        }
    }

    /// Jump with the character's own impulse, cue and wake-up.  Also used
    /// for the bounce after a stomp.
    pub fn start_jump(&mut self) {
        self.jump();
        self.sounds.play(Cue::Jump);
        self.wake();
    }

    pub fn wake(&mut self) {
        self.is_sleeping = false;
        self.inactivity_duration = 0;
    }

    // ── Inactivity tick ───────────────────────────────────────────────────────

    pub fn tick_inactivity(&mut self, controls: &Controls) {
        if !self.is_walking {
            self.inactivity_duration += 1;
            if self.inactivity_duration >= SLEEP_AFTER_TICKS {
                self.is_sleeping = true;
            }
        } else {
            self.wake();
        }

        if controls.any_movement() {
            self.wake();
        }
    }

    // ── Animation tick ────────────────────────────────────────────────────────

    pub fn status(&self, now: Millis) -> CharacterStatus {
        CharacterStatus {
            dead: self.is_dead(),
            hurt: self.is_hurt(now),
            airborne: self.is_above_ground(),
            speed_y: self.motion.speed_y,
            walking: self.is_walking,
            sleeping: self.is_sleeping,
        }
    }

    pub fn update_animation(&mut self, now: Millis) -> CharacterPose {
        let pose = CharacterPose::select(&self.status(now));
        match pose {
            CharacterPose::Dead => {
                self.play_animation(&IMAGES_DEAD);
                self.is_sleeping = false;
            }
            CharacterPose::Hurt => {
                self.play_animation(&IMAGES_HURT);
                self.sounds.pause(Cue::Snoring);
            }
            CharacterPose::JumpUp => self.play_animation(&IMAGES_JUMPING_UP),
            CharacterPose::JumpDown => self.play_animation(&IMAGES_JUMPING_DOWN),
            CharacterPose::Walking => self.play_animation(&IMAGES_WALKING),
            CharacterPose::LongIdle => {
                self.play_animation(&IMAGES_LONG_IDLE);
                self.sounds.play(Cue::Snoring);
            }
            CharacterPose::Idle => {
                self.play_animation(&IMAGES_IDLE);
                self.sounds.pause(Cue::Snoring);
            }
        }
        pose
    }

    // ── Damage ────────────────────────────────────────────────────────────────

    pub fn hit(&mut self, now: Millis) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        self.sounds.play(Cue::Hurt);
        let outcome = self.take_hit(now);
        debug!("character hit, energy now {}", self.health.energy());
        if outcome == HitOutcome::Killed {
            self.sounds.pause(Cue::Walking);
            self.sounds.pause(Cue::Snoring);
            self.sounds.play(Cue::Dead);
        }
        outcome
    }
}

impl Drawable for Character {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physics for Character {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn jump_impulse(&self) -> f64 {
        CHARACTER_JUMP_IMPULSE
    }
}

impl Combatant for Character {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }
}
