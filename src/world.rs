//! The play session.
//!
//! `World` owns every entity for one session and drives them with a set of
//! independently-rated repeating tasks, all registered in its own
//! [`Scheduler`].  Reaching a terminal state (character or boss at zero
//! energy) cancels exactly those tasks; nothing resumes until a new `World`
//! is built.

use log::{debug, info};

use crate::animation::Animatable;
use crate::audio::{AudioSink, Cue, SoundBank};
use crate::character::Character;
use crate::clock::{Clock, Millis};
use crate::collision::{self, resolve, ColliderKind, Contact, Resolution};
use crate::combat::{Combatant, HitOutcome};
use crate::enemy::EnemyKind;
use crate::input::InputState;
use crate::level::Level;
use crate::objects::{
    BottlePickup, Coin, ProjectileId, ThrowableObject, FLIGHT_INTERVAL, ROTATION_IMAGES,
};
use crate::physics::{Physics, GRAVITY_INTERVAL};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::status_bar::{percentage_of, BarKind, StatusBar};
use crate::surface::{add_objects_to_map, add_to_map, Surface};

// ── Tick rates ────────────────────────────────────────────────────────────────

/// Collisions, throws and pickups.
pub const INTERACTION_INTERVAL: Millis = 100;
/// Character movement from input and camera follow (≈60 Hz).
pub const MOVEMENT_INTERVAL: Millis = 16;
pub const ANIMATION_INTERVAL: Millis = 100;
pub const INACTIVITY_INTERVAL: Millis = 100;
pub const CHICKEN_WALK_INTERVAL: Millis = 16;
pub const CHICKEN_ANIMATION_INTERVAL: Millis = 200;
pub const BOSS_INTERVAL: Millis = 100;
pub const SPIN_INTERVAL: Millis = 100;

// ── Rules ─────────────────────────────────────────────────────────────────────

pub const THROW_COOLDOWN: Millis = 1500;
/// Cap for both the coin and the bottle counter.
pub const MAX_PICKUPS: u32 = 5;
/// Keeps the character this many pixels from the left edge.
pub const CAMERA_LEAD: f64 = 100.0;
/// Where a thrown bottle appears relative to the character.
const THROW_ORIGIN: (f64, f64) = (100.0, 100.0);

const WORLD_SOUNDS: [Cue; 5] = [
    Cue::Theme,
    Cue::CollectCoin,
    Cue::BottleBreak,
    Cue::ChickenDead,
    Cue::SmallChickenDead,
];

/// Every kind of repeating work the world schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Interaction,
    CharacterMovement,
    CharacterGravity,
    CharacterAnimation,
    Inactivity,
    /// Index into `level.enemies`.
    ChickenWalk(usize),
    ChickenAnimation(usize),
    BossBehaviour(usize),
    ProjectileGravity(ProjectileId),
    ProjectileFlight(ProjectileId),
    ProjectileSpin(ProjectileId),
}

pub struct World {
    pub character: Character,
    /// Enemies, clouds and background.  Coins and bottles move to the world.
    pub level: Level,
    pub throwable_objects: Vec<ThrowableObject>,
    pub coins: Vec<Coin>,
    pub bottles: Vec<BottlePickup>,
    pub collected_coins: u32,
    pub collected_bottles: u32,
    pub camera_x: f64,
    pub status_bar: StatusBar,
    pub coins_status_bar: StatusBar,
    pub bottles_status_bar: StatusBar,
    pub endboss_status_bar: StatusBar,
    pub sounds: SoundBank,
    keyboard: InputState,
    clock: Box<dyn Clock>,
    audio: Box<dyn AudioSink>,
    scheduler: Scheduler<Task>,
    /// Handles of every live task this world started.
    tasks: Vec<TaskHandle>,
    last_throw: Option<Millis>,
    next_projectile: u64,
    game_over: bool,
    won: bool,
    muted: bool,
}

impl World {
    pub fn new<C, A>(mut level: Level, keyboard: InputState, clock: C, audio: A) -> Self
    where
        C: Clock + 'static,
        A: AudioSink + 'static,
    {
        let coins = std::mem::take(&mut level.coins);
        let bottles = std::mem::take(&mut level.bottles);
        let character = Character::new();
        let camera_x = -character.sprite.x + CAMERA_LEAD;

        let mut world = Self {
            character,
            level,
            throwable_objects: Vec::new(),
            coins,
            bottles,
            collected_coins: 0,
            collected_bottles: 0,
            camera_x,
            status_bar: StatusBar::new(BarKind::Health),
            coins_status_bar: StatusBar::new(BarKind::Coins),
            bottles_status_bar: StatusBar::new(BarKind::Bottles),
            endboss_status_bar: StatusBar::new(BarKind::Boss),
            sounds: SoundBank::new(&WORLD_SOUNDS),
            keyboard,
            clock: Box::new(clock),
            audio: Box::new(audio),
            scheduler: Scheduler::new(),
            tasks: Vec::new(),
            last_throw: None,
            next_projectile: 0,
            game_over: false,
            won: false,
            muted: false,
        };
        world.run();
        world.sounds.play(Cue::Theme);
        info!(
            "world ready: {} enemies, {} coins, {} bottles, {} tasks",
            world.level.enemies.len(),
            world.coins.len(),
            world.bottles.len(),
            world.tasks.len()
        );
        world
    }

    /// Register every repeating task of a fresh session.
    fn run(&mut self) {
        let now = self.clock.now_ms();
        self.schedule(now, INTERACTION_INTERVAL, Task::Interaction);
        self.schedule(now, MOVEMENT_INTERVAL, Task::CharacterMovement);
        self.schedule(now, GRAVITY_INTERVAL, Task::CharacterGravity);
        self.schedule(now, ANIMATION_INTERVAL, Task::CharacterAnimation);
        self.schedule(now, INACTIVITY_INTERVAL, Task::Inactivity);

        for index in 0..self.level.enemies.len() {
            if self.level.enemies[index].is_boss() {
                self.schedule(now, BOSS_INTERVAL, Task::BossBehaviour(index));
            } else {
                self.schedule(now, CHICKEN_WALK_INTERVAL, Task::ChickenWalk(index));
                self.schedule(now, CHICKEN_ANIMATION_INTERVAL, Task::ChickenAnimation(index));
            }
        }
    }

    fn schedule(&mut self, now: Millis, interval: Millis, task: Task) -> TaskHandle {
        let handle = self.scheduler.every(now, interval, task);
        self.tasks.push(handle);
        handle
    }

    // ── Driving time ──────────────────────────────────────────────────────────

    /// Run everything that has come due according to the world's clock.
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        self.advance_to(now);
    }

    /// Run every task due at or before `now`, in due order, then hand the
    /// queued audio to the sink.
    pub fn advance_to(&mut self, now: Millis) {
        while !self.is_stopped() {
            let Some((_, at, task)) = self.scheduler.pop_due(now) else {
                break;
            };
            self.run_task(task, at);
        }
        self.flush_audio();
    }

    fn run_task(&mut self, task: Task, at: Millis) {
        match task {
            Task::Interaction => self.run_interaction(at),
            Task::CharacterMovement => {
                let controls = self.keyboard.snapshot();
                self.character.update_movement(&controls, self.level.level_end_x);
                self.camera_x = -self.character.sprite.x + CAMERA_LEAD;
            }
            Task::CharacterGravity => self.character.apply_gravity(),
            Task::CharacterAnimation => {
                self.character.update_animation(at);
            }
            Task::Inactivity => {
                let controls = self.keyboard.snapshot();
                self.character.tick_inactivity(&controls);
            }
            Task::ChickenWalk(index) => {
                if let Some(enemy) = self.level.enemies.get_mut(index) {
                    enemy.walk();
                }
            }
            Task::ChickenAnimation(index) => {
                if let Some(enemy) = self.level.enemies.get_mut(index) {
                    enemy.animate_walk();
                }
            }
            Task::BossBehaviour(index) => {
                let character_x = self.character.sprite.x;
                if let Some(boss) = self.level.enemies.get_mut(index) {
                    boss.boss_tick(character_x, at);
                }
            }
            Task::ProjectileGravity(id) => {
                let fell_out = match self.projectile_mut(id) {
                    Some(bottle) => {
                        bottle.apply_gravity();
                        bottle.is_out_of_world()
                    }
                    None => false,
                };
                if fell_out {
                    self.remove_projectiles(&[id]);
                }
            }
            Task::ProjectileFlight(id) => {
                if let Some(bottle) = self.projectile_mut(id) {
                    bottle.fly();
                }
            }
            Task::ProjectileSpin(id) => {
                if let Some(bottle) = self.projectile_mut(id) {
                    bottle.play_animation(&ROTATION_IMAGES);
                }
            }
        }
    }

    /// The 10 Hz interaction tick.
    pub fn run_interaction(&mut self, now: Millis) {
        self.check_collisions(now);
        if self.is_stopped() {
            return;
        }
        self.check_throw_objects(now);
        self.check_coin_collisions();
        self.check_bottle_collisions();
    }

    // ── Enemies ───────────────────────────────────────────────────────────────

    fn character_contact(&self) -> Contact {
        Contact::new(self.character.is_above_ground(), self.character.motion.speed_y)
    }

    /// Character against every live enemy, then thrown bottles.
    pub fn check_collisions(&mut self, now: Millis) {
        for index in 0..self.level.enemies.len() {
            if self.is_stopped() {
                return;
            }
            let Some(enemy) = self.level.enemies.get(index) else {
                break;
            };
            if enemy.is_dead() || !collision::is_colliding(&self.character.sprite, &enemy.sprite) {
                continue;
            }
            let resolution = resolve(
                ColliderKind::Character,
                enemy.collider_kind(),
                self.character_contact(),
            );
            self.handle_character_enemy_collision(resolution, index, now);
        }

        self.check_throwable_collisions(now);
    }

    fn handle_character_enemy_collision(
        &mut self,
        resolution: Resolution,
        index: usize,
        now: Millis,
    ) {
        match resolution {
            Resolution::StompKill => {
                let enemy = &mut self.level.enemies[index];
                enemy.change_to_dead_image();
                let cue = death_cue(enemy.kind);
                self.sounds.play(cue);
                self.character.start_jump();
                debug!("stomped enemy #{}", index);
            }
            Resolution::DamageCharacter => self.hit_character(now),
            _ => {}
        }
    }

    fn hit_character(&mut self, now: Millis) {
        let outcome = self.character.hit(now);
        self.status_bar.set_percentage(self.character.energy());
        if outcome == HitOutcome::Killed {
            self.game_over_now();
        }
    }

    /// Each bottle is spent on the first live enemy its raw box touches.
    pub fn check_throwable_collisions(&mut self, now: Millis) {
        let mut spent: Vec<ProjectileId> = Vec::new();

        for bottle_index in 0..self.throwable_objects.len() {
            if self.is_stopped() {
                break;
            }
            let bottle = &self.throwable_objects[bottle_index];
            let target = self.level.enemies.iter().position(|enemy| {
                !enemy.is_dead() && collision::is_overlapping_raw(&bottle.sprite, &enemy.sprite)
            });
            let Some(enemy_index) = target else {
                continue;
            };
            spent.push(bottle.id);

            let kind = self.level.enemies[enemy_index].collider_kind();
            match resolve(ColliderKind::Projectile, kind, Contact::default()) {
                Resolution::DamageBoss => {
                    self.sounds.play(Cue::BottleBreak);
                    let boss = &mut self.level.enemies[enemy_index];
                    let outcome = boss.hit(now);
                    let energy = boss.energy();
                    self.endboss_status_bar.set_percentage(energy);
                    if outcome == HitOutcome::Killed {
                        self.win_now();
                    }
                }
                Resolution::KillEnemy => {
                    self.sounds.play(Cue::BottleBreak);
                    let enemy = &mut self.level.enemies[enemy_index];
                    enemy.change_to_dead_image();
                    let cue = death_cue(enemy.kind);
                    self.sounds.play(cue);
                }
                _ => {}
            }
        }

        self.remove_projectiles(&spent);
    }

    // ── Throwing ──────────────────────────────────────────────────────────────

    /// Throw a bottle if the control is held, one is available, the cooldown
    /// has passed and the character faces forward.  Returns whether a bottle
    /// left the hand.
    pub fn check_throw_objects(&mut self, now: Millis) -> bool {
        let cooled_down = self
            .last_throw
            .map_or(true, |last| now.saturating_sub(last) >= THROW_COOLDOWN);
        if !self.keyboard.snapshot().throw
            || self.collected_bottles == 0
            || !cooled_down
            || self.character.sprite.other_direction
        {
            return false;
        }

        let id = self.spawn_projectile(now);
        self.collected_bottles -= 1;
        self.bottles_status_bar
            .set_percentage(percentage_of(self.collected_bottles, MAX_PICKUPS));
        self.last_throw = Some(now);
        self.character.wake();
        debug!("threw bottle {:?}, {} left", id, self.collected_bottles);
        true
    }

    fn spawn_projectile(&mut self, now: Millis) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;

        let x = self.character.sprite.x + THROW_ORIGIN.0;
        let y = self.character.sprite.y + THROW_ORIGIN.1;
        let mut bottle = ThrowableObject::new(id, x, y);
        bottle.tasks = vec![
            self.schedule(now, GRAVITY_INTERVAL, Task::ProjectileGravity(id)),
            self.schedule(now, FLIGHT_INTERVAL, Task::ProjectileFlight(id)),
            self.schedule(now, SPIN_INTERVAL, Task::ProjectileSpin(id)),
        ];
        self.throwable_objects.push(bottle);
        id
    }

    fn projectile_mut(&mut self, id: ProjectileId) -> Option<&mut ThrowableObject> {
        self.throwable_objects.iter_mut().find(|b| b.id == id)
    }

    fn remove_projectiles(&mut self, ids: &[ProjectileId]) {
        if ids.is_empty() {
            return;
        }
        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.throwable_objects)
            .into_iter()
            .partition(|bottle| ids.contains(&bottle.id));
        self.throwable_objects = kept;
        for bottle in gone {
            self.scheduler.cancel_all(bottle.tasks.iter().copied());
            self.tasks.retain(|handle| !bottle.tasks.contains(handle));
        }
    }

    // ── Pickups ───────────────────────────────────────────────────────────────

    /// Every touched coin is collected and removed, even past the cap.
    pub fn check_coin_collisions(&mut self) {
        let contact = self.character_contact();
        let character = &self.character.sprite;
        let (touched, remaining): (Vec<Coin>, Vec<Coin>) = std::mem::take(&mut self.coins)
            .into_iter()
            .partition(|coin| {
                collision::is_colliding(character, &coin.sprite)
                    && resolve(ColliderKind::Character, ColliderKind::Coin, contact)
                        == Resolution::CollectCoin
            });
        self.coins = remaining;
        for _ in &touched {
            self.collect_coin();
        }
    }

    /// Counts up to the cap; the cue plays either way.
    pub fn collect_coin(&mut self) {
        if self.collected_coins < MAX_PICKUPS {
            self.collected_coins += 1;
            self.coins_status_bar
                .set_percentage(percentage_of(self.collected_coins, MAX_PICKUPS));
        }
        self.sounds.play(Cue::CollectCoin);
    }

    /// Touched bottles are only picked up while there is room for them.
    pub fn check_bottle_collisions(&mut self) {
        let contact = self.character_contact();
        let mut index = 0;
        while index < self.bottles.len() {
            let pickup = &self.bottles[index].sprite;
            let touching = collision::is_colliding(&self.character.sprite, pickup)
                && resolve(ColliderKind::Character, ColliderKind::BottlePickup, contact)
                    == Resolution::CollectBottle;
            if touching && self.collected_bottles < MAX_PICKUPS {
                self.bottles.remove(index);
                self.collect_bottle();
            } else {
                index += 1;
            }
        }
    }

    pub fn collect_bottle(&mut self) {
        if self.collected_bottles < MAX_PICKUPS {
            self.collected_bottles += 1;
            self.bottles_status_bar
                .set_percentage(percentage_of(self.collected_bottles, MAX_PICKUPS));
        }
    }

    // ── Terminal states ───────────────────────────────────────────────────────

    fn game_over_now(&mut self) {
        info!("game over");
        self.game_over = true;
        self.clear_game_objects();
        self.shutdown();
    }

    fn win_now(&mut self) {
        info!("level won");
        self.won = true;
        self.shutdown();
    }

    /// Drop every live enemy, pickup and bottle in flight.
    pub fn clear_game_objects(&mut self) {
        self.level.enemies.clear();
        self.coins.clear();
        self.bottles.clear();
        self.throwable_objects.clear();
    }

    /// Cancel every task this world started.
    pub fn shutdown(&mut self) {
        let cancelled = self.scheduler.cancel_all(self.tasks.drain(..));
        debug!("shutdown cancelled {} tasks", cancelled);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn is_stopped(&self) -> bool {
        self.game_over || self.won
    }

    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn keyboard(&self) -> &InputState {
        &self.keyboard
    }

    // ── Audio ─────────────────────────────────────────────────────────────────

    /// Flip the global mute and return the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sounds.set_muted(muted);
        self.character.sounds.set_muted(muted);
        for enemy in &mut self.level.enemies {
            enemy.sounds.set_muted(muted);
        }
        info!("sound {}", if muted { "muted" } else { "on" });
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume of every channel the world manages, its own bank first.
    pub fn managed_volumes(&self) -> Vec<(Cue, f32)> {
        let mut volumes = self.sounds.volumes();
        volumes.extend(self.character.sounds.volumes());
        for enemy in &self.level.enemies {
            volumes.extend(enemy.sounds.volumes());
        }
        volumes
    }

    pub fn flush_audio(&mut self) {
        self.sounds.drain_into(self.audio.as_mut());
        self.character.sounds.drain_into(self.audio.as_mut());
        for enemy in &mut self.level.enemies {
            enemy.sounds.drain_into(self.audio.as_mut());
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw one frame: scenery and entities follow the camera, status bars
    /// stay fixed on screen.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();

        surface.translate(self.camera_x);
        add_objects_to_map(surface, &self.level.background_objects);
        add_objects_to_map(surface, &self.level.clouds);
        surface.translate(-self.camera_x);

        add_to_map(surface, &self.status_bar);
        add_to_map(surface, &self.coins_status_bar);
        add_to_map(surface, &self.bottles_status_bar);
        add_to_map(surface, &self.endboss_status_bar);

        surface.translate(self.camera_x);
        add_to_map(surface, &self.character);
        add_objects_to_map(surface, &self.level.enemies);
        add_objects_to_map(surface, &self.coins);
        add_objects_to_map(surface, &self.bottles);
        add_objects_to_map(surface, &self.throwable_objects);
        surface.translate(-self.camera_x);
    }
}

fn death_cue(kind: EnemyKind) -> Cue {
    match kind {
        EnemyKind::Chicken => Cue::ChickenDead,
        _ => Cue::SmallChickenDead,
    }
}
