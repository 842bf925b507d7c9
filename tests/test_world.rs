use std::cell::RefCell;
use std::rc::Rc;

use pollo_loco::audio::{AudioCommand, AudioSink, Cue};
use pollo_loco::clock::ManualClock;
use pollo_loco::combat::{Combatant, Health};
use pollo_loco::enemy::Enemy;
use pollo_loco::entities::{ImageHandle, Rect};
use pollo_loco::input::{Control, InputState};
use pollo_loco::level::Level;
use pollo_loco::objects::{BackgroundLayer, BottlePickup, Cloud, Coin, ProjectileId, ThrowableObject};
use pollo_loco::surface::Surface;
use pollo_loco::world::World;

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct RecordingSink {
    played: Rc<RefCell<Vec<(Cue, f32)>>>,
    paused: Rc<RefCell<Vec<Cue>>>,
}

impl RecordingSink {
    fn played(&self, cue: Cue) -> usize {
        self.played.borrow().iter().filter(|(c, _)| *c == cue).count()
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, cue: Cue, volume: f32) {
        self.played.borrow_mut().push((cue, volume));
    }

    fn pause(&mut self, cue: Cue) {
        self.paused.borrow_mut().push(cue);
    }
}

struct Harness {
    world: World,
    keyboard: InputState,
    clock: ManualClock,
    sink: RecordingSink,
}

fn harness(level: Level) -> Harness {
    let keyboard = InputState::new();
    let clock = ManualClock::new(0);
    let sink = RecordingSink::default();
    let mut world = World::new(level, keyboard.clone(), clock.clone(), sink.clone());
    // Start on the ground instead of dropping in from the spawn height.
    world.character.sprite.y = 180.0;
    Harness { world, keyboard, clock, sink }
}

fn level_with(enemies: Vec<Enemy>) -> Level {
    Level::new(enemies, Vec::new(), Vec::new(), Vec::new(), Vec::new())
}

/// A motionless chicken standing where the grounded character's hit-box is.
fn chicken_on_character() -> Enemy {
    Enemy::chicken(150.0, 0.0)
}

fn pending_plays(world: &World, cue: Cue) -> usize {
    world
        .sounds
        .pending()
        .iter()
        .filter(|cmd| matches!(cmd, AudioCommand::Play { cue: c, .. } if *c == cue))
        .count()
}

// ── Enemy contact ─────────────────────────────────────────────────────────────

#[test]
fn falling_onto_chicken_kills_it_and_bounces() {
    let mut chicken = chicken_on_character();
    chicken.sprite.y = 300.0;
    let mut h = harness(level_with(vec![chicken]));
    h.world.character.sprite.y = 100.0;
    h.world.character.motion.speed_y = -5.0;

    h.world.check_collisions(0);

    assert!(h.world.level.enemies[0].is_dead());
    assert_eq!(h.world.character.energy(), 100);
    assert_eq!(h.world.character.motion.speed_y, 27.0);
    assert_eq!(pending_plays(&h.world, Cue::ChickenDead), 1);
}

#[test]
fn grounded_contact_costs_five_energy_per_tick() {
    let mut h = harness(level_with(vec![chicken_on_character()]));

    h.world.check_collisions(0);
    assert_eq!(h.world.character.energy(), 95);
    assert_eq!(h.world.status_bar.percentage(), 95);

    h.world.check_collisions(100);
    assert_eq!(h.world.character.energy(), 90);
    assert!(h.world.character.is_hurt(100));
}

#[test]
fn dead_enemies_are_harmless() {
    let mut chicken = chicken_on_character();
    chicken.change_to_dead_image();
    let mut h = harness(level_with(vec![chicken]));

    h.world.check_collisions(0);

    assert_eq!(h.world.character.energy(), 100);
}

#[test]
fn end_to_end_game_over_stops_the_world() {
    let mut level = level_with(vec![chicken_on_character(), Enemy::endboss()]);
    level.coins.push(Coin::new(3000.0, 200.0));
    level.bottles.push(BottlePickup::new(3000.0));
    let mut h = harness(level);
    h.world.character.health = Health::with_energy(5);

    h.clock.set(100);
    h.world.update();

    assert!(h.world.is_game_over());
    assert!(!h.world.has_won());
    assert!(h.world.level.enemies.is_empty());
    assert!(h.world.coins.is_empty());
    assert!(h.world.bottles.is_empty());
    assert!(h.world.throwable_objects.is_empty());
    assert_eq!(h.world.active_tasks(), 0);
    assert_eq!(h.sink.played(Cue::Dead), 1);

    let (x, y) = (h.world.character.sprite.x, h.world.character.sprite.y);
    h.keyboard.press(Control::Right);
    h.keyboard.press(Control::Jump);
    h.clock.set(5000);
    h.world.update();
    assert_eq!(h.world.character.sprite.x, x);
    assert_eq!(h.world.character.sprite.y, y);
}

// ── Throwing ──────────────────────────────────────────────────────────────────

#[test]
fn throws_respect_the_cooldown() {
    let mut h = harness(Level::empty());
    h.world.collected_bottles = 3;
    h.keyboard.press(Control::Throw);

    assert!(h.world.check_throw_objects(0));
    assert!(!h.world.check_throw_objects(1000));
    assert!(h.world.check_throw_objects(1600));

    assert_eq!(h.world.collected_bottles, 1);
    assert_eq!(h.world.throwable_objects.len(), 2);
    assert_eq!(h.world.bottles_status_bar.percentage(), 20);
}

#[test]
fn bottle_leaves_from_the_characters_hand() {
    let mut h = harness(Level::empty());
    h.world.collected_bottles = 1;
    h.keyboard.press(Control::Throw);

    h.world.check_throw_objects(0);

    let bottle = &h.world.throwable_objects[0];
    assert_eq!(bottle.sprite.x, 220.0);
    assert_eq!(bottle.sprite.y, 280.0);
    assert_eq!(bottle.motion.speed_y, 30.0);
}

#[test]
fn no_throw_without_bottles_or_when_facing_back() {
    let mut h = harness(Level::empty());
    h.keyboard.press(Control::Throw);

    assert!(!h.world.check_throw_objects(0));

    h.world.collected_bottles = 1;
    h.world.character.sprite.other_direction = true;
    assert!(!h.world.check_throw_objects(0));

    h.world.character.sprite.other_direction = false;
    h.keyboard.release(Control::Throw);
    assert!(!h.world.check_throw_objects(0));
    assert_eq!(h.world.collected_bottles, 1);
}

#[test]
fn thrown_bottle_flies_and_falls_out_of_the_world() {
    let mut h = harness(Level::empty());
    let base_tasks = h.world.active_tasks();
    h.world.collected_bottles = 1;
    h.keyboard.press(Control::Throw);

    h.world.advance_to(100);
    assert_eq!(h.world.throwable_objects.len(), 1);
    assert_eq!(h.world.active_tasks(), base_tasks + 3);
    h.keyboard.release(Control::Throw);

    h.world.advance_to(350);
    assert_eq!(h.world.throwable_objects[0].sprite.x, 320.0);

    h.world.advance_to(2100);
    assert!(h.world.throwable_objects.is_empty());
    assert_eq!(h.world.active_tasks(), base_tasks);
}

#[test]
fn bottle_kills_chicken_and_is_spent() {
    let mut h = harness(level_with(vec![Enemy::small_chicken(1000.0, 0.0)]));
    h.world.throwable_objects.push(ThrowableObject::new(ProjectileId(7), 1000.0, 380.0));

    h.world.check_throwable_collisions(0);

    assert!(h.world.level.enemies[0].is_dead());
    assert!(h.world.throwable_objects.is_empty());
    assert_eq!(pending_plays(&h.world, Cue::BottleBreak), 1);
    assert_eq!(pending_plays(&h.world, Cue::SmallChickenDead), 1);

    // A corpse no longer stops bottles.
    h.world.throwable_objects.push(ThrowableObject::new(ProjectileId(8), 1000.0, 380.0));
    h.world.check_throwable_collisions(100);
    assert_eq!(h.world.throwable_objects.len(), 1);
}

#[test]
fn boss_falls_to_the_fourth_bottle() {
    let mut boss = Enemy::endboss();
    boss.sprite.x = 1000.0;
    let mut h = harness(level_with(vec![boss]));

    for hit in 0..4u64 {
        assert!(!h.world.has_won());
        h.world
            .throwable_objects
            .push(ThrowableObject::new(ProjectileId(hit), 1100.0, 100.0));
        h.world.check_throwable_collisions(hit * 2000);
        assert!(h.world.throwable_objects.is_empty());
    }

    let boss = &h.world.level.enemies[0];
    assert!(boss.is_dead());
    assert!(h.world.has_won());
    assert!(!h.world.is_game_over());
    assert_eq!(h.world.endboss_status_bar.percentage(), 0);
    assert_eq!(h.world.active_tasks(), 0);
    assert_eq!(boss.sounds.pending().len(), 5);
}

#[test]
fn boss_energy_bar_tracks_hits() {
    let mut boss = Enemy::endboss();
    boss.sprite.x = 1000.0;
    let mut h = harness(level_with(vec![boss]));

    h.world
        .throwable_objects
        .push(ThrowableObject::new(ProjectileId(0), 1100.0, 100.0));
    h.world.check_throwable_collisions(0);

    assert_eq!(h.world.level.enemies[0].energy(), 75);
    assert_eq!(h.world.endboss_status_bar.percentage(), 75);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn coin_counter_saturates_but_every_coin_chimes() {
    let mut h = harness(Level::empty());
    for _ in 0..6 {
        h.world.coins.push(Coin::new(120.0, 300.0));
    }

    h.world.check_coin_collisions();

    assert_eq!(h.world.collected_coins, 5);
    assert!(h.world.coins.is_empty());
    assert_eq!(pending_plays(&h.world, Cue::CollectCoin), 6);
    assert_eq!(h.world.coins_status_bar.percentage(), 100);
}

#[test]
fn bottles_are_left_behind_once_full() {
    let mut h = harness(Level::empty());
    for _ in 0..6 {
        h.world.bottles.push(BottlePickup::new(120.0));
    }
    h.world.bottles.push(BottlePickup::new(4000.0));

    h.world.check_bottle_collisions();

    assert_eq!(h.world.collected_bottles, 5);
    assert_eq!(h.world.bottles.len(), 2);
    assert_eq!(h.world.bottles_status_bar.percentage(), 100);
}

// ── Movement and camera ───────────────────────────────────────────────────────

#[test]
fn camera_follows_the_character() {
    let mut h = harness(Level::empty());
    h.keyboard.press(Control::Right);

    h.world.advance_to(16);

    assert_eq!(h.world.character.sprite.x, 130.0);
    assert_eq!(h.world.camera_x, -30.0);
    assert!(!h.world.character.sprite.other_direction);
}

#[test]
fn character_stops_at_the_level_end() {
    let mut h = harness(Level::empty().with_end_x(125.0));
    h.keyboard.press(Control::Right);

    h.world.advance_to(160);

    assert_eq!(h.world.character.sprite.x, 130.0);
}

#[test]
fn long_inactivity_puts_the_character_to_sleep() {
    let mut h = harness(Level::empty());

    h.world.advance_to(5000);
    assert!(h.world.character.is_sleeping);

    h.world.advance_to(5100);
    assert_eq!(h.sink.played(Cue::Snoring), 1);

    h.keyboard.press(Control::Right);
    h.world.advance_to(5200);
    assert!(!h.world.character.is_sleeping);

    h.world.advance_to(5300);
    assert!(h.world.character.is_walking);
    assert!(h.sink.paused.borrow().contains(&Cue::Snoring));
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[test]
fn muting_twice_restores_every_volume() {
    let mut h = harness(level_with(vec![Enemy::chicken(900.0, 0.2), Enemy::endboss()]));
    let before = h.world.managed_volumes();

    assert!(h.world.toggle_mute());
    assert!(h.world.managed_volumes().iter().all(|&(_, v)| v == 0.0));

    assert!(!h.world.toggle_mute());
    assert_eq!(h.world.managed_volumes(), before);
    assert!(!h.world.is_muted());
}

#[test]
fn theme_starts_with_the_world() {
    let mut h = harness(Level::empty());
    h.world.flush_audio();
    assert_eq!(h.sink.played(Cue::Theme), 1);
}

#[test]
fn muted_world_plays_silently() {
    let mut h = harness(Level::empty());
    h.world.set_muted(true);
    h.world.coins.push(Coin::new(120.0, 300.0));

    h.world.check_coin_collisions();
    h.world.flush_audio();

    let played = h.sink.played.borrow();
    let (_, volume) = played
        .iter()
        .find(|(cue, _)| *cue == Cue::CollectCoin)
        .copied()
        .expect("coin cue");
    assert_eq!(volume, 0.0);
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Op {
    Clear,
    Translate(f64),
    Draw(&'static str),
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn translate(&mut self, dx: f64) {
        self.ops.push(Op::Translate(dx));
    }

    fn draw_image(&mut self, image: &ImageHandle, _dest: Rect, _mirrored: bool) {
        self.ops.push(Op::Draw(image.path()));
    }
}

#[test]
fn status_bars_are_drawn_in_screen_space() {
    let level = Level::new(
        vec![Enemy::chicken(900.0, 0.2)],
        vec![Cloud::new(0.0)],
        Vec::new(),
        Vec::new(),
        vec![BackgroundLayer::new("img/5_background/layers/air.png", 0.0)],
    );
    let h = harness(level);
    let camera = h.world.camera_x;
    let mut surface = RecordingSurface::default();

    h.world.draw(&mut surface);

    let ops = &surface.ops;
    assert_eq!(ops[0], Op::Clear);
    assert_eq!(ops[1], Op::Translate(camera));
    assert_eq!(ops[2], Op::Draw("img/5_background/layers/air.png"));
    assert!(matches!(ops[3], Op::Draw(path) if path.contains("clouds")));
    assert_eq!(ops[4], Op::Translate(-camera));
    for op in &ops[5..9] {
        assert!(matches!(op, Op::Draw(path) if path.contains("7_statusbars")));
    }
    assert_eq!(ops[9], Op::Translate(camera));
    assert!(matches!(ops[10], Op::Draw(path) if path.contains("character_pepe")));
    assert!(matches!(ops[11], Op::Draw(path) if path.contains("chicken_normal")));
    assert_eq!(ops[12], Op::Translate(-camera));
    assert_eq!(ops.len(), 13);
}
