//! Static level content.
//!
//! A [`Level`] is a plain bundle of entity collections plus the right-hand
//! boundary the character may not walk past.  [`build_level`] populates one
//! from a [`LevelSpec`] using an injected RNG so tests can seed it.

use log::info;
use rand::Rng;

use crate::enemy::{Enemy, EnemyKind};
use crate::objects::{BackgroundLayer, BottlePickup, Cloud, Coin};

pub const LEVEL_END_X: f64 = 8000.0;

#[derive(Clone, Debug)]
pub struct Level {
    pub enemies: Vec<Enemy>,
    pub clouds: Vec<Cloud>,
    pub bottles: Vec<BottlePickup>,
    pub coins: Vec<Coin>,
    pub background_objects: Vec<BackgroundLayer>,
    pub level_end_x: f64,
}

impl Level {
    pub fn new(
        enemies: Vec<Enemy>,
        clouds: Vec<Cloud>,
        bottles: Vec<BottlePickup>,
        coins: Vec<Coin>,
        background_objects: Vec<BackgroundLayer>,
    ) -> Self {
        Self {
            enemies,
            clouds,
            bottles,
            coins,
            background_objects,
            level_end_x: LEVEL_END_X,
        }
    }

    /// A level with nothing in it.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    pub fn with_end_x(mut self, level_end_x: f64) -> Self {
        self.level_end_x = level_end_x;
        self
    }
}

/// How many of each thing to scatter over the level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    pub chickens: usize,
    pub small_chickens: usize,
    pub coins: usize,
    pub bottles: usize,
    pub clouds: usize,
    pub end_x: f64,
}

impl Default for LevelSpec {
    fn default() -> Self {
        Self {
            chickens: 5,
            small_chickens: 4,
            coins: 10,
            bottles: 15,
            clouds: 6,
            end_x: LEVEL_END_X,
        }
    }
}

/// Build a level: chickens, then the end boss last; background tiles cover
/// one screen left of the start up to the end boundary.
pub fn build_level(spec: &LevelSpec, rng: &mut impl Rng) -> Level {
    let mut enemies: Vec<Enemy> = Vec::with_capacity(spec.chickens + spec.small_chickens + 1);
    enemies.extend((0..spec.chickens).map(|_| Enemy::random_chicken(EnemyKind::Chicken, rng)));
    enemies.extend(
        (0..spec.small_chickens).map(|_| Enemy::random_chicken(EnemyKind::SmallChicken, rng)),
    );
    enemies.push(Enemy::endboss());

    let clouds = (0..spec.clouds).map(|_| Cloud::random(rng)).collect();
    let bottles = (0..spec.bottles).map(|_| BottlePickup::random(rng)).collect();
    let coins = (0..spec.coins).map(|_| Coin::random(rng)).collect();

    let last_tile = (spec.end_x / crate::objects::BACKGROUND_TILE).ceil() as i32;
    let background = BackgroundLayer::tiles(-1, last_tile);

    info!(
        "built level: {} enemies, {} coins, {} bottles, end at x={}",
        enemies.len(),
        spec.coins,
        spec.bottles,
        spec.end_x
    );

    Level::new(enemies, clouds, bottles, coins, background).with_end_x(spec.end_x)
}
