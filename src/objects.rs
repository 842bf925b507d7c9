//! Pickups, scenery and thrown bottles.

use rand::Rng;

use crate::clock::Millis;
use crate::entities::{Drawable, Sprite};
use crate::physics::{Motion, Physics};
use crate::scheduler::TaskHandle;

/// Horizontal step of a thrown bottle per flight tick.
pub const THROW_STEP: f64 = 10.0;
pub const FLIGHT_INTERVAL: Millis = 25;
/// Thrown bottles that fall below this line are discarded.
pub const DESPAWN_Y: f64 = 1000.0;

const COIN_IMAGE: &str = "img/8_coin/coin_1.png";

const BOTTLE_IMAGES: [&str; 2] = [
    "img/6_salsa_bottle/1_salsa_bottle_on_ground.png",
    "img/6_salsa_bottle/2_salsa_bottle_on_ground.png",
];

const CLOUD_IMAGE: &str = "img/5_background/layers/4_clouds/1.png";

pub const ROTATION_IMAGES: [&str; 4] = [
    "img/6_salsa_bottle/bottle_rotation/1_bottle_rotation.png",
    "img/6_salsa_bottle/bottle_rotation/2_bottle_rotation.png",
    "img/6_salsa_bottle/bottle_rotation/3_bottle_rotation.png",
    "img/6_salsa_bottle/bottle_rotation/4_bottle_rotation.png",
];

/// Background layers back to front, for the two alternating tile variants.
const LAYERS: [[&str; 4]; 2] = [
    [
        "img/5_background/layers/air.png",
        "img/5_background/layers/3_third_layer/1.png",
        "img/5_background/layers/2_second_layer/1.png",
        "img/5_background/layers/1_first_layer/1.png",
    ],
    [
        "img/5_background/layers/air.png",
        "img/5_background/layers/3_third_layer/2.png",
        "img/5_background/layers/2_second_layer/2.png",
        "img/5_background/layers/1_first_layer/2.png",
    ],
];

/// Width of one background tile (one pixel of overlap hides the seam).
pub const BACKGROUND_TILE: f64 = 719.0;

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Coin {
    pub sprite: Sprite,
}

impl Coin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { sprite: Sprite::new(x, y, 100.0, 100.0).with_image(COIN_IMAGE) }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        let x = 300.0 + rng.gen::<f64>() * 6000.0;
        let y = 155.0 + rng.gen::<f64>() * 200.0;
        Self::new(x, y)
    }
}

/// A salsa bottle lying on the ground, waiting to be picked up.
#[derive(Clone, Debug)]
pub struct BottlePickup {
    pub sprite: Sprite,
}

impl BottlePickup {
    pub fn new(x: f64) -> Self {
        Self::with_variant(x, 0)
    }

    fn with_variant(x: f64, variant: usize) -> Self {
        let image = BOTTLE_IMAGES[variant % BOTTLE_IMAGES.len()];
        Self { sprite: Sprite::new(x, 360.0, 80.0, 80.0).with_image(image) }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        let variant = rng.gen_range(0..BOTTLE_IMAGES.len());
        let x = 200.0 + rng.gen::<f64>() * 8000.0;
        Self::with_variant(x, variant)
    }
}

// ── Scenery ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Cloud {
    pub sprite: Sprite,
}

impl Cloud {
    pub fn new(x: f64) -> Self {
        Self { sprite: Sprite::new(x, 20.0, 500.0, 250.0).with_image(CLOUD_IMAGE) }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(rng.gen::<f64>() * 6000.0)
    }
}

#[derive(Clone, Debug)]
pub struct BackgroundLayer {
    pub sprite: Sprite,
}

impl BackgroundLayer {
    pub fn new(path: &'static str, x: f64) -> Self {
        Self { sprite: Sprite::new(x, 0.0, 720.0, 480.0).with_image(path) }
    }

    /// Full parallax stack for tiles `first..=last`, alternating variants.
    pub fn tiles(first: i32, last: i32) -> Vec<BackgroundLayer> {
        (first..=last)
            .flat_map(|tile| {
                let variant = tile.rem_euclid(2) as usize;
                let x = tile as f64 * BACKGROUND_TILE;
                LAYERS[variant].iter().map(move |&path| BackgroundLayer::new(path, x))
            })
            .collect()
    }
}

// ── Thrown bottle ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

#[derive(Clone, Debug)]
pub struct ThrowableObject {
    pub id: ProjectileId,
    pub sprite: Sprite,
    pub motion: Motion,
    /// Repeating tasks driving this bottle; cancelled when it is removed.
    pub tasks: Vec<TaskHandle>,
}

impl ThrowableObject {
    /// Launch a bottle from `(x, y)` with the generic jump impulse.
    pub fn new(id: ProjectileId, x: f64, y: f64) -> Self {
        let mut sprite =
            Sprite::new(x, y, 50.0, 60.0).with_image("img/6_salsa_bottle/salsa_bottle.png");
        sprite.load_images(&ROTATION_IMAGES);
        let mut bottle = Self { id, sprite, motion: Motion::default(), tasks: Vec::new() };
        bottle.jump();
        bottle
    }

    /// Flight tick.
    pub fn fly(&mut self) {
        self.sprite.x += THROW_STEP;
    }

    pub fn is_out_of_world(&self) -> bool {
        self.sprite.y > DESPAWN_Y
    }
}

impl Drawable for ThrowableObject {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physics for ThrowableObject {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    /// A thrown bottle never lands; it keeps falling past the ground line.
    fn is_above_ground(&self) -> bool {
        true
    }
}

macro_rules! drawable {
    ($($ty:ty),*) => {
        $(impl Drawable for $ty {
            fn sprite(&self) -> &Sprite {
                &self.sprite
            }

            fn sprite_mut(&mut self) -> &mut Sprite {
                &mut self.sprite
            }
        })*
    };
}

drawable!(Coin, BottlePickup, Cloud, BackgroundLayer);
