//! Screen-space status bars.
//!
//! Each bar shows one of six sprites for the bands 0/20/40/60/80/100.

use crate::entities::{Drawable, Sprite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarKind {
    Health,
    Coins,
    Bottles,
    Boss,
}

const HEALTH_IMAGES: [&str; 6] = [
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/0.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/20.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/40.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/60.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/80.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/100.png",
];

const COIN_IMAGES: [&str; 6] = [
    "img/7_statusbars/1_statusbar/1_statusbar_coin/green/0.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/green/20.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/green/40.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/green/60.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/green/80.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/green/100.png",
];

const BOTTLE_IMAGES: [&str; 6] = [
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/orange/0.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/orange/20.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/orange/40.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/orange/60.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/orange/80.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/orange/100.png",
];

const BOSS_IMAGES: [&str; 6] = [
    "img/7_statusbars/2_statusbar_endboss/orange/orange0.png",
    "img/7_statusbars/2_statusbar_endboss/orange/orange20.png",
    "img/7_statusbars/2_statusbar_endboss/orange/orange40.png",
    "img/7_statusbars/2_statusbar_endboss/orange/orange60.png",
    "img/7_statusbars/2_statusbar_endboss/orange/orange80.png",
    "img/7_statusbars/2_statusbar_endboss/orange/orange100.png",
];

impl BarKind {
    fn images(self) -> &'static [&'static str; 6] {
        match self {
            BarKind::Health => &HEALTH_IMAGES,
            BarKind::Coins => &COIN_IMAGES,
            BarKind::Bottles => &BOTTLE_IMAGES,
            BarKind::Boss => &BOSS_IMAGES,
        }
    }

    fn position(self) -> (f64, f64) {
        match self {
            BarKind::Health => (40.0, 0.0),
            BarKind::Coins => (40.0, 45.0),
            BarKind::Bottles => (40.0, 90.0),
            BarKind::Boss => (480.0, 0.0),
        }
    }

    fn initial_percentage(self) -> u32 {
        match self {
            BarKind::Health | BarKind::Boss => 100,
            BarKind::Coins | BarKind::Bottles => 0,
        }
    }
}

/// Sprite index for a percentage.  Anything below 20 falls into band 0.
pub fn band_for(percentage: u32) -> usize {
    match percentage {
        100.. => 5,
        80..=99 => 4,
        60..=79 => 3,
        40..=59 => 2,
        20..=39 => 1,
        _ => 0,
    }
}

/// Percentage shown for `count` items out of `capacity`.
pub fn percentage_of(count: u32, capacity: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    (count.min(capacity) * 100) / capacity
}

#[derive(Clone, Debug)]
pub struct StatusBar {
    pub kind: BarKind,
    pub sprite: Sprite,
    percentage: u32,
}

impl StatusBar {
    pub fn new(kind: BarKind) -> Self {
        let (x, y) = kind.position();
        let mut sprite = Sprite::new(x, y, 200.0, 60.0);
        sprite.load_images(kind.images());
        let mut bar = Self { kind, sprite, percentage: 0 };
        bar.set_percentage(kind.initial_percentage());
        bar
    }

    pub fn set_percentage(&mut self, percentage: u32) {
        self.percentage = percentage.min(100);
        let path = self.kind.images()[band_for(self.percentage)];
        self.sprite.img = self.sprite.image_cache.get(path).cloned();
    }

    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    pub fn band(&self) -> usize {
        band_for(self.percentage)
    }
}

impl Drawable for StatusBar {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}
