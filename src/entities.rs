//! Base drawable/positionable unit shared by every game object.
//!
//! A [`Sprite`] is pure geometry plus image state: no physics, no health.
//! Capabilities are layered on top through the traits in `physics`,
//! `combat` and `animation`.

use std::collections::HashMap;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Per-side shrinkage turning a sprite's visual box into its hit-box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Offset {
    pub const NONE: Offset = Offset { top: 0.0, left: 0.0, right: 0.0, bottom: 0.0 };

    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self { top, left, right, bottom }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }
}

// ── Images ────────────────────────────────────────────────────────────────────

/// Opaque reference to an image resource, identified by its asset path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(&'static str);

impl ImageHandle {
    pub fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &'static str {
        self.0
    }
}

/// Image-key → image resource map owned by each entity.
#[derive(Clone, Debug, Default)]
pub struct ImageCache {
    images: HashMap<&'static str, ImageHandle>,
}

impl ImageCache {
    pub fn insert(&mut self, path: &'static str) {
        self.images.insert(path, ImageHandle::new(path));
    }

    pub fn get(&self, path: &str) -> Option<&ImageHandle> {
        self.images.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.images.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

// ── Sprite ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub offset: Offset,
    /// Facing backwards; the renderer mirrors the image.
    pub other_direction: bool,
    pub img: Option<ImageHandle>,
    pub image_cache: ImageCache,
    /// Animation cursor, only ever incremented.
    pub current_image: usize,
}

impl Sprite {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            offset: Offset::NONE,
            other_direction: false,
            img: None,
            image_cache: ImageCache::default(),
            current_image: 0,
        }
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_image(mut self, path: &'static str) -> Self {
        self.load_image(path);
        self
    }

    /// Show a single image immediately.
    pub fn load_image(&mut self, path: &'static str) {
        self.img = Some(ImageHandle::new(path));
    }

    /// Register a sequence in the cache without showing it.
    pub fn load_images(&mut self, paths: &[&'static str]) {
        for &path in paths {
            self.image_cache.insert(path);
        }
    }

    /// The visual box.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The visual box narrowed by `offset`.
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x + self.offset.left,
            self.y + self.offset.top,
            self.width - self.offset.left - self.offset.right,
            self.height - self.offset.top - self.offset.bottom,
        )
    }

    pub fn image_path(&self) -> Option<&'static str> {
        self.img.as_ref().map(ImageHandle::path)
    }
}

/// Anything that has a sprite and can be put on screen.
pub trait Drawable {
    fn sprite(&self) -> &Sprite;
    fn sprite_mut(&mut self) -> &mut Sprite;
}

impl Drawable for Sprite {
    fn sprite(&self) -> &Sprite {
        self
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        self
    }
}
