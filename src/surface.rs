//! Immediate-mode drawing target for the render pass.

use crate::entities::{Drawable, ImageHandle, Rect};

pub trait Surface {
    fn clear(&mut self);
    /// Shift everything drawn afterwards horizontally by `dx` pixels.
    fn translate(&mut self, dx: f64);
    fn draw_image(&mut self, image: &ImageHandle, dest: Rect, mirrored: bool);
}

/// Draw one entity at its visual box, mirrored when facing backwards.
pub fn add_to_map(surface: &mut dyn Surface, object: &impl Drawable) {
    let sprite = object.sprite();
    if let Some(image) = &sprite.img {
        surface.draw_image(image, sprite.bounds(), sprite.other_direction);
    }
}

pub fn add_objects_to_map<'a, D, I>(surface: &mut dyn Surface, objects: I)
where
    D: Drawable + 'a,
    I: IntoIterator<Item = &'a D>,
{
    for object in objects {
        add_to_map(surface, object);
    }
}
