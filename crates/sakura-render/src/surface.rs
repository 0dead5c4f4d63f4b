//! The drawing contract the effect renders against

use crate::sprite::Sprite;
use glam::Vec2;
use sakura_core::{Color, Result, Viewport};

/// Axis-aligned rectangle in logical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A 2D raster target. All coordinates are logical; implementations apply
/// the device pixel ratio themselves.
pub trait Surface {
    /// Reallocate the backing store for `viewport` and reapply the scale
    /// transform. Calling it twice with the same viewport is a no-op.
    fn resize(&mut self, viewport: &Viewport) -> Result<()>;

    fn viewport(&self) -> Viewport;

    /// Reset every pixel to fully transparent
    fn clear(&mut self);

    /// Filled circle; `color.a` is the global alpha
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Composite `sprite` scaled into `dest` with `alpha` in [0, 1]
    fn draw_sprite(&mut self, sprite: &Sprite, dest: Rect, alpha: f32);
}
