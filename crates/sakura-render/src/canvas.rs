//! CPU raster surface backed by a premultiplied float buffer

use crate::sprite::Sprite;
use crate::surface::{Rect, Surface};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use sakura_core::{Color, Result, SakuraError, Viewport};

/// Largest backing store side we'll try to allocate
pub const MAX_SIDE: u32 = 16_384;

/// Software canvas. Logical coordinates are multiplied by the device pixel
/// ratio on the way in, mirroring a `setTransform(dpr, 0, 0, dpr, 0, 0)`.
pub struct Canvas {
    viewport: Viewport,
    width: u32,
    height: u32,
    /// Premultiplied RGBA, row-major
    pixels: Vec<[f32; 4]>,
}

impl Canvas {
    pub fn new(viewport: &Viewport) -> Result<Self> {
        let mut canvas = Self {
            viewport: *viewport,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        canvas.allocate(viewport)?;
        Ok(canvas)
    }

    /// Backing store width in device pixels
    pub fn pixel_width(&self) -> u32 {
        self.width
    }

    /// Backing store height in device pixels
    pub fn pixel_height(&self) -> u32 {
        self.height
    }

    fn scale(&self) -> f32 {
        self.viewport.device_pixel_ratio
    }

    fn allocate(&mut self, viewport: &Viewport) -> Result<()> {
        let width = viewport.pixel_width();
        let height = viewport.pixel_height();
        let alloc_err = SakuraError::SurfaceAllocation { width, height };
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(alloc_err);
        }
        let len = width as usize * height as usize;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| alloc_err)?;
        pixels.resize(len, [0.0; 4]);

        self.pixels = pixels;
        self.width = width;
        self.height = height;
        self.viewport = *viewport;
        Ok(())
    }

    /// Premultiplied pixel at device coordinates
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Source-over blend of a premultiplied colour
    fn blend(&mut self, x: u32, y: u32, src: [f32; 4]) {
        if src[3] <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) as usize;
        let dst = &mut self.pixels[idx];
        let inv = 1.0 - src[3];
        for i in 0..4 {
            dst[i] = src[i] + dst[i] * inv;
        }
    }

    /// Device-pixel span covering `[lo, hi)` clipped to `limit`
    fn clip_span(lo: f32, hi: f32, limit: u32) -> Option<(u32, u32)> {
        let start = lo.floor().max(0.0);
        let end = hi.ceil().min(limit as f32);
        if start >= end {
            return None;
        }
        Some((start as u32, end as u32))
    }

    /// Flatten onto `background` and convert to straight-alpha 8-bit
    pub fn to_rgba_image(&self, background: Option<Color>) -> RgbaImage {
        let bg = background.map(|c| {
            let a = c.a.clamp(0.0, 1.0);
            [c.r * a, c.g * a, c.b * a, a]
        });
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let mut p = self.pixels[(y * self.width + x) as usize];
            if let Some(bg) = bg {
                let inv = 1.0 - p[3];
                for i in 0..4 {
                    p[i] += bg[i] * inv;
                }
            }
            let a = p[3].clamp(0.0, 1.0);
            if a <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let q = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgba([q(p[0]), q(p[1]), q(p[2]), (a * 255.0).round() as u8])
        })
    }
}

impl Surface for Canvas {
    fn resize(&mut self, viewport: &Viewport) -> Result<()> {
        if *viewport == self.viewport && !self.pixels.is_empty() {
            return Ok(());
        }
        self.allocate(viewport)?;
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            dpr = viewport.device_pixel_ratio,
            "canvas resized"
        );
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let scale = self.scale();
        let c = center * scale;
        let r = radius * scale;
        if r <= 0.0 || color.a <= 0.0 {
            return;
        }
        let Some((x0, x1)) = Self::clip_span(c.x - r - 1.0, c.x + r + 1.0, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::clip_span(c.y - r - 1.0, c.y + r + 1.0, self.height) else {
            return;
        };

        let alpha = color.a.clamp(0.0, 1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(c);
                // sub-pixel circles fade instead of vanishing
                let coverage = (r - d + 0.5).clamp(0.0, 1.0).min(r * 2.0);
                let a = alpha * coverage;
                self.blend(x, y, [color.r * a, color.g * a, color.b * a, a]);
            }
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, dest: Rect, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let scale = self.scale();
        let dx = dest.x * scale;
        let dy = dest.y * scale;
        let dw = dest.width * scale;
        let dh = dest.height * scale;
        let Some((x0, x1)) = Self::clip_span(dx, dx + dw, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::clip_span(dy, dy + dh, self.height) else {
            return;
        };

        let sx = sprite.width() as f32 / dw;
        let sy = sprite.height() as f32 / dh;
        for y in y0..y1 {
            let v = (y as f32 + 0.5 - dy) * sy;
            for x in x0..x1 {
                let u = (x as f32 + 0.5 - dx) * sx;
                let t = sprite.sample(u, v);
                self.blend(x, y, [t[0] * alpha, t[1] * alpha, t[2] * alpha, t[3] * alpha]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: f64, h: f64, dpr: f64) -> Canvas {
        Canvas::new(&Viewport::from_window(w, h, dpr)).unwrap()
    }

    #[test]
    fn backing_store_follows_pixel_ratio() {
        let mut c = canvas(100.0, 50.0, 2.0);
        assert_eq!((c.pixel_width(), c.pixel_height()), (200, 100));

        c.resize(&Viewport::from_window(30.0, 20.0, 1.0)).unwrap();
        assert_eq!((c.pixel_width(), c.pixel_height()), (30, 20));
        assert_eq!(c.viewport().width, 30);
    }

    #[test]
    fn oversized_surface_fails() {
        let err = Canvas::new(&Viewport::from_window(20_000.0, 10.0, 1.0))
            .err()
            .unwrap();
        assert!(matches!(err, SakuraError::SurfaceAllocation { .. }));
    }

    #[test]
    fn circle_uses_logical_coordinates() {
        let mut c = canvas(20.0, 20.0, 2.0);
        c.fill_circle(Vec2::new(10.0, 10.0), 2.0, Color::WHITE.with_alpha(0.5));
        // logical (10, 10) is device (20, 20)
        let centre = c.pixel(20, 20).unwrap();
        assert!((centre[3] - 0.5).abs() < 1e-5);
        assert_eq!(c.pixel(2, 2).unwrap(), [0.0; 4]);
    }

    #[test]
    fn clear_resets_pixels() {
        let mut c = canvas(8.0, 8.0, 1.0);
        c.fill_circle(Vec2::new(4.0, 4.0), 3.0, Color::WHITE);
        assert!(c.pixel(4, 4).unwrap()[3] > 0.0);
        c.clear();
        assert_eq!(c.pixel(4, 4).unwrap(), [0.0; 4]);
    }

    #[test]
    fn sprite_composites_with_alpha() {
        let mut c = canvas(4.0, 4.0, 1.0);
        let sprite = Sprite::from_image(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
        c.draw_sprite(&sprite, Rect::new(0.0, 0.0, 4.0, 4.0), 0.5);
        let p = c.pixel(1, 1).unwrap();
        assert!((p[0] - 0.5).abs() < 1e-5);
        assert!((p[3] - 0.5).abs() < 1e-5);

        // a second opaque layer covers the first
        c.draw_sprite(&sprite, Rect::new(0.0, 0.0, 4.0, 4.0), 1.0);
        assert!((c.pixel(1, 1).unwrap()[3] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn offscreen_draws_are_clipped() {
        let mut c = canvas(4.0, 4.0, 1.0);
        let sprite = Sprite::from_image(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
        c.draw_sprite(&sprite, Rect::new(-50.0, -50.0, 10.0, 10.0), 1.0);
        c.fill_circle(Vec2::new(100.0, 100.0), 5.0, Color::WHITE);
        assert!(c.pixels.iter().all(|p| p[3] == 0.0));
    }

    #[test]
    fn export_flattens_over_background() {
        let c = canvas(2.0, 2.0, 1.0);
        let img = c.to_rgba_image(Some(Color::from_hex(0x0b1026)));
        assert_eq!(img.get_pixel(0, 0).0, [0x0b, 0x10, 0x26, 255]);
        let img = c.to_rgba_image(None);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
