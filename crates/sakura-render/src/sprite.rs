//! Immutable pre-rendered images

use image::RgbaImage;
use sakura_particles::petal::MAX_SIZE;

/// Integer cache key for a petal radius.
///
/// Radii are rounded to whole pixels so float noise never splits the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SizeClass(pub u32);

impl SizeClass {
    /// Largest class; keeps sprite sides small enough to render
    pub const MAX: SizeClass = SizeClass(MAX_SIZE as u32);

    /// Round a radius to its class, clamped to [1, `MAX`]; NaN becomes 1
    pub fn from_size(size: f32) -> Self {
        let rounded = size.round();
        if rounded.is_nan() || rounded < 1.0 {
            Self(1)
        } else {
            Self(rounded.min(MAX_SIZE) as u32)
        }
    }

    pub fn radius(&self) -> f32 {
        self.0 as f32
    }
}

/// Straight-alpha RGBA image
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Premultiplied texel in [0, 1]; transparent outside the image
    pub fn texel(&self, x: i64, y: i64) -> [f32; 4] {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return [0.0; 4];
        }
        let p = self.image.get_pixel(x as u32, y as u32).0;
        let a = p[3] as f32 / 255.0;
        [
            p[0] as f32 / 255.0 * a,
            p[1] as f32 / 255.0 * a,
            p[2] as f32 / 255.0 * a,
            a,
        ]
    }

    /// Bilinear sample at sprite-space coordinates (texel centres at +0.5)
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let fx = u - 0.5;
        let fy = v - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let a = self.texel(x0, y0);
        let b = self.texel(x0 + 1, y0);
        let c = self.texel(x0, y0 + 1);
        let d = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0; 4];
        for i in 0..4 {
            let top = a[i] + (b[i] - a[i]) * tx;
            let bottom = c[i] + (d[i] - c[i]) * tx;
            out[i] = top + (bottom - top) * ty;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn size_class_rounds() {
        assert_eq!(SizeClass::from_size(12.4), SizeClass(12));
        assert_eq!(SizeClass::from_size(12.5), SizeClass(13));
        assert_eq!(SizeClass::from_size(0.2), SizeClass(1));
        assert_eq!(SizeClass::from_size(-4.0), SizeClass(1));
        assert_eq!(SizeClass::from_size(f32::NAN), SizeClass(1));
    }

    #[test]
    fn size_class_is_capped() {
        assert_eq!(SizeClass::from_size(1e9), SizeClass::MAX);
        assert_eq!(SizeClass::from_size(f32::INFINITY), SizeClass::MAX);
        assert_eq!(SizeClass::from_size(MAX_SIZE - 0.2), SizeClass::MAX);
    }

    #[test]
    fn texel_is_premultiplied() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 51]));
        let sprite = Sprite::from_image(image);
        let t = sprite.texel(1, 1);
        assert!((t[0] - 0.2).abs() < 1e-6);
        assert!((t[3] - 0.2).abs() < 1e-6);
        assert_eq!(sprite.texel(2, 0), [0.0; 4]);
        assert_eq!(sprite.texel(-1, 0), [0.0; 4]);
    }

    #[test]
    fn sample_at_texel_centre_is_exact() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        let sprite = Sprite::from_image(image);
        assert_eq!(sprite.sample(0.5, 0.5), [1.0, 1.0, 1.0, 1.0]);
        let mid = sprite.sample(1.0, 0.5);
        assert!((mid[3] - 0.5).abs() < 1e-6);
    }
}
