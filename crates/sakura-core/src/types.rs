//! Common value types

use serde::{Deserialize, Serialize};

/// Device pixel ratios outside this range are clamped
pub const MIN_DEVICE_PIXEL_RATIO: f32 = 1.0;
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;

/// A closed numeric range `[min, max]` read from configuration.
///
/// Input is never trusted to be ordered; consumers go through
/// [`Span::normalized`] so a reversed range behaves like its sorted form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The same range with `min <= max`
    pub fn normalized(&self) -> Self {
        if self.min <= self.max {
            *self
        } else {
            Self {
                min: self.max,
                max: self.min,
            }
        }
    }

    /// Linear position inside the normalized range, `t` in [0, 1]
    pub fn lerp(&self, t: f32) -> f32 {
        let s = self.normalized();
        s.min + (s.max - s.min) * t
    }

    pub fn contains(&self, value: f32) -> bool {
        let s = self.normalized();
        value >= s.min && value <= s.max
    }
}

/// Logical drawing area plus the device pixel ratio used for the backing store
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical width in CSS-style pixels
    pub width: u32,
    /// Logical height in CSS-style pixels
    pub height: u32,
    /// Clamped to [1, 2]
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Build a viewport from raw window metrics.
    ///
    /// Sizes are floored to whole pixels; negative or NaN input becomes 0 and
    /// a missing or odd pixel ratio becomes 1.
    pub fn from_window(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio.is_finite() {
            device_pixel_ratio as f32
        } else {
            MIN_DEVICE_PIXEL_RATIO
        };
        Self {
            width: floor_px(width),
            height: floor_px(height),
            device_pixel_ratio: dpr.clamp(MIN_DEVICE_PIXEL_RATIO, MAX_DEVICE_PIXEL_RATIO),
        }
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Backing store width in device pixels
    pub fn pixel_width(&self) -> u32 {
        (self.width as f32 * self.device_pixel_ratio).floor() as u32
    }

    /// Backing store height in device pixels
    pub fn pixel_height(&self) -> u32 {
        (self.height as f32 * self.device_pixel_ratio).floor() as u32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_window(1280.0, 720.0, 1.0)
    }
}

fn floor_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
