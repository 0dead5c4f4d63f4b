//! Procedural petal sprite: teardrop outline, radial gradient fill and a soft
//! drop shadow

use crate::sprite::{SizeClass, Sprite};
use glam::Vec2;
use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use sakura_core::Color;

/// Gradient stops from the light centre to the saturated rim
const GRADIENT_STOPS: [(f32, u32); 3] = [(0.0, 0xffe1ef), (0.45, 0xffc1dc), (1.0, 0xff8dbf)];
const SHADOW_ALPHA: f32 = 0.25;
const SHADOW_BLUR: f32 = 0.35;
const SHADOW_OFFSET_Y: f32 = 0.15;
/// Line segments per Bézier curve when flattening the outline
const CURVE_STEPS: usize = 24;
/// Supersampling grid per axis for edge coverage
const SUPERSAMPLE: usize = 4;

/// Side length of the square sprite for a size class.
///
/// Three radii of canvas plus `2 + r` padding on each side keeps the shadow
/// from clipping. Classes above [`SizeClass::MAX`] are treated as `MAX`.
pub fn sprite_side(class: SizeClass) -> u32 {
    let k = class.min(SizeClass::MAX).0;
    k * 3 + (2 + k) * 2
}

/// Closed outline in petal space (origin at the sprite centre, +y down)
pub fn petal_outline(r: f32) -> Vec<Vec2> {
    let start = Vec2::new(0.0, -r * 0.2);
    let tip = Vec2::new(0.0, r);
    let mut points = Vec::with_capacity(CURVE_STEPS * 2 + 1);
    points.push(start);
    flatten_cubic(
        &mut points,
        start,
        Vec2::new(r * 0.8, -r * 0.9),
        Vec2::new(r * 0.9, r * 0.3),
        tip,
    );
    flatten_cubic(
        &mut points,
        tip,
        Vec2::new(-r * 0.9, r * 0.3),
        Vec2::new(-r * 0.8, -r * 0.9),
        start,
    );
    // last point duplicates the first; the polygon closes implicitly
    points.pop();
    points
}

fn flatten_cubic(out: &mut Vec<Vec2>, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) {
    for i in 1..=CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        let mt = 1.0 - t;
        let p = p0 * (mt * mt * mt)
            + p1 * (3.0 * mt * mt * t)
            + p2 * (3.0 * mt * t * t)
            + p3 * (t * t * t);
        out.push(p);
    }
}

/// Even-odd point-in-polygon test
fn inside(polygon: &[Vec2], p: Vec2) -> bool {
    let mut hit = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                hit = !hit;
            }
        }
        j = i;
    }
    hit
}

/// Gradient parameter for a two-circle radial gradient, clamped to [0, 1].
///
/// Finds the largest `t` with `|p - c(t)| = r(t)` and `r(t) >= 0`, where the
/// circles interpolate from (`c0`, `r0`) to (`c1`, `r1`).
fn radial_t(p: Vec2, c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> f32 {
    let dc = c1 - c0;
    let dr = r1 - r0;
    let q = p - c0;
    let a = dc.dot(dc) - dr * dr;
    let b = q.dot(dc) + r0 * dr;
    let c = q.dot(q) - r0 * r0;

    let t = if a.abs() < 1e-6 {
        if b.abs() < 1e-6 {
            return 0.0;
        }
        c / (2.0 * b)
    } else {
        let disc = b * b - a * c;
        if disc < 0.0 {
            return 0.0;
        }
        let root = disc.sqrt();
        let t1 = (b + root) / a;
        let t2 = (b - root) / a;
        let valid = |t: f32| r0 + t * dr >= 0.0;
        match (valid(t1), valid(t2)) {
            (true, true) => t1.max(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return 0.0,
        }
    };
    t.clamp(0.0, 1.0)
}

fn gradient_color(t: f32) -> Color {
    let mut prev = GRADIENT_STOPS[0];
    for stop in GRADIENT_STOPS.iter().skip(1) {
        if t < stop.0 {
            let local = (t - prev.0) / (stop.0 - prev.0);
            return Color::from_hex(prev.1).lerp(&Color::from_hex(stop.1), local);
        }
        prev = *stop;
    }
    Color::from_hex(prev.1)
}

/// Fractional coverage of the petal shape per pixel, as an 8-bit mask
fn coverage_mask(side: u32, outline: &[Vec2], offset: Vec2) -> GrayImage {
    let centre = Vec2::splat(side as f32 / 2.0) + offset;
    let samples = (SUPERSAMPLE * SUPERSAMPLE) as f32;
    GrayImage::from_fn(side, side, |x, y| {
        let mut hits = 0usize;
        for sy in 0..SUPERSAMPLE {
            for sx in 0..SUPERSAMPLE {
                let p = Vec2::new(
                    x as f32 + (sx as f32 + 0.5) / SUPERSAMPLE as f32,
                    y as f32 + (sy as f32 + 0.5) / SUPERSAMPLE as f32,
                ) - centre;
                if inside(outline, p) {
                    hits += 1;
                }
            }
        }
        Luma([((hits as f32 / samples) * 255.0).round() as u8])
    })
}

/// Render the petal sprite for one size class
pub fn render_petal(class: SizeClass) -> Sprite {
    let class = class.min(SizeClass::MAX);
    let r = class.radius();
    let side = sprite_side(class);
    let outline = petal_outline(r);

    let fill = coverage_mask(side, &outline, Vec2::ZERO);
    let shadow_src = coverage_mask(side, &outline, Vec2::new(0.0, r * SHADOW_OFFSET_Y));
    // shadow blur radius maps to a gaussian sigma of half its value
    let shadow = imageops::blur(&shadow_src, r * SHADOW_BLUR / 2.0);

    let centre = Vec2::splat(side as f32 / 2.0);
    let inner = Vec2::new(0.0, r * 0.2);
    let image = RgbaImage::from_fn(side, side, |x, y| {
        let fill_a = fill.get_pixel(x, y).0[0] as f32 / 255.0;
        let shadow_a = shadow.get_pixel(x, y).0[0] as f32 / 255.0 * SHADOW_ALPHA;

        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - centre;
        let color = gradient_color(radial_t(p, inner, r * 0.2, Vec2::ZERO, r * 1.2));

        // shape over its (black) shadow
        let a = fill_a + shadow_a * (1.0 - fill_a);
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = Color::new(
            color.r * fill_a / a,
            color.g * fill_a / a,
            color.b * fill_a / a,
            a,
        );
        Rgba(straight.to_rgba8())
    });

    tracing::debug!(size_class = class.0, side, "rendered petal sprite");
    Sprite::from_image(image)
}
