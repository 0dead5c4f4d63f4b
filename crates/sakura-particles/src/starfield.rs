//! Twinkling background stars

use crate::rand::ParticleRng;
use glam::Vec2;
use sakura_core::Viewport;
use std::f32::consts::TAU;

/// Stars only occupy the upper part of the sky
const SKY_FRACTION: f32 = 0.8;
const BASE_ALPHA: f32 = 0.25;
const TWINKLE_RATE: f32 = 1.3;

/// A fixed star, positioned in fractions of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub phase: f32,
}

/// Screen-space circle for one star on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarInstance {
    pub position: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Star {
    pub fn random(rng: &mut ParticleRng) -> Self {
        Self {
            x: rng.next_f32(),
            y: rng.next_f32(),
            radius: rng.next_f32() * 1.2 + 0.2,
            phase: rng.next_f32() * TAU,
        }
    }

    /// Brightness multiplier in [0.2, 1.0]
    pub fn twinkle(&self, t: f32) -> f32 {
        0.6 + (t * TWINKLE_RATE + self.phase).sin() * 0.4
    }

    pub fn instance(&self, t: f32, viewport: &Viewport) -> StarInstance {
        StarInstance {
            position: Vec2::new(
                self.x * viewport.width_f32(),
                self.y * viewport.height_f32() * SKY_FRACTION,
            ),
            radius: self.radius,
            alpha: BASE_ALPHA * self.twinkle(t),
        }
    }
}

/// The star layer. Stars never change after creation; only their brightness
/// depends on time.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut ParticleRng) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(rng)).collect(),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Star circles for time `t` (seconds)
    pub fn instances<'a>(
        &'a self,
        t: f32,
        viewport: &'a Viewport,
    ) -> impl Iterator<Item = StarInstance> + 'a {
        self.stars.iter().map(move |s| s.instance(t, viewport))
    }
}
