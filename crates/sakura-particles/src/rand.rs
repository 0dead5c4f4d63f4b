//! Seedable PRNG shared by spawning, starfield layout and wind reseeding

use ::rand::rngs::SmallRng;
use ::rand::{Rng, SeedableRng};
use sakura_core::Span;

pub struct ParticleRng {
    inner: SmallRng,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the OS entropy source
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_entropy(),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Returns a float in [min, max); degenerate ranges return `min`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform sample from a configured span, tolerating reversed bounds
    pub fn span(&mut self, span: Span) -> f32 {
        span.lerp(self.next_f32())
    }

    /// +1.0 or -1.0 with equal probability
    pub fn sign(&mut self) -> f32 {
        if self.inner.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }
}
