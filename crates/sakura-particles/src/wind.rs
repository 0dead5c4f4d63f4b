//! Global lateral wind field

use crate::rand::ParticleRng;
use sakura_core::EffectConfig;

/// Seeds are drawn from [0, SEED_RANGE)
pub const SEED_RANGE: f32 = 1000.0;

const SLOW_FREQ: f32 = 0.07;
const SLOW_AMPLITUDE: f32 = 0.6;
const MEDIUM_FREQ: f32 = 0.23;
const MEDIUM_AMPLITUDE: f32 = 0.4;
const MEDIUM_PHASE_SCALE: f32 = 1.7;

/// Two phase-shifted sines around the configured base wind.
///
/// The seed only shifts phase, so every seed gives an equally smooth field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindField {
    seed: f32,
}

impl WindField {
    pub fn new(seed: f32) -> Self {
        Self { seed }
    }

    pub fn random(rng: &mut ParticleRng) -> Self {
        Self::new(rng.range(0.0, SEED_RANGE))
    }

    pub fn seed(&self) -> f32 {
        self.seed
    }

    /// Draw a fresh phase offset. Petals keep their state.
    pub fn shuffle(&mut self, rng: &mut ParticleRng) {
        self.seed = rng.range(0.0, SEED_RANGE);
        tracing::info!(seed = self.seed, "wind reseeded");
    }

    /// Wind strength at simulated time `t` (seconds).
    ///
    /// Stays within `config.wind ± |config.gustiness|`.
    pub fn wind_at(&self, t: f32, config: &EffectConfig) -> f32 {
        let slow = (t * SLOW_FREQ + self.seed).sin() * SLOW_AMPLITUDE;
        let medium = (t * MEDIUM_FREQ + self.seed * MEDIUM_PHASE_SCALE).sin() * MEDIUM_AMPLITUDE;
        config.wind + (slow + medium) * config.gustiness
    }
}
