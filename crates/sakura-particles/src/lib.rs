//! Sakura Particles - CPU petal simulation
//!
//! Provides the simulation half of the effect:
//! - `Petal` kinematics with a pure respawn transition
//! - `PetalPool` with throttled resizing and pointer bursts
//! - `WindField` shared lateral force
//! - `Starfield` decorative background layer
//!
//! Nothing here draws; petals and stars are turned into plain instance data
//! for the renderer.

pub mod petal;
pub mod pool;
pub mod rand;
pub mod starfield;
pub mod wind;

use glam::Vec2;
use sakura_core::{EffectConfig, Viewport};

pub use petal::{Petal, PetalInstance, SpawnMode};
pub use pool::{PetalPool, BURST_COUNT, RESIZE_STEP};
pub use rand::ParticleRng;
pub use starfield::{Star, StarInstance, Starfield};
pub use wind::WindField;

/// Owns everything that moves: the pool, the wind and the RNG feeding both.
pub struct PetalSystem {
    pub pool: PetalPool,
    pub wind: WindField,
    pub starfield: Starfield,
    rng: ParticleRng,
}

impl PetalSystem {
    pub fn new(star_count: usize, mut rng: ParticleRng) -> Self {
        let wind = WindField::random(&mut rng);
        let starfield = Starfield::new(star_count, &mut rng);
        Self {
            pool: PetalPool::new(),
            wind,
            starfield,
            rng,
        }
    }

    pub fn resize_toward(&mut self, target: usize, config: &EffectConfig, viewport: &Viewport) -> isize {
        self.pool
            .resize_toward(target, config, viewport, &mut self.rng)
    }

    pub fn burst(&mut self, at: Vec2, config: &EffectConfig, viewport: &Viewport) {
        self.pool.burst(at, config, viewport, &mut self.rng);
    }

    pub fn shuffle_wind(&mut self) {
        self.wind.shuffle(&mut self.rng);
    }

    /// Update every petal against the wind at `t`, then order the pool
    /// far-to-near for drawing. Returns the number of recycled petals.
    pub fn simulate(&mut self, dt: f32, t: f32, config: &EffectConfig, viewport: &Viewport) -> usize {
        let wind = self.wind.wind_at(t, config);
        let respawned = self
            .pool
            .update(dt, wind, config, viewport, &mut self.rng);
        self.pool.sort_by_depth();
        respawned
    }
}
