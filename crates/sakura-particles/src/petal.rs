//! Petal state, its per-tick integration and the respawn transition

use crate::rand::ParticleRng;
use glam::Vec2;
use sakura_core::{EffectConfig, Span, Viewport};
use std::f32::consts::TAU;

/// Depth factor range; larger is farther away
pub const DEPTH: Span = Span::new(0.4, 1.6);
/// Base opacity range before depth attenuation
pub const OPACITY: Span = Span::new(0.55, 0.95);
/// Extra horizontal slack beyond the spawn padding before a petal is recycled
pub const SIDE_MARGIN: f32 = 100.0;
/// Smallest radius a petal is given, whatever the configured size range says
pub const MIN_SIZE: f32 = 1.0;
/// Largest radius a petal is given; also bounds the sprite cache key
pub const MAX_SIZE: f32 = 64.0;
/// Slowest base fall speed; anything lower would strand petals on screen
pub const MIN_BASE_FALL: f32 = 1.0;

const WIND_SCALE: f32 = 30.0;
const SWAY_SCALE: f32 = 0.02;
const ENTRY_STAGGER: f32 = 0.3;

/// Where a fresh petal is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMode {
    /// Anywhere in `[-height, height]`, for filling the screen at once
    Scatter,
    /// Just above the top edge, staggered so streams don't enter in lockstep
    Enter,
}

/// One falling petal
#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    /// Radius in logical pixels
    pub size: f32,
    /// Depth factor in [0.4, 1.6)
    pub z: f32,
    /// Centre in logical pixels; may leave the viewport while in transit
    pub position: Vec2,
    /// Sway frequency (Hz), signed
    pub sway: f32,
    /// Spin rate (rad/s), signed
    pub spin: f32,
    /// Rotation in radians
    pub angle: f32,
    /// Seconds since spawn
    pub age: f32,
    /// Unclamped; farther petals are fainter
    pub opacity: f32,
}

/// Everything the renderer needs to composite one petal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalInstance {
    pub position: Vec2,
    pub size: f32,
    pub z: f32,
    /// Flutter scale derived from the rotation angle
    pub scale: f32,
    /// Opacity clamped to [0, 1]
    pub alpha: f32,
}

impl Petal {
    /// Draw a completely fresh petal.
    pub fn spawn(
        mode: SpawnMode,
        config: &EffectConfig,
        viewport: &Viewport,
        rng: &mut ParticleRng,
    ) -> Self {
        let size = rng.span(config.size).clamp(MIN_SIZE, MAX_SIZE);
        let z = rng.span(DEPTH);
        let padding = config.spawn_padding;
        let width = viewport.width_f32();
        let height = viewport.height_f32();

        let x = rng.range(-padding, width + padding);
        let y = match mode {
            SpawnMode::Scatter => rng.range(-height, height),
            SpawnMode::Enter => -padding - rng.range(0.0, height * ENTRY_STAGGER),
        };

        let sway = rng.span(config.sway_freq) * rng.sign();
        let spin = rng.span(config.spin) * rng.sign();
        let angle = rng.range(0.0, TAU);
        let opacity = rng.span(OPACITY) / z;

        Self {
            size,
            z,
            position: Vec2::new(x, y),
            sway,
            spin,
            angle,
            age: 0.0,
            opacity,
        }
    }

    /// Integrate one step given this tick's global wind sample.
    ///
    /// Returns the moved petal without any bounds handling.
    pub fn advance(&self, dt: f32, wind: f32, config: &EffectConfig) -> Self {
        let age = self.age + dt;
        let w = wind * (0.8 + 0.4 / self.z);
        let base_fall = config.base_fall.max(MIN_BASE_FALL);
        let fall = base_fall * (0.8 + 0.6 / self.z) * (0.6 + self.size / 28.0);
        let sway_offset = (age * self.sway * TAU).sin() * (6.0 + self.size * 0.6);

        let velocity = Vec2::new(w * WIND_SCALE + sway_offset * SWAY_SCALE, fall);
        Self {
            position: self.position + velocity * dt,
            angle: self.angle + self.spin * dt,
            age,
            ..self.clone()
        }
    }

    /// True once the petal has fully dropped below the bottom edge or drifted
    /// past either side margin.
    pub fn is_out_of_bounds(&self, config: &EffectConfig, viewport: &Viewport) -> bool {
        let padding = config.spawn_padding;
        let below = self.position.y - self.size > viewport.height_f32() + padding;
        let left = self.position.x < -padding - SIDE_MARGIN;
        let right = self.position.x > viewport.width_f32() + padding + SIDE_MARGIN;
        below || left || right
    }

    /// Advance in place, recycling into an entering petal on exit.
    ///
    /// Returns `true` when the petal was respawned this tick.
    pub fn update(
        &mut self,
        dt: f32,
        wind: f32,
        config: &EffectConfig,
        viewport: &Viewport,
        rng: &mut ParticleRng,
    ) -> bool {
        let next = self.advance(dt, wind, config);
        if next.is_out_of_bounds(config, viewport) {
            *self = Petal::spawn(SpawnMode::Enter, config, viewport, rng);
            true
        } else {
            *self = next;
            false
        }
    }

    /// Subtle pulse that makes the flat sprite read as a tumbling petal
    pub fn flutter_scale(&self) -> f32 {
        0.9 + (self.angle * 1.7).sin() * 0.12
    }

    pub fn instance(&self) -> PetalInstance {
        PetalInstance {
            position: self.position,
            size: self.size,
            z: self.z,
            scale: self.flutter_scale(),
            alpha: self.opacity.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::from_window(800.0, 600.0, 1.0)
    }

    #[test]
    fn scatter_spawn_fills_viewport_height() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(1);
        for _ in 0..1000 {
            let p = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
            assert!(p.position.y >= -600.0 && p.position.y <= 600.0);
            assert!(p.position.x >= -40.0 && p.position.x <= 840.0);
            assert!(DEPTH.contains(p.z));
            assert!(config.size.contains(p.size));
            assert_eq!(p.age, 0.0);
        }
    }

    #[test]
    fn oversized_config_is_clamped_on_spawn() {
        let config = EffectConfig {
            size: Span::new(1e9, 1e9),
            ..Default::default()
        };
        let mut rng = ParticleRng::new(4);
        let p = Petal::spawn(SpawnMode::Scatter, &config, &viewport(), &mut rng);
        assert_eq!(p.size, MAX_SIZE);

        let config = EffectConfig {
            size: Span::new(-5.0, 0.0),
            ..Default::default()
        };
        let p = Petal::spawn(SpawnMode::Enter, &config, &viewport(), &mut rng);
        assert_eq!(p.size, MIN_SIZE);
    }

    #[test]
    fn non_positive_base_fall_still_falls() {
        let vp = viewport();
        let mut rng = ParticleRng::new(5);
        for base_fall in [0.0, -50.0] {
            let config = EffectConfig {
                base_fall,
                wind: 0.0,
                gustiness: 0.0,
                ..Default::default()
            };
            let petal = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
            let next = petal.advance(0.05, 0.0, &config);
            assert!(next.position.y > petal.position.y);
        }
    }

    #[test]
    fn entering_spawn_starts_above_padding() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(2);
        for _ in 0..1000 {
            let p = Petal::spawn(SpawnMode::Enter, &config, &vp, &mut rng);
            assert!(p.position.y <= -config.spawn_padding);
            assert!(p.position.y >= -config.spawn_padding - 600.0 * 0.3);
        }
    }

    #[test]
    fn opacity_is_attenuated_by_depth() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(3);
        for _ in 0..500 {
            let p = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
            let base = p.opacity * p.z;
            assert!(base >= 0.55 - 1e-4 && base <= 0.95 + 1e-4);
            let alpha = p.instance().alpha;
            assert!((0.0..=1.0).contains(&alpha));
        }
    }

    #[test]
    fn sway_and_spin_take_both_signs() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(4);
        let petals: Vec<Petal> = (0..200)
            .map(|_| Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng))
            .collect();
        assert!(petals.iter().any(|p| p.sway > 0.0));
        assert!(petals.iter().any(|p| p.sway < 0.0));
        assert!(petals.iter().any(|p| p.spin > 0.0));
        assert!(petals.iter().any(|p| p.spin < 0.0));
        for p in &petals {
            assert!(config.sway_freq.contains(p.sway.abs()));
            assert!(config.spin.contains(p.spin.abs()));
        }
    }

    #[test]
    fn advance_moves_down_and_with_wind() {
        let config = EffectConfig::default();
        let petal = Petal {
            size: 14.0,
            z: 1.0,
            position: Vec2::new(100.0, 100.0),
            sway: 1.0,
            spin: 0.5,
            angle: 0.0,
            age: 0.0,
            opacity: 0.8,
        };
        let next = petal.advance(0.05, 2.0, &config);
        // fall = 24 * 1.4 * (0.6 + 0.5) = 36.96 px/s
        assert!((next.position.y - (100.0 + 36.96 * 0.05)).abs() < 1e-3);
        assert!(next.position.x > petal.position.x);
        assert!((next.angle - 0.025).abs() < 1e-6);
        assert!((next.age - 0.05).abs() < 1e-6);
        // the input petal is untouched
        assert_eq!(petal.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn bigger_petals_fall_faster() {
        let config = EffectConfig::default();
        let make = |size| Petal {
            size,
            z: 1.0,
            position: Vec2::ZERO,
            sway: 0.0,
            spin: 0.0,
            angle: 0.0,
            age: 0.0,
            opacity: 1.0,
        };
        let small = make(8.0).advance(0.05, 0.0, &config);
        let big = make(26.0).advance(0.05, 0.0, &config);
        assert!(big.position.y > small.position.y);
    }

    #[test]
    fn nearer_petals_react_more_to_wind() {
        let config = EffectConfig::default();
        let make = |z| Petal {
            size: 10.0,
            z,
            position: Vec2::ZERO,
            sway: 0.0,
            spin: 0.0,
            angle: 0.0,
            age: 0.0,
            opacity: 1.0,
        };
        let near = make(0.4).advance(0.05, 1.0, &config);
        let far = make(1.6).advance(0.05, 1.0, &config);
        assert!(near.position.x > far.position.x);
    }

    #[test]
    fn exit_below_respawns_same_tick() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(5);
        let mut petal = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
        petal.position = Vec2::new(400.0, 600.0 + 40.0 + petal.size - 0.01);

        let respawned = petal.update(0.05, 0.0, &config, &vp, &mut rng);
        assert!(respawned);
        assert!(petal.position.y <= -config.spawn_padding);
        assert!(petal.position.y < vp.height_f32() + config.spawn_padding);
        assert_eq!(petal.age, 0.0);
    }

    #[test]
    fn exit_sideways_respawns() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(6);
        let mut petal = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
        petal.position = Vec2::new(800.0 + 40.0 + 100.0 + 1.0, 10.0);
        assert!(petal.is_out_of_bounds(&config, &vp));
        assert!(petal.update(0.0, 0.0, &config, &vp, &mut rng));

        petal.position = Vec2::new(-40.0 - 100.0 - 1.0, 10.0);
        assert!(petal.is_out_of_bounds(&config, &vp));

        petal.position = Vec2::new(-139.0, 10.0);
        assert!(!petal.is_out_of_bounds(&config, &vp));
    }

    #[test]
    fn in_bounds_update_keeps_identity() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(7);
        let mut petal = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
        petal.position = Vec2::new(400.0, 100.0);
        let size = petal.size;
        assert!(!petal.update(0.016, 1.0, &config, &vp, &mut rng));
        assert_eq!(petal.size, size);
        assert!(petal.age > 0.0);
    }

    #[test]
    fn flutter_scale_bounds() {
        let config = EffectConfig::default();
        let vp = viewport();
        let mut rng = ParticleRng::new(8);
        for _ in 0..200 {
            let p = Petal::spawn(SpawnMode::Scatter, &config, &vp, &mut rng);
            let s = p.flutter_scale();
            assert!((0.78 - 1e-4..=1.02 + 1e-4).contains(&s));
        }
    }
}
