//! User-adjustable state: the effect configuration and the target count

use sakura_core::{ControlsConfig, EffectConfig};

/// The mutable side of the configuration. Input handlers write here; the
/// frame driver hands out `&EffectConfig` to the simulation.
#[derive(Debug, Clone)]
pub struct Controls {
    pub effect: EffectConfig,
    target_count: usize,
    max_count: usize,
    click_increment: usize,
}

impl Controls {
    pub fn new(effect: EffectConfig, controls: &ControlsConfig) -> Self {
        let max_count = controls.max_count as usize;
        Self {
            effect,
            target_count: (controls.target_count as usize).min(max_count),
            max_count,
            click_increment: controls.click_increment as usize,
        }
    }

    /// Where the pool is heading; the live pool converges toward it
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Slider input, clamped to `[0, max_count]`
    pub fn set_target_count(&mut self, count: i64) {
        self.target_count = count.clamp(0, self.max_count as i64) as usize;
    }

    /// Pointer-down bump, saturating at `max_count`
    pub fn bump_target(&mut self) -> usize {
        self.target_count = self
            .target_count
            .saturating_add(self.click_increment)
            .min(self.max_count);
        self.target_count
    }

    /// Non-finite slider values are ignored
    pub fn set_wind(&mut self, wind: f32) {
        if wind.is_finite() {
            self.effect.wind = wind;
        }
    }

    pub fn set_gustiness(&mut self, gustiness: f32) {
        if gustiness.is_finite() {
            self.effect.gustiness = gustiness;
        }
    }
}
