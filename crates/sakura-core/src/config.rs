//! Effect configuration and the TOML scene file

use crate::error::{Result, SakuraError};
use crate::types::Span;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables read by every petal on every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Fall speed in logical pixels per second before depth and size scaling
    pub base_fall: f32,
    /// Constant lateral wind component
    pub wind: f32,
    /// Amplitude multiplier for the oscillating wind component
    pub gustiness: f32,
    /// Sway oscillations per second
    pub sway_freq: Span,
    /// Rotation speed in radians per second
    pub spin: Span,
    /// Petal radius in logical pixels
    pub size: Span,
    /// Margin outside the viewport where petals spawn and despawn
    pub spawn_padding: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            base_fall: 24.0,
            wind: 1.0,
            gustiness: 0.8,
            sway_freq: Span::new(0.6, 1.6),
            spin: Span::new(0.3, 1.2),
            size: Span::new(8.0, 26.0),
            spawn_padding: 40.0,
        }
    }
}

impl EffectConfig {
    fn validate(&self) -> Result<()> {
        let scalars = [
            ("effect.base_fall", self.base_fall),
            ("effect.wind", self.wind),
            ("effect.gustiness", self.gustiness),
            ("effect.spawn_padding", self.spawn_padding),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(SakuraError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        let spans = [
            ("effect.sway_freq", self.sway_freq),
            ("effect.spin", self.spin),
            ("effect.size", self.size),
        ];
        for (name, span) in spans {
            if !span.min.is_finite() || !span.max.is_finite() {
                return Err(SakuraError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// Particle count controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Initial target particle count
    pub target_count: u32,
    /// Upper bound for the target count (slider maximum)
    pub max_count: u32,
    /// How much a pointer-down raises the target count
    pub click_increment: u32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            target_count: 180,
            max_count: 800,
            click_increment: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: u32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self { count: 80 }
    }
}

/// Window metrics used when there is no real window (headless rendering)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Top-level scene file
///
/// ```toml
/// seed = 7
///
/// [effect]
/// wind = 1.5
/// size = { min = 8, max = 26 }
///
/// [controls]
/// target_count = 300
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub effect: EffectConfig,
    pub controls: ControlsConfig,
    pub starfield: StarfieldConfig,
    pub viewport: ViewportConfig,
}

impl SceneConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(source)?;
        config.effect.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }
}
