//! Sakura Core - Foundational types for the petal effect
//!
//! This crate provides the types that all other Sakura crates depend on:
//! - `EffectConfig`, `SceneConfig` - Tunable parameters and the TOML scene file
//! - `Viewport` - Logical surface size and device pixel ratio
//! - `Span`, `Color` - Small value types
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{ControlsConfig, EffectConfig, SceneConfig, StarfieldConfig, ViewportConfig};
pub use error::{Result, SakuraError};
pub use types::{Color, Span, Viewport};
