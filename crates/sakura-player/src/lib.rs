//! Sakura Player - frame driver and headless player
//!
//! `SakuraEffect` wires the simulation, sprite cache and a surface into one
//! per-frame tick. `PlayerApp` runs it unattended on a `Canvas` with
//! scripted input and PNG output.

pub mod effect;
mod player_app;
pub mod script;

pub use effect::{FrameStats, SakuraEffect};
pub use player_app::{PlayerApp, SnapshotPlan};
pub use script::{BurstAt, Script};
