//! Sakura Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the frame driver runs on:
//! - `FrameClock`: host timestamps to clamped frame deltas
//! - `InputEvent` / `EventBus`: input queued between frames
//! - `Controls`: slider state and the target particle count
//! - `FrameHandler` / `FrameScheduler`: the tick contract and who calls it

mod clock;
mod controls;
mod event;
mod event_bus;
mod scheduler;
mod system;

pub use clock::{FrameClock, FrameTime, MAX_FRAME_DT};
pub use controls::Controls;
pub use event::InputEvent;
pub use event_bus::EventBus;
pub use scheduler::{run, FixedStepScheduler, FrameScheduler, RealtimeScheduler};
pub use system::FrameHandler;
