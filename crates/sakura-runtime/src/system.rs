//! Frame handler trait

use sakura_core::Result;

/// Something driven once per frame by a [`FrameScheduler`](crate::FrameScheduler).
///
/// The handler never schedules itself; the scheduler decides when (and
/// whether) the next frame happens.
pub trait FrameHandler {
    /// Run one frame at host timestamp `now_ms` (milliseconds)
    fn tick(&mut self, now_ms: f64) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}
