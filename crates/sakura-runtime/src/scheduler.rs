//! Frame schedulers: synthetic timestamps for tests and offline rendering,
//! wall-clock pacing for live runs

use crate::system::FrameHandler;
use sakura_core::Result;
use std::time::{Duration, Instant};

/// Hands out the timestamp of the next frame, or `None` to stop
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<f64>;
}

/// Fixed-interval synthetic clock
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    next_ms: f64,
    step_ms: f64,
    remaining: u64,
}

impl FixedStepScheduler {
    pub fn new(start_ms: f64, step_ms: f64, frames: u64) -> Self {
        Self {
            next_ms: start_ms,
            step_ms,
            remaining: frames,
        }
    }

    /// `frames` frames at `fps`, starting at t = 0
    pub fn at_fps(fps: f64, frames: u64) -> Self {
        Self::new(0.0, 1000.0 / fps.max(1.0), frames)
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        Some(now)
    }
}

/// Paces frames against the monotonic clock, sleeping off any slack
#[derive(Debug)]
pub struct RealtimeScheduler {
    start: Instant,
    frame_interval: Duration,
    next_deadline: Instant,
    remaining: Option<u64>,
}

impl RealtimeScheduler {
    /// `frame_limit` of `None` runs until the process is stopped
    pub fn new(target_fps: f64, frame_limit: Option<u64>) -> Self {
        let start = Instant::now();
        Self {
            start,
            frame_interval: Duration::from_secs_f64(1.0 / target_fps.max(1.0)),
            next_deadline: start,
            remaining: frame_limit,
        }
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
        }
        // Don't try to catch up after a stall; the frame clock clamps dt anyway
        self.next_deadline = Instant::now().max(self.next_deadline) + self.frame_interval;
        Some(self.start.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Drive `handler` until the scheduler runs dry. Returns the frame count.
pub fn run<S, H>(scheduler: &mut S, handler: &mut H) -> Result<u64>
where
    S: FrameScheduler + ?Sized,
    H: FrameHandler + ?Sized,
{
    let mut frames = 0;
    while let Some(now_ms) = scheduler.next_frame() {
        handler.tick(now_ms)?;
        frames += 1;
    }
    tracing::info!(handler = handler.name(), frames, "frame loop finished");
    Ok(frames)
}
