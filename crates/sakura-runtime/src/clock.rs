//! Frame clock fed by host timestamps

/// Largest step a single frame may take, in seconds
pub const MAX_FRAME_DT: f64 = 0.05;

/// Timing for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Host timestamp in milliseconds
    pub now_ms: f64,
    /// Seconds since the previous frame, clamped to [0, MAX_FRAME_DT]
    pub dt: f32,
    /// Host timestamp in seconds; drives wind and twinkle
    pub t: f32,
}

/// Turns raw monotonic timestamps into clamped frame deltas.
///
/// The clamp keeps petals from teleporting past the bounds check after the
/// host stalls (a suspended tab, a debugger break).
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `now_ms` so the first tick sees a zero delta
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            last_ms: Some(now_ms),
            frame: 0,
        }
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frame += 1;

        // NaN falls through clamp unchanged, so guard it explicitly
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        FrameTime {
            now_ms,
            dt: dt as f32,
            t: (now_ms / 1000.0) as f32,
        }
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
