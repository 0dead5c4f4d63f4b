//! Input events from the host

use glam::Vec2;

/// Everything the host can tell the effect between frames
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Particle count slider. Clamped to `[0, max_count]` when applied.
    SetTargetCount(i64),
    /// Base wind slider
    SetWind(f32),
    /// Gustiness slider
    SetGustiness(f32),
    /// Reseed the wind phase
    Shuffle,
    /// Pointer pressed at surface-local logical coordinates
    PointerDown(Vec2),
    /// Window metrics changed
    Resize {
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    },
}

impl InputEvent {
    /// Slider and resize events carry absolute state, so only the newest one
    /// of each kind matters. Pointer presses and shuffles each have an effect.
    pub fn is_latest_wins(&self) -> bool {
        matches!(
            self,
            InputEvent::SetTargetCount(_)
                | InputEvent::SetWind(_)
                | InputEvent::SetGustiness(_)
                | InputEvent::Resize { .. }
        )
    }

    /// Same variant, ignoring payload
    pub fn same_kind(&self, other: &InputEvent) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}
