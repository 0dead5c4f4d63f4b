//! Pending input, applied at the next frame boundary

use crate::event::InputEvent;

/// Input received since the last frame.
///
/// A dragged slider or a live window resize can fire many events per frame.
/// Pushing a latest-wins event drops any pending event of the same kind, so
/// the queue stays bounded by the number of presses and shuffles.
#[derive(Debug, Default)]
pub struct EventBus {
    pending: Vec<InputEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        if event.is_latest_wins() {
            self.pending.retain(|queued| !queued.same_kind(&event));
        }
        self.pending.push(event);
    }

    /// Take everything pending, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn presses_and_shuffles_are_all_kept() {
        let mut bus = EventBus::new();
        bus.push(InputEvent::PointerDown(Vec2::new(1.0, 2.0)));
        bus.push(InputEvent::Shuffle);
        bus.push(InputEvent::PointerDown(Vec2::new(3.0, 4.0)));
        bus.push(InputEvent::Shuffle);
        assert_eq!(bus.len(), 4);

        let events = bus.drain();
        assert_eq!(events[0], InputEvent::PointerDown(Vec2::new(1.0, 2.0)));
        assert_eq!(events[3], InputEvent::Shuffle);
        assert!(bus.is_empty());
    }

    #[test]
    fn slider_drag_collapses_to_last_value() {
        let mut bus = EventBus::new();
        for i in 0..50 {
            bus.push(InputEvent::SetWind(i as f32 * 0.1));
        }
        bus.push(InputEvent::SetGustiness(0.2));
        bus.push(InputEvent::SetWind(-1.0));

        assert_eq!(
            bus.drain(),
            vec![InputEvent::SetGustiness(0.2), InputEvent::SetWind(-1.0)]
        );
    }

    #[test]
    fn newest_setting_lands_after_interleaved_press() {
        let mut bus = EventBus::new();
        bus.push(InputEvent::SetTargetCount(100));
        bus.push(InputEvent::PointerDown(Vec2::ZERO));
        bus.push(InputEvent::SetTargetCount(200));
        bus.push(InputEvent::Resize {
            width: 10.0,
            height: 10.0,
            device_pixel_ratio: 1.0,
        });
        bus.push(InputEvent::Resize {
            width: 20.0,
            height: 10.0,
            device_pixel_ratio: 1.0,
        });

        assert_eq!(
            bus.drain(),
            vec![
                InputEvent::PointerDown(Vec2::ZERO),
                InputEvent::SetTargetCount(200),
                InputEvent::Resize {
                    width: 20.0,
                    height: 10.0,
                    device_pixel_ratio: 1.0,
                },
            ]
        );
    }

    #[test]
    fn drain_clears() {
        let mut bus = EventBus::new();
        bus.push(InputEvent::SetWind(2.0));
        assert_eq!(bus.drain().len(), 1);
        assert!(bus.drain().is_empty());
    }
}
