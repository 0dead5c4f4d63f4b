//! Scripted input for unattended runs

use glam::Vec2;
use sakura_runtime::InputEvent;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A pointer press at `at`, delivered before frame `frame` is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstAt {
    pub at: Vec2,
    pub frame: u64,
}

impl FromStr for BurstAt {
    type Err = String;

    /// Parses `x,y@frame`, e.g. `640,200@30`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (point, frame) = s
            .split_once('@')
            .ok_or_else(|| format!("expected x,y@frame, got '{s}'"))?;
        let (x, y) = point
            .split_once(',')
            .ok_or_else(|| format!("expected x,y before '@', got '{point}'"))?;
        let x: f32 = x.trim().parse().map_err(|_| format!("bad x coordinate '{x}'"))?;
        let y: f32 = y.trim().parse().map_err(|_| format!("bad y coordinate '{y}'"))?;
        if !x.is_finite() || !y.is_finite() {
            return Err(format!("coordinates must be finite in '{s}'"));
        }
        let frame = frame
            .trim()
            .parse()
            .map_err(|_| format!("bad frame number '{frame}'"))?;
        Ok(Self {
            at: Vec2::new(x, y),
            frame,
        })
    }
}

/// Input events keyed by the frame they are delivered on
#[derive(Debug, Default)]
pub struct Script {
    events: BTreeMap<u64, Vec<InputEvent>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&mut self, frame: u64, event: InputEvent) -> &mut Self {
        self.events.entry(frame).or_default().push(event);
        self
    }

    pub fn burst(&mut self, burst: BurstAt) -> &mut Self {
        self.at(burst.frame, InputEvent::PointerDown(burst.at))
    }

    /// Events for `frame` in insertion order; each frame is handed out once
    pub fn take(&mut self, frame: u64) -> Vec<InputEvent> {
        self.events.remove(&frame).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
