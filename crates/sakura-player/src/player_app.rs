//! Headless player: drives the effect on an in-memory canvas and writes
//! PNG snapshots

use crate::effect::{FrameStats, SakuraEffect};
use crate::script::Script;
use sakura_core::{Color, Result, SceneConfig, Viewport};
use sakura_particles::ParticleRng;
use sakura_render::{save_png, Canvas};
use sakura_runtime::FrameHandler;
use std::path::PathBuf;

/// Where and how often frames are written
#[derive(Clone, Debug, Default)]
pub struct SnapshotPlan {
    /// Write the last rendered frame here when the run ends
    pub final_frame: Option<PathBuf>,
    /// Directory for periodic `frame_NNNNN.png` files
    pub frames_dir: Option<PathBuf>,
    /// Period for `frames_dir`; 0 disables periodic output
    pub every: u64,
    /// Flatten onto this colour; `None` keeps transparency
    pub background: Option<Color>,
}

impl SnapshotPlan {
    fn wants(&self, frame: u64) -> Option<PathBuf> {
        let dir = self.frames_dir.as_ref()?;
        if self.every == 0 || frame % self.every != 0 {
            return None;
        }
        Some(dir.join(format!("frame_{frame:05}.png")))
    }
}

pub struct PlayerApp {
    effect: SakuraEffect<Canvas>,
    script: Script,
    snapshots: SnapshotPlan,
    frames: u64,
    last_stats: Option<FrameStats>,
    written: Vec<PathBuf>,
}

impl PlayerApp {
    pub fn new(scene: &SceneConfig, script: Script, snapshots: SnapshotPlan) -> Result<Self> {
        let rng = match scene.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_entropy(),
        };
        let viewport = Viewport::from_window(
            scene.viewport.width,
            scene.viewport.height,
            scene.viewport.device_pixel_ratio,
        );
        let canvas = Canvas::new(&viewport)?;
        let effect = SakuraEffect::new(canvas, scene, rng)?;
        Ok(Self {
            effect,
            script,
            snapshots,
            frames: 0,
            last_stats: None,
            written: Vec::new(),
        })
    }

    pub fn effect(&self) -> &SakuraEffect<Canvas> {
        &self.effect
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    /// Every PNG written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Write the final frame if one was requested
    pub fn finish(&mut self) -> Result<Option<PathBuf>> {
        let Some(path) = self.snapshots.final_frame.clone() else {
            return Ok(None);
        };
        save_png(self.effect.surface(), &path, self.snapshots.background)?;
        tracing::info!(path = %path.display(), frames = self.frames, "final frame written");
        self.written.push(path.clone());
        Ok(Some(path))
    }
}

impl FrameHandler for PlayerApp {
    fn tick(&mut self, now_ms: f64) -> Result<()> {
        for event in self.script.take(self.frames) {
            self.effect.push_event(event);
        }
        let stats = self.effect.render_frame(now_ms)?;
        if let Some(path) = self.snapshots.wants(self.frames) {
            save_png(self.effect.surface(), &path, self.snapshots.background)?;
            self.written.push(path);
        }
        if stats.frame % 60 == 0 {
            tracing::debug!(
                frame = stats.frame,
                petals = stats.petals,
                target = stats.target,
                sprites = stats.sprites,
                "progress"
            );
        }
        self.last_stats = Some(stats);
        self.frames += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "sakura-player"
    }
}
