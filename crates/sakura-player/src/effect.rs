//! The frame driver: owns the simulation, the sprites and the surface, and
//! turns one timestamp into one drawn frame

use sakura_core::{Result, SceneConfig, Viewport};
use sakura_particles::{ParticleRng, PetalPool, PetalSystem};
use sakura_render::painter::{draw_petals, draw_stars};
use sakura_render::{Surface, TextureCache};
use sakura_runtime::{Controls, EventBus, FrameClock, FrameHandler, InputEvent};

/// What one frame did, for logging and tests
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub dt: f32,
    pub petals: usize,
    pub target: usize,
    pub respawned: usize,
    pub sprites: usize,
}

/// The whole effect bound to one surface.
///
/// Input goes through [`SakuraEffect::push_event`] and is applied at the
/// start of the next frame, so a frame always sees one consistent state.
pub struct SakuraEffect<S: Surface> {
    surface: S,
    viewport: Viewport,
    controls: Controls,
    system: PetalSystem,
    textures: TextureCache,
    clock: FrameClock,
    events: EventBus,
}

impl<S: Surface> SakuraEffect<S> {
    pub fn new(mut surface: S, scene: &SceneConfig, rng: ParticleRng) -> Result<Self> {
        let viewport = Viewport::from_window(
            scene.viewport.width,
            scene.viewport.height,
            scene.viewport.device_pixel_ratio,
        );
        surface.resize(&viewport)?;
        let controls = Controls::new(scene.effect.clone(), &scene.controls);
        let system = PetalSystem::new(scene.starfield.count as usize, rng);
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            target = controls.target_count(),
            stars = system.starfield.len(),
            "effect started"
        );
        Ok(Self {
            surface,
            viewport,
            controls,
            system,
            textures: TextureCache::new(),
            clock: FrameClock::new(),
            events: EventBus::new(),
        })
    }

    /// Queue input for the next frame boundary
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Apply one input event right away
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::SetTargetCount(count) => self.controls.set_target_count(count),
            InputEvent::SetWind(wind) => self.controls.set_wind(wind),
            InputEvent::SetGustiness(gust) => self.controls.set_gustiness(gust),
            InputEvent::Shuffle => self.system.shuffle_wind(),
            InputEvent::PointerDown(at) => {
                self.system.burst(at, &self.controls.effect, &self.viewport);
                let target = self.controls.bump_target();
                tracing::debug!(x = at.x, y = at.y, target, "pointer burst");
            }
            InputEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                self.viewport = Viewport::from_window(width, height, device_pixel_ratio);
                self.surface.resize(&self.viewport)?;
            }
        }
        Ok(())
    }

    /// Run one frame at host time `now_ms`.
    ///
    /// Order is fixed: pending input, clock, pool resize, clear, stars,
    /// petal update and depth sort, petals.
    pub fn render_frame(&mut self, now_ms: f64) -> Result<FrameStats> {
        for event in self.events.drain() {
            self.handle_event(event)?;
        }

        let time = self.clock.tick(now_ms);
        let config = &self.controls.effect;
        let target = self.controls.target_count();
        self.system.resize_toward(target, config, &self.viewport);

        self.surface.clear();
        draw_stars(
            &mut self.surface,
            self.system.starfield.instances(time.t, &self.viewport),
        );

        let respawned = self
            .system
            .simulate(time.dt, time.t, config, &self.viewport);
        draw_petals(
            &mut self.surface,
            &mut self.textures,
            self.system.pool.instances(),
        );

        let stats = FrameStats {
            frame: self.clock.frame_count(),
            dt: time.dt,
            petals: self.system.pool.len(),
            target,
            respawned,
            sprites: self.textures.len(),
        };
        tracing::trace!(?stats, "frame");
        Ok(stats)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn pool(&self) -> &PetalPool {
        &self.system.pool
    }

    pub fn system(&self) -> &PetalSystem {
        &self.system
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }
}

impl<S: Surface> FrameHandler for SakuraEffect<S> {
    fn tick(&mut self, now_ms: f64) -> Result<()> {
        self.render_frame(now_ms).map(|_| ())
    }

    fn name(&self) -> &str {
        "sakura"
    }
}
