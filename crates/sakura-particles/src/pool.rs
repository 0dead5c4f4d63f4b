//! The live petal collection with throttled resizing and point bursts

use crate::petal::{Petal, PetalInstance, SpawnMode};
use crate::rand::ParticleRng;
use glam::Vec2;
use sakura_core::{EffectConfig, Viewport};

/// Most petals added or removed by a single `resize_toward`
pub const RESIZE_STEP: usize = 10;
/// Petals added by one burst
pub const BURST_COUNT: usize = 12;
/// Burst jitter half-extents around the pointer
pub const BURST_JITTER: Vec2 = Vec2::new(30.0, 10.0);

/// Unordered petal storage. Draw order is recomputed every frame by
/// [`PetalPool::sort_by_depth`].
#[derive(Debug, Default)]
pub struct PetalPool {
    petals: Vec<Petal>,
}

impl PetalPool {
    pub fn new() -> Self {
        Self { petals: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.petals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }

    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    /// Step the population toward `target` by at most [`RESIZE_STEP`].
    ///
    /// Growth uses scattered spawns; shrinking drops petals from the front.
    /// Returns the signed change in size.
    pub fn resize_toward(
        &mut self,
        target: usize,
        config: &EffectConfig,
        viewport: &Viewport,
        rng: &mut ParticleRng,
    ) -> isize {
        let current = self.petals.len();
        if target > current {
            let add = (target - current).min(RESIZE_STEP);
            self.petals.reserve(add);
            for _ in 0..add {
                self.petals
                    .push(Petal::spawn(SpawnMode::Scatter, config, viewport, rng));
            }
            tracing::debug!(added = add, len = self.petals.len(), target, "pool grew");
            add as isize
        } else if target < current {
            let remove = (current - target).min(RESIZE_STEP);
            self.petals.drain(..remove);
            tracing::debug!(removed = remove, len = self.petals.len(), target, "pool shrank");
            -(remove as isize)
        } else {
            0
        }
    }

    /// Inject [`BURST_COUNT`] petals around `at`, ignoring the resize throttle.
    ///
    /// Ages are pre-randomized so the new petals don't sway in unison.
    pub fn burst(
        &mut self,
        at: Vec2,
        config: &EffectConfig,
        viewport: &Viewport,
        rng: &mut ParticleRng,
    ) {
        self.petals.reserve(BURST_COUNT);
        for _ in 0..BURST_COUNT {
            let mut petal = Petal::spawn(SpawnMode::Scatter, config, viewport, rng);
            petal.position = Vec2::new(
                at.x + rng.range(-BURST_JITTER.x, BURST_JITTER.x),
                at.y + rng.range(-BURST_JITTER.y, BURST_JITTER.y),
            );
            petal.age = rng.range(0.0, 1.0);
            self.petals.push(petal);
        }
        tracing::debug!(x = at.x, y = at.y, len = self.petals.len(), "burst");
    }

    /// Advance every petal. Each update only reads its own state, so order
    /// doesn't matter. Returns how many petals were recycled.
    pub fn update(
        &mut self,
        dt: f32,
        wind: f32,
        config: &EffectConfig,
        viewport: &Viewport,
        rng: &mut ParticleRng,
    ) -> usize {
        let mut respawned = 0;
        for petal in &mut self.petals {
            if petal.update(dt, wind, config, viewport, rng) {
                respawned += 1;
            }
        }
        respawned
    }

    /// Stable sort far-to-near so nearer petals composite on top
    pub fn sort_by_depth(&mut self) {
        self.petals.sort_by(|a, b| a.z.total_cmp(&b.z));
    }

    pub fn instances(&self) -> impl Iterator<Item = PetalInstance> + '_ {
        self.petals.iter().map(Petal::instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup() -> (EffectConfig, Viewport, ParticleRng) {
        (
            EffectConfig::default(),
            Viewport::from_window(800.0, 600.0, 1.0),
            ParticleRng::new(42),
        )
    }

    fn filled(n: usize, config: &EffectConfig, vp: &Viewport, rng: &mut ParticleRng) -> PetalPool {
        let mut pool = PetalPool::new();
        while pool.len() < n {
            pool.resize_toward(n, config, vp, rng);
        }
        pool
    }

    #[test]
    fn growth_is_throttled() {
        let (config, vp, mut rng) = setup();
        let mut pool = PetalPool::new();
        assert_eq!(pool.resize_toward(800, &config, &vp, &mut rng), 10);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.resize_toward(15, &config, &vp, &mut rng), 5);
        assert_eq!(pool.len(), 15);
        assert_eq!(pool.resize_toward(15, &config, &vp, &mut rng), 0);
    }

    #[test]
    fn shrink_to_zero_takes_five_steps() {
        let (config, vp, mut rng) = setup();
        let mut pool = filled(50, &config, &vp, &mut rng);
        assert_eq!(pool.len(), 50);

        let mut sizes = Vec::new();
        for _ in 0..5 {
            pool.resize_toward(0, &config, &vp, &mut rng);
            sizes.push(pool.len());
        }
        assert_eq!(sizes, vec![40, 30, 20, 10, 0]);
        assert!(pool.is_empty());
    }

    #[test]
    fn shrink_removes_from_front() {
        let (config, vp, mut rng) = setup();
        let mut pool = filled(20, &config, &vp, &mut rng);
        let survivors: Vec<Petal> = pool.petals()[10..].to_vec();
        pool.resize_toward(0, &config, &vp, &mut rng);
        assert_eq!(pool.petals(), survivors.as_slice());
    }

    #[test]
    fn burst_adds_exactly_twelve() {
        let (config, vp, mut rng) = setup();
        let mut pool = filled(30, &config, &vp, &mut rng);
        pool.burst(Vec2::new(100.0, 100.0), &config, &vp, &mut rng);
        assert_eq!(pool.len(), 42);

        for p in &pool.petals()[30..] {
            assert!((p.position.x - 100.0).abs() <= 30.0);
            assert!((p.position.y - 100.0).abs() <= 10.0);
            assert!((0.0..1.0).contains(&p.age));
        }
    }

    #[test]
    fn burst_ignores_target() {
        let (config, vp, mut rng) = setup();
        let mut pool = PetalPool::new();
        pool.burst(Vec2::ZERO, &config, &vp, &mut rng);
        pool.burst(Vec2::ZERO, &config, &vp, &mut rng);
        assert_eq!(pool.len(), 24);
        // the throttle then walks it back down
        assert_eq!(pool.resize_toward(0, &config, &vp, &mut rng), -10);
    }

    #[test]
    fn depth_sort_is_ascending() {
        let (config, vp, mut rng) = setup();
        let mut pool = filled(200, &config, &vp, &mut rng);
        pool.sort_by_depth();
        for pair in pool.petals().windows(2) {
            assert!(pair[0].z <= pair[1].z);
        }
    }

    #[test]
    fn depth_sort_keeps_equal_keys_in_place() {
        let (config, vp, mut rng) = setup();
        let mut pool = filled(6, &config, &vp, &mut rng);
        for (i, p) in pool.petals.iter_mut().enumerate() {
            p.z = 1.0;
            p.age = i as f32;
        }
        pool.sort_by_depth();
        let ages: Vec<f32> = pool.petals().iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn update_keeps_population() {
        let (config, vp, mut rng) = setup();
        let mut pool = filled(100, &config, &vp, &mut rng);
        for _ in 0..2000 {
            pool.update(0.05, 1.0, &config, &vp, &mut rng);
        }
        assert_eq!(pool.len(), 100);
        for p in pool.petals() {
            assert!(!p.is_out_of_bounds(&config, &vp));
        }
    }

    proptest! {
        #[test]
        fn resize_never_jumps_more_than_step(start in 0usize..200, target in 0usize..2000) {
            let (config, vp, mut rng) = setup();
            let mut pool = filled(start, &config, &vp, &mut rng);
            let before = pool.len();
            let delta = pool.resize_toward(target, &config, &vp, &mut rng);
            prop_assert!(delta.unsigned_abs() <= RESIZE_STEP);
            prop_assert_eq!(pool.len() as isize, before as isize + delta);
        }
    }
}
