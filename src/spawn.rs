//! Particle spawning.
//!
//! On every spawn tick the [`Spawner`] draws one Bernoulli trial; on
//! success it creates a single particle with a uniformly random position
//! over the surface, a uniform intensity and a category sampled uniformly
//! from the common set. The rare [`Category::Threat`] is drawn first with
//! its own low probability, and only while the secure-session flag is set.
//!
//! Spawning is throttled by the spawn-tick period (default 100 ms) and is
//! deliberately decoupled from the frame rate: the tick limits growth
//! rate, aging and rendering run as fast as the display allows.

use crate::field::Field;
use crate::particle::{Category, Particle};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

/// Where the per-tick spawn probability comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRate {
    /// Fixed probability in [0, 1] per spawn tick.
    Fixed(f32),
    /// Probability follows the external field-activity signal:
    /// a scalar in [0, 100] scaled to [0, 1], polled each tick.
    FieldActivity,
}

impl SpawnRate {
    /// Resolve the per-tick probability given the current activity signal.
    pub(crate) fn probability(self, activity: f32) -> f32 {
        match self {
            SpawnRate::Fixed(p) => p,
            SpawnRate::FieldActivity => (activity / 100.0).clamp(0.0, 1.0),
        }
    }
}

/// Spawn-tick configuration and execution.
///
/// A tick either appends exactly one particle or no-ops; it never fails.
#[derive(Debug, Clone)]
pub struct Spawner {
    rate: SpawnRate,
    threat_chance: f32,
    intensity_min: f32,
    intensity_max: f32,
}

impl Spawner {
    /// Values validated upstream by the simulation builder.
    pub(crate) fn new(
        rate: SpawnRate,
        threat_chance: f32,
        intensity_min: f32,
        intensity_max: f32,
    ) -> Self {
        Self {
            rate,
            threat_chance,
            intensity_min,
            intensity_max,
        }
    }

    /// Run one spawn tick against the field.
    ///
    /// `extent` is the current surface size in pixels; `activity` is the
    /// external signal in [0, 100]; `secure` gates the threat category.
    pub(crate) fn tick(
        &self,
        rng: &mut SmallRng,
        field: &mut Field,
        extent: Vec2,
        activity: f32,
        secure: bool,
    ) {
        let p = self.rate.probability(activity);
        if rng.gen::<f32>() >= p {
            return;
        }
        let position = Vec2::new(
            rng.gen_range(0.0..extent.x.max(1.0)),
            rng.gen_range(0.0..extent.y.max(1.0)),
        );
        let intensity = rng.gen_range(self.intensity_min..self.intensity_max);
        let category = self.sample_category(rng, secure);
        field.push(Particle::new(position, intensity, category));
    }

    /// Draw a category: threat first with its own gated chance, otherwise
    /// uniform over the common set.
    fn sample_category(&self, rng: &mut SmallRng, secure: bool) -> Category {
        if secure && rng.gen::<f32>() < self.threat_chance {
            return Category::Threat;
        }
        Category::COMMON[rng.gen_range(0..Category::COMMON.len())]
    }
}
