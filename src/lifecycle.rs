//! Particle lifecycle: aging, optional drift and eviction.
//!
//! The aging pass runs once per render frame, before anything reads the
//! field for drawing. Each particle's age advances by a fixed step;
//! with drift enabled, position and intensity take a small bounded random
//! walk (clamped to their declared ranges); finally every particle whose
//! age reached the maximum lifetime is removed in a single batched pass.
//!
//! # Quick Start
//!
//! ```ignore
//! Simulation::new()
//!     .with_lifecycle(|l| l.lifetime(1000.0).fade_floor(0.3).drift(Drift::default()))
//!     .run()?;
//! ```

use crate::field::Field;
use crate::particle::INTENSITY_MAX;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

/// Bounded per-frame random walk applied to already-placed particles.
///
/// Some field visualizations leave particles fixed after creation and only
/// fade them; others drift them every frame. Both behaviors are valid, so
/// drift is opt-in via [`Lifecycle::drift`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Maximum absolute position jitter per axis per frame, in pixels.
    pub position: f32,
    /// Maximum absolute intensity jitter per frame.
    pub intensity: f32,
}

impl Default for Drift {
    fn default() -> Self {
        Self {
            position: 1.0,
            intensity: 5.0,
        }
    }
}

/// Lifecycle configuration builder.
///
/// # Example
///
/// ```ignore
/// .with_lifecycle(|l| {
///     l.lifetime(200.0)    // evict at age >= 200
///      .age_step(1.0)      // one unit per frame
///      .fade_floor(0.3)    // never dimmer than 0.3 opacity
///      .drift(Drift::default())
/// })
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lifecycle {
    max_lifetime: f32,
    age_step: f32,
    fade_floor: f32,
    drift: Option<Drift>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            max_lifetime: 1000.0,
            age_step: 16.0,
            fade_floor: 0.0,
            drift: None,
        }
    }
}

impl Lifecycle {
    /// Create the default lifecycle: 1000 ms lifetime, 16 ms per frame,
    /// no fade floor, no drift.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum lifetime; particles with `age >= lifetime` are
    /// evicted by the next aging pass.
    pub fn lifetime(mut self, lifetime: f32) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Set the fixed per-frame age increment.
    pub fn age_step(mut self, step: f32) -> Self {
        self.age_step = step;
        self
    }

    /// Set the lower bound on lifetime-fade opacity.
    pub fn fade_floor(mut self, floor: f32) -> Self {
        self.fade_floor = floor;
        self
    }

    /// Enable per-frame drift with the given jitter bounds.
    pub fn drift(mut self, drift: Drift) -> Self {
        self.drift = Some(drift);
        self
    }

    /// Configured maximum lifetime.
    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    /// Configured per-frame age increment.
    pub fn age_step_value(&self) -> f32 {
        self.age_step
    }

    /// Configured fade floor.
    pub fn fade_floor_value(&self) -> f32 {
        self.fade_floor
    }

    /// Configured drift, if enabled.
    pub fn drift_config(&self) -> Option<Drift> {
        self.drift
    }

    /// Opacity of a particle at `age`: `max(floor, 1 - age/lifetime)`,
    /// never below zero.
    pub fn opacity(&self, age: f32) -> f32 {
        (1.0 - age / self.max_lifetime)
            .max(self.fade_floor)
            .max(0.0)
    }

    /// Run one aging/eviction pass over the field.
    ///
    /// Must complete before the frame's draw/link reads, so the renderer
    /// only ever sees post-aging state. The eviction is one batched
    /// retain, not per-particle reallocation.
    pub(crate) fn age_frame(&self, rng: &mut SmallRng, field: &mut Field, extent: Vec2) {
        let drift = self.drift;
        for p in field.iter_mut() {
            p.age += self.age_step;
            if let Some(d) = drift {
                p.position.x =
                    (p.position.x + rng.gen_range(-d.position..=d.position)).clamp(0.0, extent.x);
                p.position.y =
                    (p.position.y + rng.gen_range(-d.position..=d.position)).clamp(0.0, extent.y);
                p.intensity = (p.intensity + rng.gen_range(-d.intensity..=d.intensity))
                    .clamp(0.0, INTENSITY_MAX);
            }
        }
        let max = self.max_lifetime;
        field.retain(|p| p.age < max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Category, Particle};
    use rand::SeedableRng;

    const EXTENT: Vec2 = Vec2::new(400.0, 300.0);

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(123)
    }

    #[test]
    fn test_eviction_at_exact_lifetime_boundary() {
        // lifetime 3, step 1: present after pass 2 (age 2), gone after pass 3
        let lc = Lifecycle::new().lifetime(3.0).age_step(1.0);
        let mut field = Field::new(10);
        let mut rng = rng();
        field.push(Particle::new(Vec2::ZERO, 50.0, Category::Harmony));

        lc.age_frame(&mut rng, &mut field, EXTENT);
        lc.age_frame(&mut rng, &mut field, EXTENT);
        assert_eq!(field.len(), 1);
        assert_eq!(field.get(0).unwrap().age, 2.0);

        lc.age_frame(&mut rng, &mut field, EXTENT);
        assert!(field.is_empty());
    }

    #[test]
    fn test_age_is_non_decreasing() {
        let lc = Lifecycle::new().lifetime(10_000.0).drift(Drift::default());
        let mut field = Field::new(10);
        let mut rng = rng();
        field.push(Particle::new(Vec2::new(10.0, 10.0), 50.0, Category::Chaos));
        let mut last_age = 0.0;
        for _ in 0..50 {
            lc.age_frame(&mut rng, &mut field, EXTENT);
            let age = field.get(0).unwrap().age;
            assert!(age > last_age);
            last_age = age;
        }
    }

    #[test]
    fn test_drift_stays_clamped_under_large_perturbation() {
        let lc = Lifecycle::new().lifetime(f32::MAX).age_step(1.0).drift(Drift {
            position: 500.0,
            intensity: 300.0,
        });
        let mut field = Field::new(10);
        let mut rng = rng();
        field.push(Particle::new(Vec2::new(200.0, 150.0), 50.0, Category::Resonance));
        for _ in 0..200 {
            lc.age_frame(&mut rng, &mut field, EXTENT);
            let p = field.get(0).unwrap();
            assert!(p.position.x >= 0.0 && p.position.x <= EXTENT.x);
            assert!(p.position.y >= 0.0 && p.position.y <= EXTENT.y);
            assert!(p.intensity >= 0.0 && p.intensity <= INTENSITY_MAX);
        }
    }

    #[test]
    fn test_no_drift_leaves_position_fixed() {
        let lc = Lifecycle::new().lifetime(10_000.0);
        let mut field = Field::new(10);
        let mut rng = rng();
        let origin = Vec2::new(37.0, 73.0);
        field.push(Particle::new(origin, 50.0, Category::Disruption));
        for _ in 0..20 {
            lc.age_frame(&mut rng, &mut field, EXTENT);
        }
        let p = field.get(0).unwrap();
        assert_eq!(p.position, origin);
        assert_eq!(p.intensity, 50.0);
    }

    #[test]
    fn test_no_particle_outlives_max_lifetime() {
        let lc = Lifecycle::new().lifetime(100.0).age_step(16.0);
        let mut field = Field::new(50);
        let mut rng = rng();
        for i in 0..20 {
            let mut p = Particle::new(Vec2::ZERO, 50.0, Category::Harmony);
            p.age = i as f32 * 10.0;
            field.push(p);
        }
        lc.age_frame(&mut rng, &mut field, EXTENT);
        assert!(field.iter().all(|p| p.age < 100.0));
    }

    #[test]
    fn test_opacity_fades_with_floor() {
        let lc = Lifecycle::new().lifetime(200.0).fade_floor(0.3);
        assert_eq!(lc.opacity(0.0), 1.0);
        assert_eq!(lc.opacity(100.0), 0.5);
        assert_eq!(lc.opacity(190.0), 0.3);
        assert_eq!(lc.opacity(400.0), 0.3);

        let no_floor = Lifecycle::new().lifetime(200.0);
        assert_eq!(no_floor.opacity(400.0), 0.0);
    }
}
