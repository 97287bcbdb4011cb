//! Simulation builder.
//!
//! [`Simulation`] collects configuration through a consuming builder,
//! validates everything in one place and produces either an [`Engine`]
//! for embedding (drive it yourself, render into any [`crate::Surface`])
//! or a full windowed run via [`Simulation::run`].
//!
//! # Quick Start
//!
//! ```ignore
//! use thoughtfield::prelude::*;
//!
//! Simulation::new()
//!     .with_capacity(500)
//!     .with_connections(80.0)
//!     .with_lifecycle(|l| l.lifetime(200.0).age_step(1.0).fade_floor(0.3))
//!     .run()?;
//! ```
//!
//! All knobs have defaults tuned for a 400x300 field view; `build`
//! rejects values that would make the simulation silently do nothing
//! (zero capacity, zero periods) or misbehave (probabilities outside
//! [0, 1], empty intensity ranges).

use crate::engine::{ActivitySignal, Engine};
use crate::error::{ConfigError, RunError};
use crate::field::Field;
use crate::lifecycle::Lifecycle;
use crate::linker::Linker;
use crate::mirror::Mirror;
use crate::render::{Renderer, VisualConfig};
use crate::spawn::{SpawnRate, Spawner};
use crate::time::IntervalTimer;
use crate::window;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

/// Builder for a particle-field simulation.
pub struct Simulation {
    capacity: usize,
    spawn_period: Duration,
    spawn_rate: SpawnRate,
    threat_chance: f32,
    intensity_min: f32,
    intensity_max: f32,
    lifecycle: Lifecycle,
    link_threshold: Option<f32>,
    link_opacity: f32,
    visuals: VisualConfig,
    mirror_period: Duration,
    activity: f32,
    activity_signal: Option<ActivitySignal>,
    seed: Option<u64>,
    title: String,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            capacity: 500,
            spawn_period: Duration::from_millis(100),
            spawn_rate: SpawnRate::FieldActivity,
            threat_chance: 0.1,
            intensity_min: 10.0,
            intensity_max: 60.0,
            lifecycle: Lifecycle::default(),
            link_threshold: None,
            link_opacity: 0.3,
            visuals: VisualConfig::default(),
            mirror_period: Duration::from_millis(250),
            activity: 50.0,
            activity_signal: None,
            seed: None,
            title: String::from("thoughtfield"),
        }
    }
}

impl Simulation {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the particle cap. When full, the oldest particles are dropped
    /// to admit new ones.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the spawn tick period (default 100 ms).
    pub fn with_spawn_period(mut self, period: Duration) -> Self {
        self.spawn_period = period;
        self
    }

    /// Set where the per-tick spawn probability comes from.
    pub fn with_spawn_rate(mut self, rate: SpawnRate) -> Self {
        self.spawn_rate = rate;
        self
    }

    /// Set the threat-category chance drawn while the session is secure.
    pub fn with_threat_chance(mut self, chance: f32) -> Self {
        self.threat_chance = chance;
        self
    }

    /// Set the intensity range sampled at spawn, within 0..=100.
    pub fn with_intensity_range(mut self, min: f32, max: f32) -> Self {
        self.intensity_min = min;
        self.intensity_max = max;
        self
    }

    /// Adjust the lifecycle (lifetime, age step, fade floor, drift).
    pub fn with_lifecycle(mut self, f: impl FnOnce(Lifecycle) -> Lifecycle) -> Self {
        self.lifecycle = f(self.lifecycle);
        self
    }

    /// Enable proximity connections below the given pixel distance.
    pub fn with_connections(mut self, threshold: f32) -> Self {
        self.link_threshold = Some(threshold);
        self
    }

    /// Set the opacity of a zero-distance connection (default 0.3).
    pub fn with_link_opacity(mut self, opacity: f32) -> Self {
        self.link_opacity = opacity;
        self
    }

    /// Adjust the frame pass visuals (fade, grid, radii, glow).
    pub fn with_visuals(mut self, f: impl FnOnce(VisualConfig) -> VisualConfig) -> Self {
        self.visuals = f(self.visuals);
        self
    }

    /// Set the mirror sampling period (default 250 ms).
    pub fn with_mirror_period(mut self, period: Duration) -> Self {
        self.mirror_period = period;
        self
    }

    /// Set the initial field-activity scalar, clamped to [0, 100].
    pub fn with_activity(mut self, activity: f32) -> Self {
        self.activity = activity;
        self
    }

    /// Install an external activity source, polled once per engine tick
    /// with seconds since start.
    pub fn with_activity_signal(mut self, signal: impl FnMut(f32) -> f32 + 'static) -> Self {
        self.activity_signal = Some(Box::new(signal));
        self
    }

    /// Seed the random generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the window title used by [`run`](Self::run).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.spawn_period.is_zero() {
            return Err(ConfigError::ZeroSpawnPeriod);
        }
        if self.mirror_period.is_zero() {
            return Err(ConfigError::ZeroMirrorPeriod);
        }
        if let SpawnRate::Fixed(p) = self.spawn_rate {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    what: "spawn probability",
                    value: p,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.threat_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                what: "threat chance",
                value: self.threat_chance,
            });
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(ConfigError::ProbabilityOutOfRange {
                what: "link opacity",
                value: self.link_opacity,
            });
        }
        if !(0.0..=1.0).contains(&self.lifecycle.fade_floor_value()) {
            return Err(ConfigError::ProbabilityOutOfRange {
                what: "fade floor",
                value: self.lifecycle.fade_floor_value(),
            });
        }
        if self.lifecycle.max_lifetime() <= 0.0 {
            return Err(ConfigError::NonPositiveLifetime(self.lifecycle.max_lifetime()));
        }
        if self.lifecycle.age_step_value() <= 0.0 {
            return Err(ConfigError::NonPositiveAgeStep(self.lifecycle.age_step_value()));
        }
        if let Some(drift) = self.lifecycle.drift_config() {
            if drift.position < 0.0 {
                return Err(ConfigError::NegativeDriftBound {
                    what: "position",
                    value: drift.position,
                });
            }
            if drift.intensity < 0.0 {
                return Err(ConfigError::NegativeDriftBound {
                    what: "intensity",
                    value: drift.intensity,
                });
            }
        }
        if let Some(threshold) = self.link_threshold {
            if threshold <= 0.0 {
                return Err(ConfigError::NonPositiveThreshold(threshold));
            }
        }
        if self.intensity_min >= self.intensity_max
            || self.intensity_min < 0.0
            || self.intensity_max > crate::particle::INTENSITY_MAX
        {
            return Err(ConfigError::InvalidIntensityRange {
                min: self.intensity_min,
                max: self.intensity_max,
            });
        }
        Ok(())
    }

    /// Validate the configuration and assemble an [`Engine`].
    pub fn build(self) -> Result<Engine, ConfigError> {
        self.validate()?;
        let rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Engine::new(
            Field::new(self.capacity),
            Spawner::new(
                self.spawn_rate,
                self.threat_chance,
                self.intensity_min,
                self.intensity_max,
            ),
            self.lifecycle,
            self.link_threshold
                .map(|t| Linker::new(t, self.link_opacity)),
            Renderer::new(self.visuals),
            Mirror::new(self.mirror_period),
            IntervalTimer::new(self.spawn_period),
            rng,
            self.activity.clamp(0.0, 100.0),
            self.activity_signal,
        ))
    }

    /// Build the engine and run it in a window until closed.
    pub fn run(self) -> Result<(), RunError> {
        let title = self.title.clone();
        let engine = self.build()?;
        window::run(engine, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_builds() {
        assert!(Simulation::new().build().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Simulation::new().with_capacity(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroCapacity);
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = Simulation::new()
            .with_spawn_period(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroSpawnPeriod);

        let err = Simulation::new()
            .with_mirror_period(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroMirrorPeriod);
    }

    #[test]
    fn test_out_of_range_probabilities_rejected() {
        let err = Simulation::new()
            .with_spawn_rate(SpawnRate::Fixed(1.5))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ProbabilityOutOfRange {
                what: "spawn probability",
                ..
            }
        ));

        let err = Simulation::new()
            .with_threat_chance(-0.1)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ProbabilityOutOfRange {
                what: "threat chance",
                ..
            }
        ));

        let err = Simulation::new()
            .with_link_opacity(2.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ProbabilityOutOfRange {
                what: "link opacity",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_lifecycle_rejected() {
        let err = Simulation::new()
            .with_lifecycle(|l| l.lifetime(0.0))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLifetime(0.0));

        let err = Simulation::new()
            .with_lifecycle(|l| l.age_step(-1.0))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveAgeStep(-1.0));
    }

    #[test]
    fn test_negative_drift_bounds_rejected() {
        use crate::lifecycle::Drift;

        let err = Simulation::new()
            .with_lifecycle(|l| {
                l.drift(Drift {
                    position: -1.0,
                    intensity: 5.0,
                })
            })
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeDriftBound {
                what: "position",
                value: -1.0,
            }
        );

        let err = Simulation::new()
            .with_lifecycle(|l| {
                l.drift(Drift {
                    position: 1.0,
                    intensity: -5.0,
                })
            })
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeDriftBound {
                what: "intensity",
                value: -5.0,
            }
        );

        // Zero bounds are a valid no-op jitter
        assert!(Simulation::new()
            .with_lifecycle(|l| {
                l.drift(Drift {
                    position: 0.0,
                    intensity: 0.0,
                })
            })
            .build()
            .is_ok());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let err = Simulation::new()
            .with_connections(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveThreshold(0.0));
    }

    #[test]
    fn test_bad_intensity_range_rejected() {
        // Empty range
        let err = Simulation::new()
            .with_intensity_range(50.0, 50.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIntensityRange { .. }));
        // Out of the 0..=100 scale
        let err = Simulation::new()
            .with_intensity_range(10.0, 150.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIntensityRange { .. }));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = |seed| {
            let mut e = Simulation::new()
                .with_spawn_rate(SpawnRate::Fixed(1.0))
                .with_seed(seed)
                .build()
                .unwrap();
            e.start(400, 300);
            for _ in 0..20 {
                e.spawn_tick();
            }
            e.field()
                .iter()
                .map(|p| (p.position.x, p.position.y, p.intensity))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }
}
