//! # thoughtfield - bounded particle-field simulation
//!
//! A real-time 2D particle field with a small, declarative API: particles
//! spawn probabilistically, age toward eviction, optionally drift and link
//! to nearby neighbors, and render as glowing circles over a fading trail.
//! The simulation and rasterization are pure CPU work; the windowed runner
//! only blits the finished frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use thoughtfield::prelude::*;
//!
//! fn main() -> Result<(), thoughtfield::RunError> {
//!     Simulation::new()
//!         .with_capacity(500)
//!         .with_connections(80.0)
//!         .with_lifecycle(|l| l.lifetime(200.0).age_step(1.0).fade_floor(0.3))
//!         .with_visuals(|v| v.grid(GridStyle::default()))
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is a point entity with a position in surface pixels, a
//! bounded intensity in `0..=100` driving its radius and glow, a fixed
//! [`Category`] selecting its color, and an age that only grows.
//!
//! ### Cadences
//!
//! Three independent cadences share one thread:
//!
//! | Cadence | Default | Work |
//! |---------|---------|------|
//! | Spawn tick | 100 ms | one Bernoulli trial, at most one new particle |
//! | Render frame | display rate | aging, eviction, drift, draw pass |
//! | Mirror sample | 250 ms | copy count + category histogram for observers |
//!
//! Scheduling is pull-based ([`IntervalTimer`]): nothing fires unless the
//! owner polls, so stopping the engine is a plain flag with no dangling
//! callbacks.
//!
//! ### Bounded state
//!
//! The field holds at most `capacity` particles (default 500). When full,
//! the oldest are dropped to admit new ones; the aging pass evicts anything
//! reaching the maximum lifetime. Memory is bounded regardless of how long
//! the simulation runs.
//!
//! ### Embedding without a window
//!
//! [`Simulation::build`] returns an [`Engine`] you drive yourself: call
//! [`Engine::tick`] from your own loop and [`Engine::frame`] against any
//! [`Surface`] implementation. [`Pixmap`] is the shipped software raster
//! target and can export PNG frames for headless use.

pub mod error;
pub mod field;
pub mod lifecycle;
pub mod linker;
pub mod mirror;
pub mod particle;
pub mod render;
pub mod spawn;
pub mod surface;
pub mod time;

mod engine;
mod simulation;
mod window;

pub use engine::{ActivitySignal, Engine};
pub use error::{ConfigError, PresentError, RunError};
pub use field::Field;
pub use glam::Vec2;
pub use lifecycle::{Drift, Lifecycle};
pub use linker::{Connection, Linker};
pub use mirror::FieldSummary;
pub use particle::{Category, Particle, INTENSITY_MAX};
pub use render::{GridStyle, VisualConfig};
pub use simulation::Simulation;
pub use spawn::SpawnRate;
pub use surface::{Pixmap, Rgba, Surface};
pub use time::{FrameClock, IntervalTimer};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use thoughtfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::engine::Engine;
    pub use crate::error::{ConfigError, RunError};
    pub use crate::lifecycle::{Drift, Lifecycle};
    pub use crate::linker::Connection;
    pub use crate::mirror::FieldSummary;
    pub use crate::particle::{Category, Particle, INTENSITY_MAX};
    pub use crate::render::{GridStyle, VisualConfig};
    pub use crate::simulation::Simulation;
    pub use crate::spawn::SpawnRate;
    pub use crate::surface::{Pixmap, Rgba, Surface};
    pub use crate::Vec2;
}
