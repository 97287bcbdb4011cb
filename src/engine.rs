//! The field engine: shared state, timers and the run-state machine.
//!
//! One engine owns the bounded particle field and the three cadences that
//! act on it: the spawn tick (throttled growth), the per-frame aging and
//! draw pass, and the coarse mirror sample. Everything is single-threaded
//! and cooperative; callers drive the engine with [`Engine::tick`] from
//! their event loop and [`Engine::frame`] from their redraw handler.
//!
//! Scheduling is pull-based, so cancellation is simply the running flag:
//! after [`Engine::stop`], every entry point no-ops and nothing can fire
//! against a torn-down surface.
//!
//! Ordering guarantee: within [`Engine::frame`], the aging/eviction pass
//! completes before connections or circles are computed, so a frame never
//! shows half-aged state.

use crate::field::Field;
use crate::lifecycle::Lifecycle;
use crate::linker::{Connection, Linker};
use crate::mirror::{FieldSummary, Mirror};
use crate::render::Renderer;
use crate::spawn::Spawner;
use crate::surface::Surface;
use crate::time::IntervalTimer;
use glam::Vec2;
use rand::rngs::SmallRng;
use std::time::Instant;

/// External activity source polled once per engine tick.
///
/// Receives seconds since [`Engine::start`] and returns the field-activity
/// scalar in [0, 100].
pub type ActivitySignal = Box<dyn FnMut(f32) -> f32>;

/// Run state and shared simulation state for one particle field.
///
/// Built by [`crate::Simulation::build`]; configuration is validated
/// there, so no engine operation can fail.
pub struct Engine {
    field: Field,
    spawner: Spawner,
    lifecycle: Lifecycle,
    linker: Option<Linker>,
    renderer: Renderer,
    mirror: Mirror,
    spawn_timer: IntervalTimer,
    rng: SmallRng,
    extent: Vec2,
    activity: f32,
    secure_session: bool,
    activity_signal: Option<ActivitySignal>,
    running: bool,
    started_at: Option<Instant>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("running", &self.running)
            .field("particles", &self.field.len())
            .field("activity", &self.activity)
            .finish_non_exhaustive()
    }
}

impl Engine {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        field: Field,
        spawner: Spawner,
        lifecycle: Lifecycle,
        linker: Option<Linker>,
        renderer: Renderer,
        mirror: Mirror,
        spawn_timer: IntervalTimer,
        rng: SmallRng,
        activity: f32,
        activity_signal: Option<ActivitySignal>,
    ) -> Self {
        Self {
            field,
            spawner,
            lifecycle,
            linker,
            renderer,
            mirror,
            spawn_timer,
            rng,
            extent: Vec2::new(1.0, 1.0),
            activity,
            secure_session: false,
            activity_signal,
            running: false,
            started_at: None,
        }
    }

    // =========================================================================
    // LIFECYCLE HOOKS
    // =========================================================================

    /// Begin running against a drawing surface of the given pixel size.
    ///
    /// Idempotent: starting a running engine only updates the extent.
    pub fn start(&mut self, width: u32, height: u32) {
        self.set_extent(width, height);
        if self.running {
            return;
        }
        self.running = true;
        self.started_at = Some(Instant::now());
        self.spawn_timer.reset();
        self.mirror.reset();
    }

    /// Stop all activity. Idempotent; a later [`start`](Self::start)
    /// resumes normally with the surviving particles.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the engine is currently animating.
    ///
    /// Callers detect an inert canvas through this flag; a missing
    /// drawing surface manifests as `false`, never as an error.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Notify the engine that the surface size changed.
    pub fn set_extent(&mut self, width: u32, height: u32) {
        self.extent = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    // =========================================================================
    // EXTERNAL SIGNALS (read each spawn tick, never mutated by the core)
    // =========================================================================

    /// Set the field-activity scalar, clamped to [0, 100].
    pub fn set_activity(&mut self, activity: f32) {
        self.activity = activity.clamp(0.0, 100.0);
    }

    /// Current field-activity scalar.
    pub fn activity(&self) -> f32 {
        self.activity
    }

    /// Gate the rare threat category on or off.
    pub fn set_secure_session(&mut self, secure: bool) {
        self.secure_session = secure;
    }

    // =========================================================================
    // COOPERATIVE SCHEDULING
    // =========================================================================

    /// Advance the slow timers: fire due spawn ticks and refresh the
    /// mirror when its interval elapsed. Call once per event-loop
    /// iteration; no-ops while stopped.
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        if let Some(signal) = self.activity_signal.as_mut() {
            let elapsed = self
                .started_at
                .map(|t| now.saturating_duration_since(t).as_secs_f32())
                .unwrap_or(0.0);
            self.activity = signal(elapsed).clamp(0.0, 100.0);
        }
        for _ in 0..self.spawn_timer.fire(now) {
            self.spawner.tick(
                &mut self.rng,
                &mut self.field,
                self.extent,
                self.activity,
                self.secure_session,
            );
        }
        self.mirror.poll(now, &self.field);
    }

    /// Run one render frame: aging/eviction first, then the draw pass.
    /// No-ops while stopped, leaving the surface untouched.
    pub fn frame(&mut self, surface: &mut dyn Surface) {
        if !self.running {
            return;
        }
        let (w, h) = surface.size();
        self.set_extent(w, h);
        self.lifecycle
            .age_frame(&mut self.rng, &mut self.field, self.extent);
        self.renderer
            .frame(&self.field, &self.lifecycle, self.linker.as_ref(), surface);
    }

    // =========================================================================
    // DIRECT PASSES (used by the scheduler above and by tests/headless callers)
    // =========================================================================

    /// Execute one spawn tick immediately, bypassing the timer.
    pub fn spawn_tick(&mut self) {
        self.spawner.tick(
            &mut self.rng,
            &mut self.field,
            self.extent,
            self.activity,
            self.secure_session,
        );
    }

    /// Execute one aging/eviction pass immediately.
    pub fn age_frame(&mut self) {
        self.lifecycle
            .age_frame(&mut self.rng, &mut self.field, self.extent);
    }

    // =========================================================================
    // READ-ONLY STATE
    // =========================================================================

    /// The bounded particle collection.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Derived connections for the current state; empty when proximity
    /// linking is not configured.
    pub fn connections(&self) -> Vec<Connection> {
        match &self.linker {
            Some(linker) => linker.links(&self.field),
            None => Vec::new(),
        }
    }

    /// Last mirrored summary; reading never drains or resets the core.
    pub fn summary(&self) -> FieldSummary {
        self.mirror.latest()
    }

    /// The configured lifecycle (lifetime, fade, drift).
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}
