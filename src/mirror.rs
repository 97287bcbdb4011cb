//! Low-frequency state mirror.
//!
//! Surrounding UI wants the particle count and a per-category histogram,
//! but re-rendering that UI 60 times per second for a number that changes
//! slowly is wasted work. The mirror samples the field on a coarse
//! interval (default 250 ms) and exposes the last snapshot; reading it
//! never drains or resets the core.

use crate::field::Field;
use crate::particle::Category;
use crate::time::IntervalTimer;
use std::time::{Duration, Instant};

/// Aggregate snapshot of the field for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSummary {
    /// Total live particles at sample time.
    pub count: usize,
    /// Per-category counts, indexed by [`Category::index`].
    pub histogram: [u32; Category::COUNT],
}

/// Coarse-interval sampler feeding [`FieldSummary`] to observers.
pub(crate) struct Mirror {
    timer: IntervalTimer,
    latest: FieldSummary,
}

impl Mirror {
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            timer: IntervalTimer::new(period),
            latest: FieldSummary::default(),
        }
    }

    /// Take a fresh sample if the interval elapsed. Returns whether the
    /// snapshot was refreshed.
    pub(crate) fn poll(&mut self, now: Instant, field: &Field) -> bool {
        if self.timer.fire(now) == 0 {
            return false;
        }
        self.sample(field);
        true
    }

    /// Take a sample unconditionally.
    pub(crate) fn sample(&mut self, field: &Field) {
        self.latest = FieldSummary {
            count: field.len(),
            histogram: field.histogram(),
        };
    }

    /// Most recent snapshot.
    pub(crate) fn latest(&self) -> FieldSummary {
        self.latest
    }

    /// Disarm the sampling timer (engine stop).
    pub(crate) fn reset(&mut self) {
        self.timer.reset();
    }
}
