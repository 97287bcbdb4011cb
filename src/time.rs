//! Timing facilities for the cooperative scheduler.
//!
//! The simulation runs three independent cadences on one thread: the
//! spawn tick, the render frame and the mirror sample. [`IntervalTimer`]
//! turns wall-clock instants into "how many periods elapsed" so the
//! timers stay pull-based; nothing fires after the owner stops polling.
//! [`FrameClock`] tracks per-frame delta and FPS for display.

use std::time::{Duration, Instant};

/// Missed periods replayed at most per poll after a stall.
///
/// A suspended event loop would otherwise burst every missed spawn tick
/// at once on resume, defeating the throttled growth rate.
const MAX_CATCH_UP: u32 = 4;

/// Fixed-period timer polled with [`IntervalTimer::fire`].
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    last: Option<Instant>,
}

impl IntervalTimer {
    /// Create a timer with the given period. Zero periods are rejected
    /// upstream at configuration time.
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of whole periods elapsed since the last poll, capped.
    ///
    /// The first poll after construction or [`reset`](Self::reset) arms
    /// the timer and returns 0. When more than `MAX_CATCH_UP` periods
    /// elapsed, the backlog is dropped and the timer re-arms at `now`.
    pub fn fire(&mut self, now: Instant) -> u32 {
        let last = match self.last {
            Some(last) => last,
            None => {
                self.last = Some(now);
                return 0;
            }
        };
        let elapsed = now.saturating_duration_since(last);
        let ticks = (elapsed.as_nanos() / self.period.as_nanos().max(1)) as u32;
        if ticks == 0 {
            return 0;
        }
        if ticks > MAX_CATCH_UP {
            self.last = Some(now);
            return MAX_CATCH_UP;
        }
        self.last = Some(last + self.period * ticks);
        ticks
    }

    /// Disarm the timer; the next poll arms it again without firing.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Per-frame clock: delta time, frame count and a periodically updated
/// FPS estimate.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame. Call once per redraw.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// Seconds since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds between the two most recent frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames recorded.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Smoothed frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_arms_without_firing() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        assert_eq!(timer.fire(Instant::now()), 0);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.fire(t0);
        assert_eq!(timer.fire(t0 + Duration::from_millis(50)), 0);
        assert_eq!(timer.fire(t0 + Duration::from_millis(100)), 1);
        assert_eq!(timer.fire(t0 + Duration::from_millis(150)), 0);
        assert_eq!(timer.fire(t0 + Duration::from_millis(350)), 2);
    }

    #[test]
    fn test_catch_up_is_capped_after_stall() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.fire(t0);
        // Ten seconds of backlog replays at most MAX_CATCH_UP ticks
        assert_eq!(timer.fire(t0 + Duration::from_secs(10)), MAX_CATCH_UP);
        // Backlog was dropped, not deferred
        assert_eq!(
            timer.fire(t0 + Duration::from_secs(10) + Duration::from_millis(50)),
            0
        );
    }

    #[test]
    fn test_reset_disarms() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.fire(t0);
        timer.reset();
        assert_eq!(timer.fire(t0 + Duration::from_secs(1)), 0);
    }

    #[test]
    fn test_frame_clock_counts_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        clock.update();
        clock.update();
        assert_eq!(clock.frame(), 2);
        assert!(clock.delta() >= 0.0);
    }
}
