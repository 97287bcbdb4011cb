//! The bounded particle collection.
//!
//! An insertion-ordered store with a hard capacity: insertion order equals
//! age order in the common case (newborns go to the back), and when the
//! cap is exceeded the oldest entries are dropped first in one batched
//! trim. The field is mutated only by the spawner and the lifecycle pass;
//! every other component reads it.

use crate::particle::{Category, Particle};
use std::collections::VecDeque;

/// Bounded, insertion-ordered particle collection.
///
/// Length never exceeds the configured capacity. Excess entries are
/// removed oldest-first, never newest.
pub struct Field {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl Field {
    /// Create an empty field. `capacity` is validated upstream to be >= 1.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Configured hard cap.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate particles oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Particle at insertion index, oldest-first.
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Per-category population counts, indexed by [`Category::index`].
    pub fn histogram(&self) -> [u32; Category::COUNT] {
        let mut counts = [0u32; Category::COUNT];
        for p in &self.particles {
            counts[p.category.index()] += 1;
        }
        counts
    }

    /// Append a newborn particle, then trim to capacity.
    ///
    /// The trim removes all excess entries in one operation rather than
    /// one-by-one, so a burst of inserts stays O(excess).
    pub(crate) fn push(&mut self, particle: Particle) {
        self.particles.push_back(particle);
        let excess = self.particles.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.particles.drain(..excess);
        }
    }

    /// Mutable iteration for the aging pass.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Batched removal pass: keep only particles matching the predicate.
    pub(crate) fn retain(&mut self, f: impl FnMut(&Particle) -> bool) {
        self.particles.retain(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn particle(tag: f32) -> Particle {
        // Encode a creation tag in the intensity for ordering assertions
        Particle::new(Vec2::ZERO, tag, Category::Harmony)
    }

    #[test]
    fn test_push_respects_capacity() {
        let mut field = Field::new(3);
        for i in 0..10 {
            field.push(particle(i as f32));
            assert!(field.len() <= 3);
        }
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_trim_drops_oldest_first() {
        // Cap 5, ten inserts: only the 5 most recent survive
        let mut field = Field::new(5);
        for i in 0..10 {
            field.push(particle(i as f32));
        }
        let survivors: Vec<f32> = field.iter().map(|p| p.intensity).collect();
        assert_eq!(survivors, vec![5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_histogram_counts_by_category() {
        let mut field = Field::new(10);
        field.push(Particle::new(Vec2::ZERO, 1.0, Category::Resonance));
        field.push(Particle::new(Vec2::ZERO, 1.0, Category::Resonance));
        field.push(Particle::new(Vec2::ZERO, 1.0, Category::Threat));
        let h = field.histogram();
        assert_eq!(h[Category::Resonance.index()], 2);
        assert_eq!(h[Category::Threat.index()], 1);
        assert_eq!(h[Category::Chaos.index()], 0);
        assert_eq!(h.iter().sum::<u32>() as usize, field.len());
    }

    #[test]
    fn test_retain_removes_in_one_pass() {
        let mut field = Field::new(10);
        for i in 0..6 {
            field.push(particle(i as f32));
        }
        field.retain(|p| p.intensity >= 3.0);
        assert_eq!(field.len(), 3);
        assert!(field.iter().all(|p| p.intensity >= 3.0));
    }
}
