//! Proximity linking between nearby particles.
//!
//! For every unordered particle pair within a distance threshold, the
//! linker emits a [`Connection`] whose opacity falls off linearly with
//! distance. Connections are derived per frame and never stored.
//!
//! The scan is O(n²) by design: at the documented particle caps
//! (<= ~500) the full pairwise pass fits comfortably in a 60 Hz frame
//! budget, and the cap bounds the cost. Deployments that raise the cap
//! substantially should replace the scan with a spatial index (grid
//! buckets over the threshold distance); the pairwise pass is the
//! recommended default until then.

use crate::field::Field;

/// A derived edge between two particles within the link threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the older endpoint in field iteration order.
    pub a: usize,
    /// Index of the younger endpoint, always greater than `a`.
    pub b: usize,
    /// Stroke opacity in [0, base_opacity], higher when closer.
    pub opacity: f32,
}

/// Pairwise proximity scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linker {
    threshold: f32,
    base_opacity: f32,
}

impl Linker {
    /// Create a linker. Values validated upstream by the builder.
    pub(crate) fn new(threshold: f32, base_opacity: f32) -> Self {
        Self {
            threshold,
            base_opacity,
        }
    }

    /// Distance threshold in pixels; pairs at or beyond it never link.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Opacity of a zero-distance connection.
    pub fn base_opacity(&self) -> f32 {
        self.base_opacity
    }

    /// Collect all connections for the current field state.
    pub fn links(&self, field: &Field) -> Vec<Connection> {
        let mut out = Vec::new();
        self.links_into(field, &mut out);
        out
    }

    /// Like [`links`](Self::links) but reuses the caller's buffer, so the
    /// per-frame pass allocates nothing in the steady state.
    pub fn links_into(&self, field: &Field, out: &mut Vec<Connection>) {
        out.clear();
        let n = field.len();
        for i in 0..n {
            let pi = match field.get(i) {
                Some(p) => p,
                None => continue,
            };
            for j in (i + 1)..n {
                let pj = match field.get(j) {
                    Some(p) => p,
                    None => continue,
                };
                let distance = pi.position.distance(pj.position);
                if distance < self.threshold {
                    out.push(Connection {
                        a: i,
                        b: j,
                        opacity: self.base_opacity * (1.0 - distance / self.threshold),
                    });
                }
            }
        }
    }
}
