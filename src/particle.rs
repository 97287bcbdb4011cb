//! The particle data model.
//!
//! A [`Particle`] is a short-lived point entity: a 2D position, a bounded
//! intensity scalar, a fixed [`Category`] and a monotonically increasing
//! age. Particles are created by the spawner, aged and eventually evicted
//! by the lifecycle pass, and only ever read by everything else.

use crate::surface::Rgba;
use glam::Vec2;

/// Upper bound of the intensity scale.
pub const INTENSITY_MAX: f32 = 100.0;

/// Closed set of semantic/visual particle categories.
///
/// [`Category::Threat`] is the rare alert category: it is only eligible
/// for spawning while the secure-session flag is set, and then only with
/// a separate low probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Constructive resonance (green).
    Resonance,
    /// Disruptive interference (red).
    Disruption,
    /// Stable harmony (cyan).
    Harmony,
    /// Chaotic fluctuation (orange).
    Chaos,
    /// Elevated threat marker (orange), gated by the secure-session flag.
    Threat,
}

impl Category {
    /// Number of categories, for histogram arrays.
    pub const COUNT: usize = 5;

    /// Every category, indexable by [`Category::index`].
    pub const ALL: [Category; Self::COUNT] = [
        Category::Resonance,
        Category::Disruption,
        Category::Harmony,
        Category::Chaos,
        Category::Threat,
    ];

    /// Categories eligible for ordinary (uniform) spawning.
    pub const COMMON: [Category; 4] = [
        Category::Resonance,
        Category::Disruption,
        Category::Harmony,
        Category::Chaos,
    ];

    /// Stable index of this category within [`Category::ALL`].
    pub fn index(self) -> usize {
        match self {
            Category::Resonance => 0,
            Category::Disruption => 1,
            Category::Harmony => 2,
            Category::Chaos => 3,
            Category::Threat => 4,
        }
    }

    /// Base color for this category.
    ///
    /// A data table rather than per-call-site branching: adding a category
    /// means adding a row here, not editing the renderer.
    pub fn color(self) -> Rgba {
        match self {
            Category::Resonance => Rgba::opaque(0, 255, 136),
            Category::Disruption => Rgba::opaque(255, 51, 102),
            Category::Harmony => Rgba::opaque(0, 212, 255),
            Category::Chaos => Rgba::opaque(255, 136, 0),
            Category::Threat => Rgba::opaque(255, 136, 0),
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Resonance => "resonance",
            Category::Disruption => "disruption",
            Category::Harmony => "harmony",
            Category::Chaos => "chaos",
            Category::Threat => "threat",
        }
    }
}

/// One visual unit of the field.
///
/// Invariants: `age >= 0` and non-decreasing until removal; `intensity`
/// stays within `0..=INTENSITY_MAX`; `category` never changes after
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in surface pixel coordinates.
    pub position: Vec2,
    /// Bounded scalar in `0..=INTENSITY_MAX`; drives radius and glow size.
    pub intensity: f32,
    /// Fixed semantic/visual tag.
    pub category: Category,
    /// Simulated milliseconds since spawn.
    pub age: f32,
}

impl Particle {
    /// Create a newborn particle with age 0 and clamped intensity.
    pub fn new(position: Vec2, intensity: f32, category: Category) -> Self {
        Self {
            position,
            intensity: intensity.clamp(0.0, INTENSITY_MAX),
            category,
            age: 0.0,
        }
    }
}
