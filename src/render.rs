//! Frame rendering.
//!
//! One frame pass: blend a translucent fill over the whole surface (the
//! fading-trail effect), optionally draw the background grid, stroke the
//! proximity connections, then draw every particle as a filled circle
//! whose radius scales with intensity plus a larger radial glow fading to
//! transparent. The pass reads post-aging state only and touches nothing
//! but surface pixels.

use crate::field::Field;
use crate::lifecycle::Lifecycle;
use crate::linker::{Connection, Linker};
use crate::surface::{Rgba, Surface};

/// Background grid styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Distance between grid lines, in pixels.
    pub spacing: u32,
    /// Stroke color (usually very low alpha).
    pub color: Rgba,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            spacing: 50,
            color: Rgba::new(0, 212, 255, 26),
        }
    }
}

/// Visual configuration for the frame pass.
///
/// # Example
///
/// ```ignore
/// .with_visuals(|v| {
///     v.grid(GridStyle::default())
///      .particle_radius(2.0, 8.0)
///      .glow(2.0, 0.5)
/// })
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    /// Translucent overlay blended over the previous frame; low alpha
    /// produces trails instead of a hard clear.
    fade_color: Rgba,
    /// Optional background grid.
    grid: Option<GridStyle>,
    /// Base particle radius at zero intensity, in pixels.
    radius_base: f32,
    /// Additional radius at full intensity, in pixels.
    radius_span: f32,
    /// Glow radius as a multiple of the particle radius.
    glow_scale: f32,
    /// Glow center opacity relative to the particle's opacity.
    glow_opacity: f32,
    /// Stroke color for connection lines (alpha scaled per link).
    link_color: Rgba,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            fade_color: Rgba::new(10, 10, 15, 26),
            grid: None,
            radius_base: 2.0,
            radius_span: 8.0,
            glow_scale: 2.0,
            glow_opacity: 0.5,
            link_color: Rgba::opaque(0, 212, 255),
        }
    }
}

impl VisualConfig {
    /// Create the default visual configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fade overlay color; its alpha controls trail length.
    pub fn fade(mut self, color: Rgba) -> Self {
        self.fade_color = color;
        self
    }

    /// Enable the background grid.
    pub fn grid(mut self, style: GridStyle) -> Self {
        self.grid = Some(style);
        self
    }

    /// Set particle radius mapping: `base + intensity/100 * span` pixels.
    pub fn particle_radius(mut self, base: f32, span: f32) -> Self {
        self.radius_base = base;
        self.radius_span = span;
        self
    }

    /// Set glow sizing and strength relative to the particle circle.
    pub fn glow(mut self, scale: f32, opacity: f32) -> Self {
        self.glow_scale = scale;
        self.glow_opacity = opacity;
        self
    }

    /// Set the connection stroke color.
    pub fn link_color(mut self, color: Rgba) -> Self {
        self.link_color = color;
        self
    }

    /// Radius in pixels for a given intensity.
    pub fn radius_for(&self, intensity: f32) -> f32 {
        self.radius_base + intensity / crate::particle::INTENSITY_MAX * self.radius_span
    }
}

/// Executes the frame pass. Owns a scratch buffer so the steady-state
/// frame allocates nothing.
pub(crate) struct Renderer {
    config: VisualConfig,
    scratch: Vec<Connection>,
}

impl Renderer {
    pub(crate) fn new(config: VisualConfig) -> Self {
        Self {
            config,
            scratch: Vec::new(),
        }
    }

    pub(crate) fn config(&self) -> &VisualConfig {
        &self.config
    }

    /// Draw one frame of the given (already aged) field state.
    pub(crate) fn frame(
        &mut self,
        field: &Field,
        lifecycle: &Lifecycle,
        linker: Option<&Linker>,
        surface: &mut dyn Surface,
    ) {
        let (width, height) = surface.size();
        surface.fade(self.config.fade_color);

        if let Some(grid) = self.config.grid {
            let spacing = grid.spacing.max(1) as i32;
            let mut x = 0;
            while x < width as i32 {
                surface.fill_rect(x, 0, 1, height, grid.color);
                x += spacing;
            }
            let mut y = 0;
            while y < height as i32 {
                surface.fill_rect(0, y, width, 1, grid.color);
                y += spacing;
            }
        }

        if let Some(linker) = linker {
            linker.links_into(field, &mut self.scratch);
            for link in &self.scratch {
                // Indices come from the same snapshot the scan just read
                let (a, b) = match (field.get(link.a), field.get(link.b)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                surface.line(
                    a.position,
                    b.position,
                    self.config.link_color.with_alpha(link.opacity),
                );
            }
        }

        for p in field.iter() {
            let opacity = lifecycle.opacity(p.age);
            let radius = self.config.radius_for(p.intensity);
            let color = p.category.color().with_alpha(opacity);
            surface.fill_circle(p.position, radius, color);
            surface.glow(
                p.position,
                radius * self.config.glow_scale,
                color.with_alpha(self.config.glow_opacity),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Category, Particle};
    use crate::surface::Pixmap;
    use glam::Vec2;

    #[test]
    fn test_radius_scales_with_intensity() {
        let v = VisualConfig::new().particle_radius(2.0, 8.0);
        assert_eq!(v.radius_for(0.0), 2.0);
        assert_eq!(v.radius_for(100.0), 10.0);
        assert_eq!(v.radius_for(50.0), 6.0);
        // Pure intensity/10 mapping used by the grid-backed field view
        let v = VisualConfig::new().particle_radius(0.0, 10.0);
        assert_eq!(v.radius_for(60.0), 6.0);
    }

    #[test]
    fn test_frame_draws_particle_pixels() {
        let mut field = Field::new(10);
        field.push(Particle::new(Vec2::new(50.0, 50.0), 100.0, Category::Resonance));
        let lifecycle = Lifecycle::new().lifetime(1000.0);
        let mut surface = Pixmap::new(100, 100);
        let mut renderer = Renderer::new(VisualConfig::new());

        renderer.frame(&field, &lifecycle, None, &mut surface);
        let c = surface.pixel(50, 50);
        assert!(c.g > 100, "particle center should be brightly colored");
    }

    #[test]
    fn test_frame_draws_connection_between_close_particles() {
        let mut field = Field::new(10);
        field.push(Particle::new(Vec2::new(10.0, 50.0), 0.0, Category::Harmony));
        field.push(Particle::new(Vec2::new(60.0, 50.0), 0.0, Category::Harmony));
        let lifecycle = Lifecycle::new().lifetime(1000.0);
        let linker = Linker::new(80.0, 1.0);
        let mut surface = Pixmap::new(100, 100);
        let mut renderer = Renderer::new(VisualConfig::new().particle_radius(0.0, 0.0).glow(0.0, 0.0));

        renderer.frame(&field, &lifecycle, Some(&linker), &mut surface);
        // Midpoint of the segment carries the link stroke
        let mid = surface.pixel(35, 50);
        assert!(mid.b > 0);
    }

    #[test]
    fn test_grid_lines_at_spacing() {
        let field = Field::new(1);
        let lifecycle = Lifecycle::new();
        let mut surface = Pixmap::new(120, 120);
        let style = GridStyle {
            spacing: 50,
            color: Rgba::opaque(0, 212, 255),
        };
        let mut renderer = Renderer::new(VisualConfig::new().grid(style));

        renderer.frame(&field, &lifecycle, None, &mut surface);
        assert!(surface.pixel(50, 10).b > 0);
        assert!(surface.pixel(10, 100).b > 0);
        assert_eq!(surface.pixel(26, 26).b, 0);
    }
}
