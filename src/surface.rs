//! Abstract 2D drawing surface and the software raster implementation.
//!
//! The engine draws through the [`Surface`] trait so that the simulation
//! core never depends on how pixels reach the screen. The shipped
//! implementation is [`Pixmap`], a plain RGBA8 buffer with src-over
//! blending; the windowed runner blits it to the display every frame,
//! and headless callers can export frames as PNG.
//!
//! A surface may change size between frames (window resize); callers must
//! query [`Surface::size`] each frame rather than caching it.

use glam::Vec2;
use std::path::Path;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Construct a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale this color's alpha by a factor in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Minimal 2D drawing operations the renderer needs.
///
/// Mirrors what the frame pass actually uses: a translucent full-surface
/// fill for the trail effect, axis-aligned rects for the grid, lines for
/// connections, filled circles for particles and a radial-gradient glow.
pub trait Surface {
    /// Current surface size in pixels (width, height).
    fn size(&self) -> (u32, u32);

    /// Blend `color` over the entire surface.
    ///
    /// With a low-alpha color this produces the fading-trail effect
    /// instead of a hard clear.
    fn fade(&mut self, color: Rgba);

    /// Blend a filled axis-aligned rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba);

    /// Blend a one-pixel-wide line segment from `a` to `b`.
    fn line(&mut self, a: Vec2, b: Vec2, color: Rgba);

    /// Blend a filled circle with a softened edge.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Blend a radial glow: full `color` at the center falling off
    /// linearly to fully transparent at `radius`.
    fn glow(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// CPU-side RGBA8 pixel buffer implementing [`Surface`].
///
/// All drawing uses src-over alpha blending. Out-of-bounds draws are
/// clipped, never panic. The buffer only reallocates when the size
/// actually changes.
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Create a black, fully opaque pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pm = Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        };
        pm.resize(width, height);
        pm
    }

    /// Resize the buffer, discarding previous contents.
    ///
    /// No-op when the size is unchanged, so it is safe to call every frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.data = vec![0; (width * height * 4) as usize];
        // Opaque black background
        for px in self.data.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read a single pixel. Out-of-bounds reads return transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::new(0, 0, 0, 0);
        }
        let i = ((y * self.width + x) * 4) as usize;
        Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Write the current frame to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        img.save(path)
    }

    /// Blend `color` onto the pixel at (x, y) with extra `coverage` in [0, 1].
    fn blend(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let alpha = color.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let inv = 1.0 - alpha;
        self.data[i] = (color.r as f32 * alpha + self.data[i] as f32 * inv).round() as u8;
        self.data[i + 1] = (color.g as f32 * alpha + self.data[i + 1] as f32 * inv).round() as u8;
        self.data[i + 2] = (color.b as f32 * alpha + self.data[i + 2] as f32 * inv).round() as u8;
        self.data[i + 3] = (255.0 * alpha + self.data[i + 3] as f32 * inv).round() as u8;
    }
}

impl Surface for Pixmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fade(&mut self, color: Rgba) {
        let alpha = color.a as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let inv = 1.0 - alpha;
        let (r, g, b) = (
            color.r as f32 * alpha,
            color.g as f32 * alpha,
            color.b as f32 * alpha,
        );
        for px in self.data.chunks_exact_mut(4) {
            px[0] = (r + px[0] as f32 * inv).round() as u8;
            px[1] = (g + px[1] as f32 * inv).round() as u8;
            px[2] = (b + px[2] as f32 * inv).round() as u8;
            px[3] = (255.0 * alpha + px[3] as f32 * inv).round() as u8;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i32).min(self.width as i32);
        let y1 = (y + h as i32).min(self.height as i32);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.blend(xx, yy, color, 1.0);
            }
        }
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Rgba) {
        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps == 0 {
            self.blend(a.x.round() as i32, a.y.round() as i32, color, 1.0);
            return;
        }
        let step = delta / steps as f32;
        let mut p = a;
        for _ in 0..=steps {
            self.blend(p.x.round() as i32, p.y.round() as i32, color, 1.0);
            p += step;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor() as i32;
        let x1 = (center.x + radius).ceil() as i32;
        let y0 = (center.y - radius).floor() as i32;
        let y1 = (center.y + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                // One-pixel soft edge
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn glow(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor() as i32;
        let x1 = (center.x + radius).ceil() as i32;
        let y0 = (center.y - radius).floor() as i32;
        let y1 = (center.y + radius).ceil() as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let falloff = 1.0 - d / radius;
                if falloff > 0.0 {
                    self.blend(x, y, color, falloff);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_is_lazy() {
        let mut pm = Pixmap::new(10, 10);
        let ptr = pm.data().as_ptr();
        pm.resize(10, 10);
        assert_eq!(ptr, pm.data().as_ptr());
        pm.resize(20, 5);
        assert_eq!(pm.size(), (20, 5));
    }

    #[test]
    fn test_zero_size_clamps_to_one() {
        let pm = Pixmap::new(0, 0);
        assert_eq!(pm.size(), (1, 1));
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut pm = Pixmap::new(4, 4);
        pm.fill_rect(-10, -10, 100, 100, Rgba::opaque(255, 0, 0));
        pm.fill_circle(Vec2::new(-50.0, 2.0), 5.0, Rgba::opaque(0, 255, 0));
        pm.line(
            Vec2::new(-10.0, -10.0),
            Vec2::new(50.0, 50.0),
            Rgba::opaque(0, 0, 255),
        );
        assert_eq!(pm.pixel(0, 0).a, 255);
    }

    #[test]
    fn test_fade_blends_toward_color() {
        let mut pm = Pixmap::new(2, 2);
        pm.fill_rect(0, 0, 2, 2, Rgba::opaque(200, 200, 200));
        let before = pm.pixel(0, 0);
        pm.fade(Rgba::new(10, 10, 15, 26)); // ~0.1 alpha
        let after = pm.pixel(0, 0);
        assert!(after.r < before.r);
        assert!(after.r > 100, "a single low-alpha fade must not hard-clear");
    }

    #[test]
    fn test_fill_circle_center_is_solid() {
        let mut pm = Pixmap::new(20, 20);
        pm.fill_circle(Vec2::new(10.0, 10.0), 5.0, Rgba::opaque(0, 255, 136));
        let c = pm.pixel(10, 10);
        assert_eq!((c.r, c.g, c.b), (0, 255, 136));
        // Well outside the circle stays black
        let edge = pm.pixel(0, 0);
        assert_eq!((edge.r, edge.g, edge.b), (0, 0, 0));
    }

    #[test]
    fn test_glow_fades_with_distance() {
        let mut pm = Pixmap::new(40, 40);
        pm.glow(Vec2::new(20.0, 20.0), 15.0, Rgba::opaque(0, 212, 255));
        let near = pm.pixel(20, 20);
        let far = pm.pixel(20, 32);
        assert!(near.b > far.b);
    }

    #[test]
    fn test_with_alpha_scales_and_clamps() {
        let c = Rgba::opaque(10, 20, 30);
        assert_eq!(c.with_alpha(0.5).a, 128);
        assert_eq!(c.with_alpha(2.0).a, 255);
        assert_eq!(c.with_alpha(-1.0).a, 0);
    }
}
