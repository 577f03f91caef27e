//! Software rasterizer implementing [`Surface`] on an RGBA8 framebuffer.
//!
//! This is the offline presentation backend: no window, no timing, never a
//! close request. Polygons are filled with an even-odd scanline test at
//! pixel centers; all drawing uses source-over alpha blending against an
//! opaque black background. Good enough for arrow glyphs and 1-pixel
//! tracers; not a general-purpose rasterizer.

use crate::surface::Surface;
use flowfield_core::error::FlowError;
use flowfield_core::scene::SceneConfig;
use flowfield_core::Rgba;
use glam::DVec2;

#[cfg(feature = "png")]
use std::path::Path;

/// Frame background.
const BACKGROUND: Rgba = Rgba::new(0, 0, 0, 255);

/// An RGBA8 framebuffer that accepts the core's draw traffic.
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Creates a framebuffer of the given pixel dimensions, cleared to the
    /// background color.
    ///
    /// Returns `FlowError::InvalidDimensions` if either dimension is zero
    /// or the buffer size overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FlowError::InvalidDimensions)?;
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; len],
        };
        surface.clear();
        Ok(surface)
    }

    /// Creates a framebuffer sized to the scene's canvas, rounding up to
    /// whole pixels.
    pub fn for_config(config: &SceneConfig) -> Result<Self, FlowError> {
        config.validate()?;
        Self::new(
            config.canvas_width.ceil() as usize,
            config.canvas_height.ceil() as usize,
        )
    }

    /// Framebuffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Framebuffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The color at pixel `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Rgba::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Source-over blends `color` onto the pixel at `(x, y)`; out-of-bounds
    /// coordinates are clipped.
    fn blend_pixel(&mut self, x: isize, y: isize, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = color.a as u32;
        let inv = 255 - a;
        for (offset, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = self.pixels[idx + offset] as u32;
            self.pixels[idx + offset] = ((src as u32 * a + dst * inv + 127) / 255) as u8;
        }
        // The canvas itself stays opaque.
        self.pixels[idx + 3] = 255;
    }

    /// Writes the framebuffer as a PNG image.
    #[cfg(feature = "png")]
    pub fn write_png(&self, path: &Path) -> Result<(), FlowError> {
        let w = u32::try_from(self.width).map_err(|_| FlowError::InvalidDimensions)?;
        let h = u32::try_from(self.height).map_err(|_| FlowError::InvalidDimensions)?;
        let img = image::RgbaImage::from_raw(w, h, self.pixels.clone())
            .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
        img.save(path).map_err(|e| FlowError::Io(e.to_string()))
    }
}

/// Even-odd point-in-polygon test via ray crossing.
fn point_in_polygon(pt: DVec2, poly: &[DVec2]) -> bool {
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > pt.y) != (pj.y > pt.y) {
            let x_cross = pi.x + (pt.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

impl Surface for RasterSurface {
    /// The offline surface never closes; callers bound the frame count.
    fn close_requested(&mut self) -> bool {
        false
    }

    fn clear(&mut self) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk[0] = BACKGROUND.r;
            chunk[1] = BACKGROUND.g;
            chunk[2] = BACKGROUND.b;
            chunk[3] = BACKGROUND.a;
        }
    }

    fn draw_polygon(
        &mut self,
        outline: &[DVec2],
        position: DVec2,
        rotation_degrees: f64,
        scale: f64,
        color: Rgba,
    ) {
        if outline.len() < 3 || scale <= 0.0 {
            return;
        }
        let theta = rotation_degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let transformed: Vec<DVec2> = outline
            .iter()
            .map(|v| {
                position + scale * DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
            })
            .collect();

        let min_x = transformed.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = transformed
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_y = transformed.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = transformed
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);

        let x0 = min_x.floor().max(0.0) as isize;
        let x1 = max_x.ceil().min(self.width as f64) as isize;
        let y0 = min_y.floor().max(0.0) as isize;
        let y1 = max_y.ceil().min(self.height as f64) as isize;

        for py in y0..y1 {
            for px in x0..x1 {
                let center = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                if point_in_polygon(center, &transformed) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0) as isize;
        let x1 = (center.x + radius).ceil().min(self.width as f64) as isize;
        let y0 = (center.y - radius).floor().max(0.0) as isize;
        let y1 = (center.y + radius).ceil().min(self.height as f64) as isize;
        let r_sq = radius * radius;

        for py in y0..y1 {
            for px in x0..x1 {
                let d = DVec2::new(px as f64 + 0.5, py as f64 + 0.5) - center;
                if d.length_squared() <= r_sq {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE_RED: Rgba = Rgba::new(255, 0, 0, 255);
    const OPAQUE_WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            RasterSurface::new(0, 100),
            Err(FlowError::InvalidDimensions)
        ));
        assert!(matches!(
            RasterSurface::new(100, 0),
            Err(FlowError::InvalidDimensions)
        ));
    }

    #[test]
    fn new_starts_cleared_to_background() {
        let surface = RasterSurface::new(4, 4).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(surface.pixel(3, 3), Some(BACKGROUND));
    }

    #[test]
    fn for_config_rounds_canvas_up() {
        let config = SceneConfig {
            canvas_width: 10.5,
            canvas_height: 8.0,
            ..Default::default()
        };
        let surface = RasterSurface::for_config(&config).unwrap();
        assert_eq!(surface.width(), 11);
        assert_eq!(surface.height(), 8);
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let surface = RasterSurface::new(4, 4).unwrap();
        assert!(surface.pixel(4, 0).is_none());
        assert!(surface.pixel(0, 4).is_none());
    }

    #[test]
    fn opaque_circle_paints_its_center() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.draw_circle(DVec2::new(10.0, 10.0), 3.0, OPAQUE_RED);
        assert_eq!(surface.pixel(10, 10), Some(OPAQUE_RED));
        // Well outside the disc stays background.
        assert_eq!(surface.pixel(1, 1), Some(BACKGROUND));
    }

    #[test]
    fn zero_radius_circle_draws_nothing() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.draw_circle(DVec2::new(4.0, 4.0), 0.0, OPAQUE_RED);
        assert!(surface
            .pixels()
            .chunks_exact(4)
            .all(|c| c == [0, 0, 0, 255]));
    }

    #[test]
    fn half_alpha_blends_toward_background() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.draw_circle(DVec2::new(4.0, 4.0), 2.0, Rgba::new(255, 0, 0, 128));
        let c = surface.pixel(4, 4).unwrap();
        assert!((127..=129).contains(&c.r), "blended red = {}", c.r);
        assert_eq!(c.g, 0);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn polygon_fills_its_interior() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        let triangle = [
            DVec2::new(-5.0, -5.0),
            DVec2::new(5.0, -5.0),
            DVec2::new(0.0, 5.0),
        ];
        surface.draw_polygon(&triangle, DVec2::new(10.0, 10.0), 0.0, 1.0, OPAQUE_WHITE);
        assert_eq!(surface.pixel(10, 10), Some(OPAQUE_WHITE));
        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
    }

    #[test]
    fn polygon_rotation_moves_coverage() {
        // A thin bar along +x; rotated 90 degrees it must cover below the
        // origin (y-down) instead of to the right.
        let bar = [
            DVec2::new(0.0, -1.0),
            DVec2::new(8.0, -1.0),
            DVec2::new(8.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let mut flat = RasterSurface::new(32, 32).unwrap();
        flat.draw_polygon(&bar, DVec2::new(16.0, 16.0), 0.0, 1.0, OPAQUE_WHITE);
        assert_eq!(flat.pixel(20, 16), Some(OPAQUE_WHITE));

        let mut turned = RasterSurface::new(32, 32).unwrap();
        turned.draw_polygon(&bar, DVec2::new(16.0, 16.0), 90.0, 1.0, OPAQUE_WHITE);
        assert_eq!(turned.pixel(16, 20), Some(OPAQUE_WHITE));
        assert_eq!(turned.pixel(20, 16), Some(BACKGROUND));
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.draw_polygon(
            &[DVec2::ZERO, DVec2::new(1.0, 1.0)],
            DVec2::new(4.0, 4.0),
            0.0,
            1.0,
            OPAQUE_WHITE,
        );
        assert!(surface
            .pixels()
            .chunks_exact(4)
            .all(|c| c == [0, 0, 0, 255]));
    }

    #[test]
    fn off_canvas_drawing_is_clipped() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.draw_circle(DVec2::new(-100.0, -100.0), 5.0, OPAQUE_RED);
        surface.draw_circle(DVec2::new(100.0, 100.0), 5.0, OPAQUE_RED);
        assert!(surface
            .pixels()
            .chunks_exact(4)
            .all(|c| c == [0, 0, 0, 255]));
    }

    #[test]
    fn clear_resets_previous_frame() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.draw_circle(DVec2::new(4.0, 4.0), 2.0, OPAQUE_RED);
        surface.clear();
        assert!(surface
            .pixels()
            .chunks_exact(4)
            .all(|c| c == [0, 0, 0, 255]));
    }

    #[test]
    fn never_requests_close() {
        let mut surface = RasterSurface::new(4, 4).unwrap();
        for _ in 0..10 {
            assert!(!surface.close_requested());
        }
    }

    #[cfg(feature = "png")]
    #[test]
    fn write_png_round_trip() {
        let mut surface = RasterSurface::new(16, 12).unwrap();
        surface.draw_circle(DVec2::new(8.0, 6.0), 3.0, OPAQUE_RED);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        surface.write_png(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 12);
        assert_eq!(img.get_pixel(8, 6).0, [255, 0, 0, 255]);
    }
}
