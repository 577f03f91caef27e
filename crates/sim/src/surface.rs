//! The presentation-surface seam between the simulation core and whatever
//! actually draws pixels.
//!
//! The core never touches a window or a framebuffer directly; it talks to a
//! [`Surface`] once per frame: one close-poll, one clear, a pass of polygon
//! and circle submissions, one present. Implementations decide what those
//! mean (software raster, a windowed backend, a recording double).

use flowfield_core::Rgba;
use glam::DVec2;

/// The fixed 7-point arrow glyph, in glyph-local units relative to its
/// rotation origin (the midpoint of the tail line at the head base).
///
/// Unscaled, the glyph spans 90x38 units; scenes scale it down via
/// `SceneConfig::arrow_scale`.
pub const ARROW_OUTLINE: [DVec2; 7] = [
    DVec2::new(-30.0, -4.0),
    DVec2::new(0.0, -4.0),
    DVec2::new(0.0, -14.0),
    DVec2::new(20.0, -2.0),
    DVec2::new(0.0, 10.0),
    DVec2::new(0.0, 0.0),
    DVec2::new(-30.0, 0.0),
];

/// A rendering/presentation collaborator.
///
/// Object-safe so backends can be swapped behind `&mut dyn Surface`. The
/// frame loop calls these in a strict sequence: `close_requested`, then the
/// draw pass bracketed by `clear` and `present`. Implementations must not
/// assume any other ordering.
pub trait Surface {
    /// Whether the user asked to close the surface. Polled once per frame,
    /// at the top of the loop.
    fn close_requested(&mut self) -> bool;

    /// Erases the previous frame.
    fn clear(&mut self);

    /// Submits a filled polygon: `outline` vertices in glyph-local units,
    /// rotated clockwise by `rotation_degrees` (y-down convention), scaled
    /// uniformly, then translated to `position`.
    fn draw_polygon(
        &mut self,
        outline: &[DVec2],
        position: DVec2,
        rotation_degrees: f64,
        scale: f64,
        color: Rgba,
    );

    /// Submits a filled circle of `radius` at `center`.
    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Finishes the frame.
    fn present(&mut self);
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// A polygon submission.
    Polygon {
        position: DVec2,
        rotation_degrees: f64,
        scale: f64,
        color: Rgba,
    },
    /// A circle submission.
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
}

/// A surface that records every call instead of drawing.
///
/// Used to assert on draw traffic (counts, colors, positions) without a
/// framebuffer, and to script a close request after a fixed number of polls.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Draw calls since the last clear.
    pub calls: Vec<DrawCall>,
    /// Number of `clear` calls observed.
    pub clears: usize,
    /// Number of `present` calls observed.
    pub presents: usize,
    polls: usize,
    close_after: Option<usize>,
}

impl RecordingSurface {
    /// Creates a surface that never requests close.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface that requests close on the `n`-th poll (1-based).
    pub fn close_after(n: usize) -> Self {
        Self {
            close_after: Some(n),
            ..Self::default()
        }
    }

    /// Circle submissions since the last clear.
    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }

    /// Polygon submissions since the last clear.
    pub fn polygon_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Polygon { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn close_requested(&mut self) -> bool {
        self.polls += 1;
        self.close_after.is_some_and(|n| self.polls >= n)
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.calls.clear();
    }

    fn draw_polygon(
        &mut self,
        _outline: &[DVec2],
        position: DVec2,
        rotation_degrees: f64,
        scale: f64,
        color: Rgba,
    ) {
        self.calls.push(DrawCall::Polygon {
            position,
            rotation_degrees,
            scale,
            color,
        });
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}
