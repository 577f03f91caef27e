//! The arrow grid: a one-time sampling of the field at regular intervals.
//!
//! Each cell visualizes the field's direction (rotation) and magnitude
//! (color) at its sample point. The grid is built once before the frame
//! loop and never changes afterward; the field is static for the program's
//! lifetime.

use flowfield_core::colormap::{color_from_magnitude, ColorRange, Rgba};
use flowfield_core::error::FlowError;
use flowfield_core::field::FlowField;
use flowfield_core::scene::SceneConfig;
use flowfield_core::vec2::{angle_degrees, magnitude};
use glam::DVec2;

/// One arrow of the grid: a fixed sample position with its derived rotation
/// and color. Immutable after the setup pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowCell {
    /// Grid-aligned sample position (cell center).
    pub position: DVec2,
    /// Rotation of the arrow glyph, clockwise degrees from +x.
    pub rotation_degrees: f64,
    /// Magnitude-mapped fill color.
    pub color: Rgba,
}

/// A row-major `rows x cols` grid of [`ArrowCell`]s plus the magnitude range
/// they were colored against.
///
/// Dynamically sized from the scene config; the shape is fixed after
/// construction.
#[derive(Debug, Clone)]
pub struct ArrowGrid {
    rows: usize,
    cols: usize,
    cells: Vec<ArrowCell>,
    range: ColorRange,
}

impl ArrowGrid {
    /// Builds the grid by sampling `field` once per cell.
    ///
    /// Sample points sit at cell centers of an equal partition of the
    /// canvas: `((col + 0.5) * W / cols, (row + 0.5) * H / rows)`. The
    /// field is sampled exactly once per cell; the cached vector yields
    /// both the rotation (via `angle_degrees`; a zero sample maps to angle
    /// 0, not NaN) and, together with the grid-wide magnitude range, the
    /// color.
    ///
    /// Returns `FlowError::InvalidGrid` when the config's rows or cols are
    /// zero.
    pub fn build<F>(config: &SceneConfig, field: &F) -> Result<Self, FlowError>
    where
        F: FlowField + ?Sized,
    {
        let rows = config.grid_rows;
        let cols = config.grid_cols;
        if rows == 0 || cols == 0 {
            return Err(FlowError::InvalidGrid { rows, cols });
        }

        let cell_w = config.canvas_width / cols as f64;
        let cell_h = config.canvas_height / rows as f64;

        let mut samples = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let position = DVec2::new(
                    (col as f64 + 0.5) * cell_w,
                    (row as f64 + 0.5) * cell_h,
                );
                let vector = field.sample(position);
                samples.push((position, vector, magnitude(vector)));
            }
        }

        let range = ColorRange::of(samples.iter().map(|&(_, _, m)| m))?;
        tracing::debug!(
            rows,
            cols,
            min = range.min,
            max = range.max,
            "arrow grid sampled"
        );

        let cells = samples
            .into_iter()
            .map(|(position, vector, mag)| ArrowCell {
                position,
                rotation_degrees: angle_degrees(vector),
                color: color_from_magnitude(mag, range, config.arrow_opacity),
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            cells,
            range,
        })
    }

    /// Grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The magnitude range the grid was colored against.
    pub fn range(&self) -> ColorRange {
        self.range
    }

    /// The cell at `(row, col)`, or `None` out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&ArrowCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &ArrowCell> {
        self.cells.iter()
    }
}
