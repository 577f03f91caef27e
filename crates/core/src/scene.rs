//! Scene configuration: every startup tunable in one serializable struct.
//!
//! A [`SceneConfig`] captures everything needed to reproduce a run: canvas
//! size, grid resolution, arrow styling, particle swarm parameters, the
//! active field name with its params, and the PRNG seed. Two identical
//! configs produce bit-identical simulations.

use crate::error::FlowError;
use crate::field::FieldKind;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Default canvas width.
const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
/// Default canvas height.
const DEFAULT_CANVAS_HEIGHT: f64 = 700.0;
/// Arrow columns across the canvas.
const DEFAULT_GRID_COLS: usize = 40;
/// Arrow rows down the canvas.
const DEFAULT_GRID_ROWS: usize = 30;
/// Arrow fill opacity, 0-255.
const DEFAULT_ARROW_OPACITY: u8 = 100;
/// Uniform scale applied to the arrow glyph.
const DEFAULT_ARROW_SCALE: f64 = 0.3;
/// Tracer particle count.
const DEFAULT_NUM_PARTICLES: usize = 8000;
/// Tracer radius in canvas units.
const DEFAULT_PARTICLE_SIZE: f64 = 1.0;
/// Per-frame displacement factor applied to the sampled field vector.
const DEFAULT_PARTICLE_SPEED: f64 = 0.1;
/// Default active field.
const DEFAULT_FIELD: &str = "swirl";
/// Default PRNG seed.
const DEFAULT_SEED: u64 = 42;

/// Startup configuration for a flowfield scene.
///
/// All values are fixed once the simulation is constructed; there is no
/// runtime reconfiguration. `num_particles` may be zero (arrow grid only).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    /// Canvas width in canvas units.
    pub canvas_width: f64,
    /// Canvas height in canvas units.
    pub canvas_height: f64,
    /// Arrow grid rows.
    pub grid_rows: usize,
    /// Arrow grid columns.
    pub grid_cols: usize,
    /// Arrow fill opacity (alpha channel for in-range colors).
    pub arrow_opacity: u8,
    /// Uniform scale of the arrow glyph.
    pub arrow_scale: f64,
    /// Number of tracer particles.
    pub num_particles: usize,
    /// Tracer radius.
    pub particle_size: f64,
    /// Per-frame displacement factor; not a physical velocity.
    pub particle_speed: f64,
    /// Active field name (see `FieldKind::list_fields`).
    pub field: String,
    /// Free-form field parameters (noise scale/strength, swirl wavelength).
    pub field_params: serde_json::Value,
    /// Seed for particle scatter and noise fields.
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            arrow_opacity: DEFAULT_ARROW_OPACITY,
            arrow_scale: DEFAULT_ARROW_SCALE,
            num_particles: DEFAULT_NUM_PARTICLES,
            particle_size: DEFAULT_PARTICLE_SIZE,
            particle_speed: DEFAULT_PARTICLE_SPEED,
            field: DEFAULT_FIELD.to_string(),
            field_params: serde_json::Value::Object(serde_json::Map::new()),
            seed: DEFAULT_SEED,
        }
    }
}

impl SceneConfig {
    /// The canvas midpoint, on which centered fields pivot.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Validates every tunable.
    ///
    /// Rejects non-finite or non-positive canvas dimensions, a zero-row or
    /// zero-column grid, and non-finite particle speed/size or arrow scale.
    /// A particle count of zero is valid.
    pub fn validate(&self) -> Result<(), FlowError> {
        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0)
            || !(self.canvas_height.is_finite() && self.canvas_height > 0.0)
        {
            return Err(FlowError::InvalidDimensions);
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(FlowError::InvalidGrid {
                rows: self.grid_rows,
                cols: self.grid_cols,
            });
        }
        if !self.particle_speed.is_finite() {
            return Err(FlowError::InvalidConfig(
                "particle_speed must be finite".into(),
            ));
        }
        if !self.particle_size.is_finite() || self.particle_size < 0.0 {
            return Err(FlowError::InvalidConfig(
                "particle_size must be finite and non-negative".into(),
            ));
        }
        if !self.arrow_scale.is_finite() || self.arrow_scale <= 0.0 {
            return Err(FlowError::InvalidConfig(
                "arrow_scale must be finite and positive".into(),
            ));
        }
        Ok(())
    }

    /// Builds the configured field.
    ///
    /// Returns `FlowError::UnknownField` if `field` names no registered field.
    pub fn build_field(&self) -> Result<FieldKind, FlowError> {
        FieldKind::from_name(&self.field, self.center(), &self.field_params, self.seed)
    }
}
