//! Flow fields: pure mappings from a canvas position to a 2D vector.
//!
//! A [`FlowField`] assigns a vector to every point in the plane. The arrow
//! grid samples it at fixed points; the particle system samples it at every
//! particle position, every frame, so implementations must stay cheap and
//! allocation-free.
//!
//! All implementations are deterministic: same position produces the same
//! vector. Selection happens once, at configuration time, through
//! [`FieldKind::from_name`]; exactly one field is active per scene.

use crate::error::FlowError;
use crate::params::param_f64;
use glam::DVec2;
use noise::{NoiseFn, Perlin};
use serde_json::Value;

/// Default swirl wavelength in canvas units.
const SWIRL_WAVELENGTH: f64 = 70.0;
/// Horizontal shear divisor: dx per unit of dy.
const SHEAR_X_DIVISOR: f64 = 100.0;
/// Spatial frequency divisor of the shear field's vertical ripple.
const SHEAR_RIPPLE_FREQ: f64 = 10.0;
/// Amplitude divisor of the shear field's vertical ripple.
const SHEAR_RIPPLE_AMP: f64 = 10.0;
/// Default coordinate scale for the noise-driven fields.
const DEFAULT_NOISE_SCALE: f64 = 0.005;
/// Default output magnitude for the noise-driven fields.
const DEFAULT_NOISE_STRENGTH: f64 = 1.0;
/// Central-difference epsilon for the curl field, pre-scaling.
const CURL_EPS: f64 = 0.001;

/// A source of 2D vectors for field-based advection.
///
/// Implementations must be pure: no side effects, same input = same output.
pub trait FlowField: Send + Sync {
    /// Sample the field at canvas position `p`.
    fn sample(&self, p: DVec2) -> DVec2;
}

// ---------------------------------------------------------------------------
// Analytic fields (centered on the canvas midpoint)
// ---------------------------------------------------------------------------

/// The classic swirl: `(sin((dx+dy)/λ), cos((dx-dy)/λ))` about `center`.
///
/// Produces interleaved bands of circulation; magnitude stays in [0, sqrt(2)].
/// The wavelength λ defaults to 70 canvas units.
pub struct Swirl {
    center: DVec2,
    wavelength: f64,
}

/// Rigid rotation about `center`: `(-dy, dx)`.
///
/// In the y-down canvas convention this circulates clockwise, with magnitude
/// growing linearly with distance from the center.
pub struct Rotation {
    center: DVec2,
}

/// Radial scaling from `center`: `(dx, dy)` — straight outward flow.
pub struct Radial {
    center: DVec2,
}

/// Horizontal shear with a sinusoidal vertical ripple:
/// `(dy/100, sin(dx/10)/10)` about `center`.
pub struct Shear {
    center: DVec2,
}

// ---------------------------------------------------------------------------
// Noise-driven fields
// ---------------------------------------------------------------------------

/// Perlin noise displacement field: two offset noise samples form (dx, dy).
pub struct PerlinFlow {
    noise: Perlin,
    scale: f64,
    strength: f64,
}

/// Curl of scalar Perlin noise via central differences.
///
/// Approximately divergence-free, so particle density stays visually even.
pub struct CurlFlow {
    noise: Perlin,
    scale: f64,
    strength: f64,
    eps: f64,
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl Swirl {
    /// Creates the swirl field centered on `center` with the default wavelength.
    pub fn new(center: DVec2) -> Self {
        Self::with_wavelength(center, SWIRL_WAVELENGTH)
    }

    /// Creates a swirl field with a custom wavelength in canvas units.
    ///
    /// Non-positive wavelengths fall back to the default.
    pub fn with_wavelength(center: DVec2, wavelength: f64) -> Self {
        let wavelength = if wavelength > 0.0 {
            wavelength
        } else {
            SWIRL_WAVELENGTH
        };
        Self { center, wavelength }
    }
}

impl Rotation {
    /// Creates a rotation field about `center`.
    pub fn new(center: DVec2) -> Self {
        Self { center }
    }
}

impl Radial {
    /// Creates a radial field from `center`.
    pub fn new(center: DVec2) -> Self {
        Self { center }
    }
}

impl Shear {
    /// Creates a shear field about `center`.
    pub fn new(center: DVec2) -> Self {
        Self { center }
    }
}

impl PerlinFlow {
    /// Creates a Perlin displacement field.
    pub fn new(scale: f64, strength: f64, seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            scale,
            strength,
        }
    }
}

impl CurlFlow {
    /// Creates a curl noise field with the default epsilon.
    pub fn new(scale: f64, strength: f64, seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            scale,
            strength,
            eps: CURL_EPS,
        }
    }
}

// ---------------------------------------------------------------------------
// FlowField implementations
// ---------------------------------------------------------------------------

impl FlowField for Swirl {
    fn sample(&self, p: DVec2) -> DVec2 {
        let d = p - self.center;
        DVec2::new(
            ((d.x + d.y) / self.wavelength).sin(),
            ((d.x - d.y) / self.wavelength).cos(),
        )
    }
}

impl FlowField for Rotation {
    fn sample(&self, p: DVec2) -> DVec2 {
        let d = p - self.center;
        DVec2::new(-d.y, d.x)
    }
}

impl FlowField for Radial {
    fn sample(&self, p: DVec2) -> DVec2 {
        p - self.center
    }
}

impl FlowField for Shear {
    fn sample(&self, p: DVec2) -> DVec2 {
        let d = p - self.center;
        DVec2::new(
            d.y / SHEAR_X_DIVISOR,
            (d.x / SHEAR_RIPPLE_FREQ).sin() / SHEAR_RIPPLE_AMP,
        )
    }
}

impl FlowField for PerlinFlow {
    fn sample(&self, p: DVec2) -> DVec2 {
        let sx = p.x * self.scale;
        let sy = p.y * self.scale;
        let dx = self.noise.get([sx, sy]) * self.strength;
        let dy = self.noise.get([sx + 100.0, sy + 100.0]) * self.strength;
        DVec2::new(dx, dy)
    }
}

impl FlowField for CurlFlow {
    fn sample(&self, p: DVec2) -> DVec2 {
        let sx = p.x * self.scale;
        let sy = p.y * self.scale;
        let eps = self.eps * self.scale;
        if eps == 0.0 {
            return DVec2::ZERO;
        }
        // Curl of a 2D scalar field F: dx = dF/dy, dy = -dF/dx
        let df_dy =
            (self.noise.get([sx, sy + eps]) - self.noise.get([sx, sy - eps])) / (2.0 * eps);
        let df_dx =
            (self.noise.get([sx + eps, sy]) - self.noise.get([sx - eps, sy])) / (2.0 * eps);
        DVec2::new(df_dy * self.strength, -df_dx * self.strength)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// All available field names.
const FIELD_NAMES: &[&str] = &["swirl", "rotation", "radial", "shear", "perlin", "curl"];

/// Enumeration of all available flow fields.
///
/// Wraps each implementation and delegates [`FlowField::sample`]. Use
/// [`FieldKind::from_name`] for string-based construction (config, CLI).
pub enum FieldKind {
    /// The classic swirl field.
    Swirl(Swirl),
    /// Rigid rotation about the canvas center.
    Rotation(Rotation),
    /// Radial outward flow.
    Radial(Radial),
    /// Horizontal shear with vertical ripple.
    Shear(Shear),
    /// Perlin noise displacement.
    Perlin(PerlinFlow),
    /// Curl of Perlin noise.
    Curl(CurlFlow),
}

impl FieldKind {
    /// Constructs a field by name.
    ///
    /// Centered fields receive `center` (the canvas midpoint); noise fields
    /// read `scale` and `strength` from `params` and derive their noise seed
    /// from `seed`. Returns `FlowError::UnknownField` for unrecognized names.
    pub fn from_name(
        name: &str,
        center: DVec2,
        params: &Value,
        seed: u64,
    ) -> Result<Self, FlowError> {
        let scale = param_f64(params, "scale", DEFAULT_NOISE_SCALE);
        let strength = param_f64(params, "strength", DEFAULT_NOISE_STRENGTH);
        let noise_seed = seed as u32;
        match name {
            "swirl" => Ok(FieldKind::Swirl(Swirl::with_wavelength(
                center,
                param_f64(params, "wavelength", SWIRL_WAVELENGTH),
            ))),
            "rotation" => Ok(FieldKind::Rotation(Rotation::new(center))),
            "radial" => Ok(FieldKind::Radial(Radial::new(center))),
            "shear" => Ok(FieldKind::Shear(Shear::new(center))),
            "perlin" => Ok(FieldKind::Perlin(PerlinFlow::new(scale, strength, noise_seed))),
            "curl" => Ok(FieldKind::Curl(CurlFlow::new(scale, strength, noise_seed))),
            _ => Err(FlowError::UnknownField(name.to_string())),
        }
    }

    /// Returns a slice of all recognized field names.
    pub fn list_fields() -> &'static [&'static str] {
        FIELD_NAMES
    }
}

impl FlowField for FieldKind {
    fn sample(&self, p: DVec2) -> DVec2 {
        match self {
            FieldKind::Swirl(f) => f.sample(p),
            FieldKind::Rotation(f) => f.sample(p),
            FieldKind::Radial(f) => f.sample(p),
            FieldKind::Shear(f) => f.sample(p),
            FieldKind::Perlin(f) => f.sample(p),
            FieldKind::Curl(f) => f.sample(p),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
