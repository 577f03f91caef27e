//! Magnitude-to-color mapping for the arrow grid.
//!
//! A four-band piecewise-linear colormap over a [`ColorRange`] computed from
//! the grid's own samples: blue at the range minimum, through cyan, green,
//! and yellow, to red at the maximum. Out-of-range magnitudes clamp to
//! opaque sentinel colors and emit a diagnostic; they should not occur when
//! the range was computed from the same sample set.

use crate::error::FlowError;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Constructs a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Sentinel for magnitudes above the computed range.
const SENTINEL_HIGH: Rgba = Rgba::new(255, 0, 0, 255);
/// Sentinel for magnitudes below the computed range.
const SENTINEL_LOW: Rgba = Rgba::new(0, 0, 255, 255);

/// Inclusive magnitude range over which the colormap interpolates.
///
/// Computed once from the full grid's sampled magnitudes, before any color
/// is assigned; immutable for the lifetime of the arrow grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    /// Computes the running minimum and maximum over `magnitudes`.
    ///
    /// Returns `FlowError::EmptyRange` if the iterator yields nothing.
    pub fn of(magnitudes: impl IntoIterator<Item = f64>) -> Result<Self, FlowError> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;
        for m in magnitudes {
            seen = true;
            if m < min {
                min = m;
            }
            if m > max {
                max = m;
            }
        }
        if !seen {
            return Err(FlowError::EmptyRange);
        }
        Ok(Self { min, max })
    }

    /// Whether `magnitude` lies within `[min, max]`.
    pub fn contains(&self, magnitude: f64) -> bool {
        magnitude >= self.min && magnitude <= self.max
    }
}

/// Quantizes a fraction in [0, 1] to an 8-bit channel with rounding.
fn ramp(frac: f64) -> u8 {
    (frac * 255.0).round() as u8
}

/// Maps a magnitude to a color through the four-band colormap.
///
/// In-range magnitudes are normalized to `t = (m - min) / (max - min)` and
/// interpolated blue→cyan→green→yellow→red with `opacity` as alpha:
/// - `t ∈ [0, 0.25]`: green ramps 0→255 (blue→cyan)
/// - `t ∈ (0.25, 0.5]`: blue ramps 255→0 (cyan→green)
/// - `t ∈ (0.5, 0.75]`: red ramps 0→255 (green→yellow)
/// - `t ∈ (0.75, 1]`: green ramps 255→0 (yellow→red)
///
/// A degenerate range (`max == min`) is treated as `t = 0`. Magnitudes
/// outside the range return opaque red (above) or opaque blue (below) and
/// emit a `tracing` diagnostic; out-of-range input is clamped, never fatal.
pub fn color_from_magnitude(magnitude: f64, range: ColorRange, opacity: u8) -> Rgba {
    if magnitude > range.max {
        tracing::warn!(
            magnitude,
            max = range.max,
            "magnitude above computed range, clamping to sentinel red"
        );
        return SENTINEL_HIGH;
    }
    if magnitude < range.min {
        tracing::warn!(
            magnitude,
            min = range.min,
            "magnitude below computed range, clamping to sentinel blue"
        );
        return SENTINEL_LOW;
    }

    let span = range.max - range.min;
    let t = if span == 0.0 {
        0.0
    } else {
        (magnitude - range.min) / span
    };

    if t <= 0.25 {
        Rgba::new(0, ramp(t / 0.25), 255, opacity)
    } else if t <= 0.5 {
        Rgba::new(0, 255, ramp(1.0 - (t - 0.25) / 0.25), opacity)
    } else if t <= 0.75 {
        Rgba::new(ramp((t - 0.5) / 0.25), 255, 0, opacity)
    } else {
        Rgba::new(255, ramp(1.0 - (t - 0.75) / 0.25), 0, opacity)
    }
}
