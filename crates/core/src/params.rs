//! Typed extraction of field parameters from a `serde_json::Value` object.
//!
//! Field tunables (noise scale, swirl wavelength, ...) arrive as free-form
//! JSON from the scene config or the CLI. These helpers never fail: a
//! missing key or wrong type falls back to the caller's default.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or
/// the wrong type. JSON integers are accepted and widened to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}
