//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by field, grid, and configuration operations.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Normalization was requested for a zero-magnitude vector.
    #[error("cannot normalize a zero-magnitude vector")]
    ZeroMagnitude,

    /// Canvas width or height was zero or non-finite.
    #[error("invalid canvas dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// Grid row or column count was zero.
    #[error("invalid grid: {rows} rows x {cols} cols (both must be non-zero)")]
    InvalidGrid { rows: usize, cols: usize },

    /// A scene configuration value was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A requested field name was not recognized.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A color range was requested over an empty magnitude set.
    #[error("cannot compute a color range from an empty magnitude set")]
    EmptyRange,

    /// A surface or snapshot I/O failure.
    #[error("io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_magnitude_displays_readable_message() {
        let msg = format!("{}", FlowError::ZeroMagnitude);
        assert!(
            msg.contains("zero-magnitude"),
            "expected message mentioning zero magnitude, got: {msg}"
        );
    }

    #[test]
    fn invalid_grid_includes_dimensions() {
        let err = FlowError::InvalidGrid { rows: 0, cols: 30 };
        let msg = format!("{err}");
        assert!(msg.contains('0'), "missing rows in: {msg}");
        assert!(msg.contains("30"), "missing cols in: {msg}");
    }

    #[test]
    fn unknown_field_includes_name() {
        let err = FlowError::UnknownField("vortexx".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("vortexx"),
            "expected message containing the field name, got: {msg}"
        );
    }

    #[test]
    fn invalid_config_includes_message() {
        let err = FlowError::InvalidConfig("particle_speed must be finite".into());
        let msg = format!("{err}");
        assert!(msg.contains("particle_speed"), "missing detail in: {msg}");
    }

    #[test]
    fn flow_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlowError>();
    }

    #[test]
    fn flow_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FlowError>();
    }
}
