//! Configuration errors: rejected tunables, unreadable settings files

use thiserror::Error;

/// Errors raised while building or loading a game configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("circles_per_band must be at least 1")]
    NoCirclesPerBand,
    #[error("radius range is empty: max radius {max} is below min radius {min}")]
    EmptyRadiusRange { min: f64, max: f64 },
    #[error("margin {margin} must lie in [0, {spacing}) to keep circles inside their band")]
    MarginOutOfBand { margin: f64, spacing: f64 },
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("fps must be positive")]
    NonPositiveFps,
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject zero, negative and NaN values for a named tunable
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("speed", 0.1).is_ok());
        assert!(matches!(
            ensure_positive("speed", 0.0),
            Err(ConfigError::NonPositive { field: "speed", .. })
        ));
        assert!(ensure_positive("range", -1.0).is_err());
        assert!(ensure_positive("size", f64::NAN).is_err());
        assert!(ensure_positive("size", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NonPositive { field: "range", value: -2.0 };
        assert_eq!(err.to_string(), "range must be positive, got -2");
    }
}
