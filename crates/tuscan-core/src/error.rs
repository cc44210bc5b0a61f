//! Error types for TUSCAn Core

use thiserror::Error;

/// Failure reported by a calculation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Unsupported subrange: {0}")]
    UnsupportedSubrange(f64),

    #[error("{quantity} out of range: {value}")]
    OutOfRange { quantity: &'static str, value: f64 },

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Iteration did not converge after {0} steps")]
    DidNotConverge(usize),

    #[error("Calculation produced a non-finite result")]
    NonFiniteResult,
}

/// Request validation and dispatch error
///
/// Every variant is a client error: the request can only succeed once it is
/// resubmitted with corrected parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Parameter '{name}' is not numeric: {value}")]
    NonNumeric { name: String, value: String },

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculationError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_display() {
        let err = DispatchError::MissingParameter("rtpw".to_string());
        assert_eq!(err.to_string(), "Missing required parameter: rtpw");
    }

    #[test]
    fn test_non_numeric_display() {
        let err = DispatchError::NonNumeric {
            name: "t90".to_string(),
            value: "\"abc\"".to_string(),
        };
        assert_eq!(err.to_string(), "Parameter 't90' is not numeric: \"abc\"");
    }

    #[test]
    fn test_calculation_error_conversion() {
        let err: DispatchError = CalculationError::UnsupportedSubrange(12.0).into();
        assert!(matches!(err, DispatchError::Calculation(_)));
        assert!(err.to_string().contains("Unsupported subrange: 12"));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = CalculationError::OutOfRange {
            quantity: "t90",
            value: 2000.0,
        };
        assert_eq!(err.to_string(), "t90 out of range: 2000");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DispatchError>();
        assert_send_sync::<CalculationError>();
    }
}
