//! Calculation backend seam
//!
//! The dispatcher never evaluates calibration equations itself. It forwards
//! coerced values to an implementation of [`Calculator`], one method per
//! operation, with a fixed argument shape:
//!
//! | Operation | Call |
//! |---|---|
//! | `wr`   | `wr(standard, t90)` |
//! | `t90r` | `t90r(standard, wr)` |
//! | `t90`  | `t90(standard, res, args)` |
//! | `res`  | `res(standard, t90, args)` |

use crate::error::CalculationError;
use crate::types::{CalibrationArgs, Standard};

/// Calibration equations for one or more temperature standards
pub trait Calculator: Send + Sync {
    /// Reference resistance ratio at temperature `t90`
    fn wr(&self, standard: Standard, t90: f64) -> Result<f64, CalculationError>;

    /// Temperature at reference resistance ratio `wr`
    fn t90r(&self, standard: Standard, wr: f64) -> Result<f64, CalculationError>;

    /// Temperature of a calibrated thermometer reading `res`
    fn t90(&self, standard: Standard, res: f64, args: &CalibrationArgs)
        -> Result<f64, CalculationError>;

    /// Resistance of a calibrated thermometer at temperature `t90`
    fn res(&self, standard: Standard, t90: f64, args: &CalibrationArgs)
        -> Result<f64, CalculationError>;
}
