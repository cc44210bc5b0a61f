//! ITS-90 calculation backend for TUSCAn
//!
//! Implements [`tuscan_core::Calculator`] with the ITS-90 reference
//! functions and the deviation functions of the eleven platinum resistance
//! thermometer subranges. Temperatures are in degrees Celsius; resistances
//! are in whatever unit `rtpw` is given in.

pub mod deviation;
pub mod reference;

pub use deviation::{Deviation, Subrange};

use tracing::debug;
use tuscan_core::{ArgName, CalculationError, CalibrationArgs, Calculator, Standard};

const DEFAULT_MAX_ITERATIONS: usize = 50;
const DEFAULT_TOLERANCE: f64 = 1e-14;

/// ITS-90 platinum resistance thermometer equations
#[derive(Debug, Clone)]
pub struct Its90Calculator {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for Its90Calculator {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Its90Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the fixed-point iteration limits used by `res`
    pub fn with_iteration_limits(mut self, max_iterations: usize, tolerance: f64) -> Self {
        self.max_iterations = max_iterations;
        self.tolerance = tolerance;
        self
    }

    /// Solve `W - ΔW(W) = Wr` for W
    fn solve_w(&self, deviation: &Deviation, wr: f64) -> Result<f64, CalculationError> {
        let mut w = wr;
        for step in 1..=self.max_iterations {
            let next = wr + deviation.delta_w(w)?;
            if (next - w).abs() <= self.tolerance * next.abs().max(1.0) {
                debug!("W converged after {} steps", step);
                return Ok(next);
            }
            w = next;
        }

        Err(CalculationError::DidNotConverge(self.max_iterations))
    }
}

impl Calculator for Its90Calculator {
    fn wr(&self, standard: Standard, t90: f64) -> Result<f64, CalculationError> {
        match standard {
            Standard::Its90 => reference::wr(t90),
        }
    }

    fn t90r(&self, standard: Standard, wr: f64) -> Result<f64, CalculationError> {
        match standard {
            Standard::Its90 => reference::t90r(wr),
        }
    }

    fn t90(
        &self,
        standard: Standard,
        res: f64,
        args: &CalibrationArgs,
    ) -> Result<f64, CalculationError> {
        match standard {
            Standard::Its90 => {
                let rtpw = triple_point_resistance(args)?;
                let deviation = Deviation::from_args(args)?;
                let w = res / rtpw;
                if w <= 0.0 {
                    return Err(CalculationError::InvalidArgument {
                        name: "res",
                        reason: format!("resistance must be positive, got {}", res),
                    });
                }
                reference::t90r(w - deviation.delta_w(w)?)
            }
        }
    }

    fn res(
        &self,
        standard: Standard,
        t90: f64,
        args: &CalibrationArgs,
    ) -> Result<f64, CalculationError> {
        match standard {
            Standard::Its90 => {
                let rtpw = triple_point_resistance(args)?;
                let deviation = Deviation::from_args(args)?;
                let wr = reference::wr(t90)?;
                Ok(self.solve_w(&deviation, wr)? * rtpw)
            }
        }
    }
}

fn triple_point_resistance(args: &CalibrationArgs) -> Result<f64, CalculationError> {
    match args.get(ArgName::Rtpw) {
        Some(rtpw) if rtpw > 0.0 && rtpw.is_finite() => Ok(rtpw),
        Some(rtpw) => Err(CalculationError::InvalidArgument {
            name: "rtpw",
            reason: format!("must be positive, got {}", rtpw),
        }),
        None => Err(CalculationError::InvalidArgument {
            name: "rtpw",
            reason: "missing".to_string(),
        }),
    }
}
