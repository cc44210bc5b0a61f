//! TUSCAn Core - request validation and dispatch for calibration equations
//!
//! This crate provides the transport-independent part of the TUSCAn API:
//! - Operation, standard and argument types
//! - Numeric coercion of raw request parameters
//! - The `Calculator` trait implemented by calculation backends
//! - The `Dispatcher` that ties validation to a calculator
//! - Error types

pub mod calculator;
pub mod coercion;
pub mod dispatch;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use calculator::Calculator;
pub use coercion::{coerce_float, filter_and_coerce};
pub use dispatch::{Dispatcher, Evaluation};
pub use error::{CalculationError, DispatchError};
pub use types::{ArgName, CalibrationArgs, Operation, RawParams, Standard};
