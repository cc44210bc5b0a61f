//! Type definitions for TUSCAn requests

pub mod args;
pub mod operation;
pub mod standard;

pub use args::{ArgName, CalibrationArgs};
pub use operation::Operation;
pub use standard::Standard;

use std::collections::HashMap;

/// Parameters of a single request exactly as received
///
/// Form and query input arrive as strings, JSON bodies may carry any value.
/// Unrecognized keys are kept here and ignored during dispatch.
pub type RawParams = HashMap<String, serde_json::Value>;
