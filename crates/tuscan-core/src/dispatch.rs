//! Request validation and dispatch
//!
//! The [`Dispatcher`] turns an operation plus the raw parameters of one
//! request into a single calculator call. Every required and whitelisted
//! value is checked before the calculator is reached, so a request either
//! yields a complete [`Evaluation`] or fails without side effects.
//!
//! # Steps
//!
//! 1. Presence check: bundle operations (`t90`, `res`) need the primary
//!    parameter, `rtpw` and `subrange` before anything is coerced.
//! 2. Primary coercion.
//! 3. Bundle coercion over the operation's whitelist.
//! 4. Calculator call with the configured standard.
//! 5. The result is wrapped as `{<operation>: <value>}`.

use crate::calculator::Calculator;
use crate::coercion::{coerce_float, filter_and_coerce};
use crate::error::{CalculationError, DispatchError, Result};
use crate::types::{Operation, RawParams, Standard};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::debug;

/// Result of one successful evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub operation: Operation,
    pub value: f64,
}

impl Serialize for Evaluation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.operation.name(), &self.value)?;
        map.end()
    }
}

/// Validates requests for one standard and forwards them to a calculator
#[derive(Clone)]
pub struct Dispatcher {
    standard: Standard,
    calculator: Arc<dyn Calculator>,
}

impl Dispatcher {
    pub fn new(standard: Standard, calculator: Arc<dyn Calculator>) -> Self {
        Self {
            standard,
            calculator,
        }
    }

    pub fn standard(&self) -> Standard {
        self.standard
    }

    /// Validate `raw` for `operation` and evaluate it
    pub fn dispatch(&self, operation: Operation, raw: &RawParams) -> Result<Evaluation> {
        if operation.takes_bundle() {
            ensure_present(operation, raw)?;
        }

        let primary_name = operation.primary_param();
        let primary = raw
            .get(primary_name)
            .ok_or_else(|| DispatchError::MissingParameter(primary_name.to_string()))?;
        let primary = coerce_float(primary_name, primary)?;

        let value = match operation {
            Operation::Wr => self.calculator.wr(self.standard, primary)?,
            Operation::T90r => self.calculator.t90r(self.standard, primary)?,
            Operation::T90 | Operation::Res => {
                let args = filter_and_coerce(raw, &operation.whitelist())?;
                debug!(
                    "Dispatching {} for {} with {}={} and {} bundle arguments",
                    operation,
                    self.standard,
                    primary_name,
                    primary,
                    args.len()
                );
                if operation == Operation::T90 {
                    self.calculator.t90(self.standard, primary, &args)?
                } else {
                    self.calculator.res(self.standard, primary, &args)?
                }
            }
        };

        if !value.is_finite() {
            return Err(CalculationError::NonFiniteResult.into());
        }

        Ok(Evaluation { operation, value })
    }
}

/// Check that the primary parameter and every required bundle argument exist
fn ensure_present(operation: Operation, raw: &RawParams) -> Result<()> {
    let required = std::iter::once(operation.primary_param())
        .chain(operation.required_args().iter().map(|name| name.as_str()));

    for name in required {
        if !raw.contains_key(name) {
            return Err(DispatchError::MissingParameter(name.to_string()));
        }
    }

    Ok(())
}
