//! Named calibration arguments
//!
//! The `t90` and `res` operations receive a bundle of named numeric
//! arguments next to their primary value: the triple-point resistance,
//! the subrange selector and the deviation-function coefficients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of an argument that may be forwarded in a calibration bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgName {
    /// Resistance at the triple point of water
    Rtpw,
    /// Calibration subrange selector
    Subrange,
    A,
    B,
    C,
    D,
    /// W(660.323 °C), used by the `d` term of the widest range
    W660,
    C1,
    C2,
    C3,
    C4,
    C5,
}

impl ArgName {
    /// Every bundle argument, in declaration order
    pub const ALL: [ArgName; 12] = [
        ArgName::Rtpw,
        ArgName::Subrange,
        ArgName::A,
        ArgName::B,
        ArgName::C,
        ArgName::D,
        ArgName::W660,
        ArgName::C1,
        ArgName::C2,
        ArgName::C3,
        ArgName::C4,
        ArgName::C5,
    ];

    /// Parameter name as it appears in a request
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgName::Rtpw => "rtpw",
            ArgName::Subrange => "subrange",
            ArgName::A => "a",
            ArgName::B => "b",
            ArgName::C => "c",
            ArgName::D => "d",
            ArgName::W660 => "w660",
            ArgName::C1 => "c1",
            ArgName::C2 => "c2",
            ArgName::C3 => "c3",
            ArgName::C4 => "c4",
            ArgName::C5 => "c5",
        }
    }
}

impl fmt::Display for ArgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerced argument bundle handed to a calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CalibrationArgs(BTreeMap<ArgName, f64>);

impl CalibrationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: ArgName, value: f64) -> Option<f64> {
        self.0.insert(name, value)
    }

    pub fn get(&self, name: ArgName) -> Option<f64> {
        self.0.get(&name).copied()
    }

    /// Value of a coefficient, zero when it was not supplied
    pub fn coefficient(&self, name: ArgName) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    pub fn contains(&self, name: ArgName) -> bool {
        self.0.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ArgName, f64)> for CalibrationArgs {
    fn from_iter<I: IntoIterator<Item = (ArgName, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_name_matches_serde_name() {
        for name in ArgName::ALL {
            let json = serde_json::to_value(name).unwrap();
            assert_eq!(json, serde_json::json!(name.as_str()));
        }
    }

    #[test]
    fn test_coefficient_defaults_to_zero() {
        let mut args = CalibrationArgs::new();
        args.insert(ArgName::A, 1.0e-3);

        assert_eq!(args.coefficient(ArgName::A), 1.0e-3);
        assert_eq!(args.coefficient(ArgName::B), 0.0);
        assert!(args.get(ArgName::B).is_none());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let args: CalibrationArgs = [(ArgName::Rtpw, 25.0), (ArgName::Subrange, 11.0)]
            .into_iter()
            .collect();

        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json, serde_json::json!({"rtpw": 25.0, "subrange": 11.0}));
    }
}
