//! Supported calibration operations and their parameter contracts

use super::args::ArgName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BUNDLE_REQUIRED: &[ArgName] = &[ArgName::Rtpw, ArgName::Subrange];

const BUNDLE_OPTIONAL: &[ArgName] = &[
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

/// Operation selected by the request route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Reference resistance ratio for a temperature
    Wr,
    /// Temperature for a reference resistance ratio
    T90r,
    /// Temperature for a measured resistance
    T90,
    /// Resistance for a temperature
    Res,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Wr,
        Operation::T90r,
        Operation::T90,
        Operation::Res,
    ];

    /// Route segment, collaborator function and response key
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Wr => "wr",
            Operation::T90r => "t90r",
            Operation::T90 => "t90",
            Operation::Res => "res",
        }
    }

    /// The single numeric input the operation is evaluated at
    pub fn primary_param(&self) -> &'static str {
        match self {
            Operation::Wr => "t90",
            Operation::T90r => "wr",
            Operation::T90 => "res",
            Operation::Res => "t90",
        }
    }

    /// Bundle arguments that must be present next to the primary parameter
    pub fn required_args(&self) -> &'static [ArgName] {
        if self.takes_bundle() {
            BUNDLE_REQUIRED
        } else {
            &[]
        }
    }

    /// Bundle arguments forwarded when present
    pub fn optional_args(&self) -> &'static [ArgName] {
        if self.takes_bundle() {
            BUNDLE_OPTIONAL
        } else {
            &[]
        }
    }

    /// Every argument that may end up in the bundle
    pub fn whitelist(&self) -> Vec<ArgName> {
        self.required_args()
            .iter()
            .chain(self.optional_args())
            .copied()
            .collect()
    }

    /// Whether the collaborator receives an argument bundle
    pub fn takes_bundle(&self) -> bool {
        matches!(self, Operation::T90 | Operation::Res)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .find(|op| op.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}
