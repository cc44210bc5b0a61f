//! Temperature standards

use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature standard whose equations a deployment evaluates
///
/// The standard is fixed per route and never read from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    /// International Temperature Scale of 1990
    #[default]
    Its90,
}

impl Standard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standard::Its90 => "its90",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
