//! Group aggregate functions.
//!
//! An aggregate reduces the sort fields of one group's members to the single
//! value that orders the group against the others.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Aggregate applied to a group's non-missing sort fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// Smallest sort field in the group.
    #[serde(alias = "minimum")]
    Min,

    /// Largest sort field in the group.
    #[serde(alias = "maximum")]
    Max,

    /// Arithmetic mean of the group's sort fields.
    #[serde(alias = "avg")]
    Average,
}

impl Aggregate {
    /// Resolve a human-facing aggregate name (the CLI spellings).
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "min" | "minimum" => Ok(Aggregate::Min),
            "max" | "maximum" => Ok(Aggregate::Max),
            "avg" | "average" => Ok(Aggregate::Average),
            other => Err(ConfigError::UnknownAggregate(other.to_string())),
        }
    }

    /// Reduce sort fields to a single value.
    ///
    /// An empty slice reduces to `0.0`, so a group whose every sort field is
    /// missing still gets a defined ordering value.
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        match self {
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregate::Average => values.iter().sum::<f64>() / values.len() as f64,
        }
    }
}

impl FromStr for Aggregate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aggregate::from_name(s)
    }
}
