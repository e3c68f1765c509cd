//! Versioned envelope for finished policies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tables::{Policy, RoleTables, ValueTable},
};

/// Which solver produced a saved policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    ValueIteration,
    PolicyIteration,
    MonteCarlo,
    TemporalDifference,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::ValueIteration => "value iteration",
            Method::PolicyIteration => "policy iteration",
            Method::MonteCarlo => "Monte Carlo control",
            Method::TemporalDifference => "temporal-difference control",
        };
        f.write_str(name)
    }
}

/// How a saved policy was trained
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Sweeps (value iteration) or improvement rounds (policy iteration)
    pub sweeps: Option<usize>,
    /// Whether the DP run converged before its cap
    pub converged: Option<bool>,
    /// Episodes played by a sampling learner
    pub episodes: Option<usize>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Where the fixed opponent policy came from
    pub opponent: Option<String>,
}

/// A frozen policy plus whatever tables its solver chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPolicy {
    pub version: u32,
    pub method: Method,
    pub policy: Policy,
    pub values: Option<ValueTable>,
    pub q_values: Option<RoleTables>,
    pub metadata: TrainingMetadata,
}

impl SavedPolicy {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(method: Method, policy: Policy) -> Self {
        Self {
            version: Self::VERSION,
            method,
            policy,
            values: None,
            q_values: None,
            metadata: TrainingMetadata::default(),
        }
    }

    pub fn with_values(mut self, values: ValueTable) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_q_values(mut self, q_values: RoleTables) -> Self {
        self.q_values = Some(q_values);
        self
    }

    pub fn with_metadata(mut self, metadata: TrainingMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Reject envelopes written by an incompatible format version
    pub fn check_version(&self) -> Result<()> {
        if self.version == Self::VERSION {
            Ok(())
        } else {
            Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            })
        }
    }
}
