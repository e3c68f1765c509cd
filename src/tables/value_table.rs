//! State-value table for dynamic programming

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tictactoe::BoardState;

/// Mapping from state to expected return, in the X-maximising frame.
///
/// Missing states read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: HashMap<BoardState, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, state: &BoardState) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: BoardState, value: f64) {
        self.values.insert(state, value);
    }

    pub fn contains(&self, state: &BoardState) -> bool {
        self.values.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoardState, &f64)> {
        self.values.iter()
    }

    /// Largest absolute difference between two tables over the union of their keys
    pub fn max_abs_difference(&self, other: &ValueTable) -> f64 {
        self.values
            .keys()
            .chain(other.values.keys())
            .map(|state| (self.get(state) - other.get(state)).abs())
            .fold(0.0, f64::max)
    }
}
