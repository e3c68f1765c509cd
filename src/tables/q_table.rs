//! Action-value tables for sampled control

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Action, BoardState};

/// Table mapping (state, action) pairs to a scalar.
///
/// Missing entries read as `0.0`; every update formula in the learners relies
/// on that default. The same structure stores Q-values and the cumulative
/// importance-sampling weights `C(s, a)` of Monte Carlo control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: HashMap<BoardState, HashMap<Action, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a state-action pair
    pub fn get(&self, state: &BoardState, action: Action) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set the value for a state-action pair
    pub fn set(&mut self, state: BoardState, action: Action, value: f64) {
        self.values.entry(state).or_default().insert(action, value);
    }

    /// Add `delta` to a state-action pair and return the new value
    pub fn add(&mut self, state: BoardState, action: Action, delta: f64) -> f64 {
        let entry = self
            .values
            .entry(state)
            .or_default()
            .entry(action)
            .or_insert(0.0);
        *entry += delta;
        *entry
    }

    /// Maximum value over the given actions (0.0 when there are none)
    pub fn max_q(&self, state: &BoardState, actions: &[Action]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Greedy action: the first action (in the given order) with maximal value
    pub fn greedy_action(&self, state: &BoardState, actions: &[Action]) -> Option<Action> {
        let mut best: Option<(Action, f64)> = None;
        for &action in actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Every action tied for the maximal value, in the given order
    pub fn greedy_actions(&self, state: &BoardState, actions: &[Action]) -> Vec<Action> {
        let best = self.max_q(state, actions);
        actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == best)
            .collect()
    }

    /// States with at least one stored entry
    pub fn states(&self) -> impl Iterator<Item = &BoardState> {
        self.values.keys()
    }

    /// Stored entries for one state
    pub fn actions(&self, state: &BoardState) -> Option<&HashMap<Action, f64>> {
        self.values.get(state)
    }

    /// Total number of stored (state, action) entries
    pub fn size(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
