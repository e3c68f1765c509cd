//! Deterministic state → action policies

use std::collections::HashMap;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::QTable;
use crate::tictactoe::{Action, BoardState};

/// A finished decision rule.
///
/// Total over the states a solver covered, partial otherwise: a query for a
/// state the policy never saw (or whose stored action is no longer legal)
/// falls back to a uniformly random legal action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    actions: HashMap<BoardState, Action>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Greedy policy `argmax_a Q(s, a)` for every state stored in `q`.
    ///
    /// The maximum runs over the state's legal actions in row-major order with
    /// missing entries read as zero; ties go to the first action.
    pub fn greedy(q: &QTable) -> Self {
        let mut policy = Self::new();
        for state in q.states() {
            if state.is_terminal() {
                continue;
            }
            if let Some(action) = q.greedy_action(state, &state.legal_actions()) {
                policy.insert(*state, action);
            }
        }
        policy
    }

    pub fn insert(&mut self, state: BoardState, action: Action) {
        self.actions.insert(state, action);
    }

    /// Stored action for a state, without fallback
    pub fn get(&self, state: &BoardState) -> Option<Action> {
        self.actions.get(state).copied()
    }

    pub fn contains(&self, state: &BoardState) -> bool {
        self.actions.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoardState, &Action)> {
        self.actions.iter()
    }

    /// Add every entry of `other`, overwriting shared states
    pub fn extend(&mut self, other: Policy) {
        self.actions.extend(other.actions);
    }

    /// Chosen action for `state`.
    ///
    /// Returns the stored action when it is legal, otherwise a uniformly random
    /// legal action drawn from `rng`, and `None` only when the board has no
    /// empty cell or is already decided.
    pub fn best_action<R: Rng + ?Sized>(&self, state: &BoardState, rng: &mut R) -> Option<Action> {
        if state.is_terminal() {
            return None;
        }

        match self.get(state) {
            Some(action) if state.is_empty(action) => Some(action),
            _ => state.legal_actions().choose(rng).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn a(pos: usize) -> Action {
        Action::from_position(pos).unwrap()
    }

    #[test]
    fn test_greedy_from_q_table() {
        let mut q = QTable::new();
        let empty = BoardState::new();
        q.set(empty, a(0), -0.5);
        q.set(empty, a(4), 0.75);

        let after_x = BoardState::from_string("X........").unwrap();
        q.set(after_x, a(1), -1.0);

        let policy = Policy::greedy(&q);
        assert_eq!(policy.get(&empty), Some(a(4)));
        // unrecorded actions read as zero and beat the recorded loss
        assert_eq!(policy.get(&after_x), Some(a(2)));
    }

    #[test]
    fn test_best_action_uses_stored_action() {
        let mut policy = Policy::new();
        policy.insert(BoardState::new(), a(4));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(policy.best_action(&BoardState::new(), &mut rng), Some(a(4)));
    }

    #[test]
    fn test_best_action_falls_back_to_random_legal() {
        let policy = Policy::new();
        let state = BoardState::from_string("XO.X.O...").unwrap();
        let legal: HashSet<Action> = state.legal_actions().into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let action = policy.best_action(&state, &mut rng).unwrap();
            assert!(legal.contains(&action));
            seen.insert(action);
        }
        assert!(seen.len() > 1, "fallback should be randomised");
    }

    #[test]
    fn test_best_action_on_finished_board() {
        let policy = Policy::new();
        let mut rng = StdRng::seed_from_u64(3);
        let full = BoardState::from_string("XOXXOOOXX").unwrap();
        assert_eq!(policy.best_action(&full, &mut rng), None);
        let won = BoardState::from_string("XXXOO....").unwrap();
        assert_eq!(policy.best_action(&won, &mut rng), None);
    }
}
