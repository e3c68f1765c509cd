//! Strategy adapters: a trained policy and a uniform random player.

use rand::{rngs::StdRng, seq::IndexedRandom};

use crate::{
    ports::Strategy,
    tables::Policy,
    tictactoe::{Action, BoardState},
    training::build_rng,
};

/// Plays a frozen [`Policy`], falling back to a random legal move in states
/// the policy does not cover.
#[derive(Debug, Clone)]
pub struct PolicyAgent {
    name: String,
    policy: Policy,
    rng: StdRng,
}

impl PolicyAgent {
    pub fn new(name: impl Into<String>, policy: Policy) -> Self {
        Self {
            name: name.into(),
            policy,
            rng: build_rng(None),
        }
    }

    /// Seed the fallback generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

impl Strategy for PolicyAgent {
    fn best_action(&mut self, state: &BoardState) -> Option<Action> {
        self.policy.best_action(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Uniformly random legal moves
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Strategy for RandomAgent {
    fn best_action(&mut self, state: &BoardState) -> Option<Action> {
        if state.is_terminal() {
            return None;
        }
        state.legal_actions().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}
