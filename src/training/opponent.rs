//! The fixed opponent a sampling learner trains against

use std::path::Path;

use log::info;
use rand::Rng;

use crate::{
    Error, Result,
    ports::PolicyStore,
    tables::Policy,
    tictactoe::{Action, BoardState},
};

/// Read-only opponent policy.
///
/// States the policy does not cover are answered with a uniformly random
/// legal action.
#[derive(Debug, Clone)]
pub struct OpponentPolicy {
    policy: Policy,
    source: String,
}

impl OpponentPolicy {
    pub fn new(policy: Policy, source: impl Into<String>) -> Self {
        Self {
            policy,
            source: source.into(),
        }
    }

    /// Load the opponent from `store`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingOpponentPolicy`] when nothing is stored at `path`, so a
    /// learner fails at construction rather than partway through training.
    pub fn load<S: PolicyStore + ?Sized>(store: &S, path: &Path) -> Result<Self> {
        if !store.exists(path) {
            return Err(Error::MissingOpponentPolicy {
                path: path.to_path_buf(),
            });
        }
        let saved = store.load(path)?;
        info!(
            "opponent: {} policy covering {} states from {}",
            saved.method,
            saved.policy.len(),
            path.display()
        );
        Ok(Self::new(saved.policy, path.display().to_string()))
    }

    /// Where the policy came from, for reports
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The opponent's reply in `state`; `None` only on finished boards.
    pub fn choose<R: Rng + ?Sized>(&self, state: &BoardState, rng: &mut R) -> Option<Action> {
        self.policy.best_action(state, rng)
    }
}
