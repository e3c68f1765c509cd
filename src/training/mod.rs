//! Shared machinery for the sampling learners
//!
//! Monte Carlo control and Q-learning both train one role at a time against a
//! fixed opponent policy. This module holds what they share: the opponent,
//! the learner-centred environment, the split of episodes between roles, and
//! the report a finished run produces.

pub mod environment;
pub mod opponent;
pub mod report;

pub use environment::{Environment, Transition};
pub use opponent::OpponentPolicy;
pub use report::{RoleReport, TrainingReport};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    persistence::{Method, SavedPolicy, TrainingMetadata},
    tables::{Policy, RoleTables},
    tictactoe::Player,
};

/// Seeded generator when `seed` is given, otherwise seeded from the OS.
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Episodes per role: `floor(x_share · episodes)` as X, the rest as O.
pub fn role_split(episodes: usize, x_share: f64) -> [(Player, usize); 2] {
    let x_episodes = ((episodes as f64) * x_share).floor() as usize;
    let x_episodes = x_episodes.min(episodes);
    [(Player::X, x_episodes), (Player::O, episodes - x_episodes)]
}

pub(crate) fn validate_split(x_share: f64) -> Result<()> {
    if (0.0..=1.0).contains(&x_share) {
        Ok(())
    } else {
        Err(Error::config(format!("x_share must be in [0, 1], got {x_share}")))
    }
}

pub(crate) fn validate_discount(gamma: f64) -> Result<()> {
    if gamma > 0.0 && gamma <= 1.0 {
        Ok(())
    } else {
        Err(Error::config(format!("gamma must be in (0, 1], got {gamma}")))
    }
}

/// A finished sampling run: the greedy policy, the Q-tables it came from,
/// and per-role results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedPolicy {
    pub policy: Policy,
    pub tables: RoleTables,
    pub report: TrainingReport,
}

impl LearnedPolicy {
    /// Package the run for a [`crate::ports::PolicyStore`], keeping the Q-tables.
    pub fn into_saved(self, opponent: Option<String>) -> SavedPolicy {
        let metadata = TrainingMetadata {
            episodes: Some(self.report.total_episodes()),
            seed: self.report.seed,
            opponent,
            ..TrainingMetadata::default()
        };
        SavedPolicy::new(self.report.method, self.policy)
            .with_q_values(self.tables)
            .with_metadata(metadata)
    }

    pub fn method(&self) -> Method {
        self.report.method
    }
}
