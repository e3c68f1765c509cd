//! Monte Carlo control configuration

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    exploration::ExplorationConfig,
    training::{validate_discount, validate_split},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Total episodes across both roles
    pub episodes: usize,
    /// Share of episodes with the learner playing X
    pub x_share: f64,
    /// Discount applied to returns
    pub gamma: f64,
    pub exploration: ExplorationConfig,
    /// Seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            episodes: 200_000,
            x_share: 0.5,
            gamma: 0.9,
            exploration: ExplorationConfig::new(0.2, 0.99999, 0.05),
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_x_share(mut self, x_share: f64) -> Self {
        self.x_share = x_share;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_exploration(mut self, exploration: ExplorationConfig) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::config("episodes must be at least 1"));
        }
        validate_split(self.x_share)?;
        validate_discount(self.gamma)?;
        self.exploration.validate()
    }
}
