//! Q-learning configuration

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    exploration::ExplorationConfig,
    training::{validate_discount, validate_split},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalDifferenceConfig {
    /// Total episodes across both roles
    pub episodes: usize,
    /// Share of episodes with the learner playing X
    pub x_share: f64,
    /// Learning rate α in (0, 1]
    pub alpha: f64,
    /// Discount factor γ in (0, 1]
    pub gamma: f64,
    pub exploration: ExplorationConfig,
    pub seed: Option<u64>,
}

impl Default for TemporalDifferenceConfig {
    fn default() -> Self {
        Self {
            episodes: 100_000,
            x_share: 0.5,
            alpha: 0.1,
            gamma: 0.9,
            exploration: ExplorationConfig::new(0.2, 0.99995, 0.05),
            seed: None,
        }
    }
}

impl TemporalDifferenceConfig {
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_x_share(mut self, x_share: f64) -> Self {
        self.x_share = x_share;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
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
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::config(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        validate_split(self.x_share)?;
        validate_discount(self.gamma)?;
        self.exploration.validate()
    }
}
