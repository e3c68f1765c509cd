//! Dynamic programming configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result, tictactoe::RewardShaping};

/// Settings shared by value iteration and policy iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueIterationConfig {
    /// Discount factor γ in (0, 1]
    pub gamma: f64,
    /// Convergence threshold on the largest per-sweep value change
    pub theta: f64,
    /// Sweep cap (improvement-round cap for policy iteration)
    pub max_sweeps: usize,
    /// Reward on non-terminal successor states
    pub shaping: RewardShaping,
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            theta: 1e-9,
            max_sweeps: 100,
            shaping: RewardShaping::TerminalOnly,
        }
    }
}

impl ValueIterationConfig {
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    pub fn with_shaping(mut self, shaping: RewardShaping) -> Self {
        self.shaping = shaping;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return Err(Error::config(format!(
                "gamma must be in (0, 1], got {}",
                self.gamma
            )));
        }
        if !(self.theta > 0.0) {
            return Err(Error::config(format!(
                "theta must be positive, got {}",
                self.theta
            )));
        }
        if self.max_sweeps == 0 {
            return Err(Error::config("max_sweeps must be at least 1"));
        }
        if let RewardShaping::ThreatBonus { bonus } = self.shaping {
            if !bonus.is_finite() {
                return Err(Error::config(format!("threat bonus must be finite, got {bonus}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ValueIterationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gamma, 1.0);
        assert_eq!(config.shaping, RewardShaping::TerminalOnly);
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = ValueIterationConfig::default();
        assert!(base.with_gamma(0.0).validate().is_err());
        assert!(base.with_gamma(1.5).validate().is_err());
        assert!(base.with_theta(0.0).validate().is_err());
        assert!(base.with_max_sweeps(0).validate().is_err());
        assert!(
            base.with_shaping(RewardShaping::ThreatBonus { bonus: f64::NAN })
                .validate()
                .is_err()
        );
        assert!(base.with_gamma(0.9).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ValueIterationConfig =
            serde_json::from_str(r#"{"gamma": 0.95, "shaping": {"kind": "threat_bonus", "bonus": 0.5}}"#)
                .unwrap();
        assert_eq!(config.gamma, 0.95);
        assert_eq!(config.max_sweeps, 100);
        assert_eq!(config.shaping, RewardShaping::threat_bonus());
    }
}
