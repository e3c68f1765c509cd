//! ε-greedy behavior policy shared by the sampling learners
//!
//! With probability ε an action is drawn uniformly from the legal actions;
//! otherwise one of the actions maximising `Q(s, ·)` is taken, the remaining
//! `1 - ε` mass being split evenly across every tied maximum. An unvisited
//! state therefore behaves uniformly (all actions tie at zero). Because ties
//! are randomised, reproducibility comes from the seeded generator the
//! caller passes in, never from ambient randomness.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tables::QTable,
    tictactoe::{Action, BoardState},
};

/// Exploration schedule: ε starts at `epsilon` and after every episode
/// becomes `max(min_epsilon, ε · epsilon_decay)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationConfig {
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
}

impl ExplorationConfig {
    pub fn new(epsilon: f64, epsilon_decay: f64, min_epsilon: f64) -> Self {
        Self {
            epsilon,
            epsilon_decay,
            min_epsilon,
        }
    }

    /// Check every rate is a probability and the floor does not exceed the start.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("min_epsilon", self.min_epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if self.min_epsilon > self.epsilon {
            return Err(Error::config(format!(
                "min_epsilon ({}) exceeds epsilon ({})",
                self.min_epsilon, self.epsilon
            )));
        }
        Ok(())
    }
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self::new(0.2, 0.9999, 0.05)
    }
}

/// Running ε-greedy behavior policy for one training role
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    config: ExplorationConfig,
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(config: ExplorationConfig) -> Self {
        Self {
            config,
            epsilon: config.epsilon,
        }
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Anneal ε toward its floor; called once per finished episode
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }

    /// Probability the behavior policy assigns to each of `actions`
    pub fn probabilities(&self, q: &QTable, state: &BoardState, actions: &[Action]) -> Vec<f64> {
        if actions.is_empty() {
            return Vec::new();
        }

        let explore = self.epsilon / actions.len() as f64;
        let greedy = q.greedy_actions(state, actions);
        let ties = greedy.len() as f64;

        actions
            .iter()
            .map(|action| {
                if greedy.contains(action) {
                    explore + (1.0 - self.epsilon) / ties
                } else {
                    explore
                }
            })
            .collect()
    }

    /// Draw an action and report the probability it was drawn with.
    ///
    /// Returns `None` when `actions` is empty.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        q: &QTable,
        state: &BoardState,
        actions: &[Action],
        rng: &mut R,
    ) -> Option<(Action, f64)> {
        let probabilities = self.probabilities(q, state, actions);
        let ticket: f64 = rng.random();

        let mut cumulative = 0.0;
        for (&action, &probability) in actions.iter().zip(&probabilities) {
            cumulative += probability;
            if ticket < cumulative {
                return Some((action, probability));
            }
        }

        // rounding left the ticket past the last bucket
        actions.last().copied().zip(probabilities.last().copied())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn a(pos: usize) -> Action {
        Action::from_position(pos).unwrap()
    }

    #[test]
    fn test_unvisited_state_is_uniform() {
        let greedy = EpsilonGreedy::new(ExplorationConfig::new(0.2, 1.0, 0.2));
        let q = QTable::new();
        let actions = [a(0), a(1), a(2), a(3)];
        let probs = greedy.probabilities(&q, &BoardState::new(), &actions);
        for p in probs {
            assert!((p - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_greedy_mass_is_split_across_ties() {
        let greedy = EpsilonGreedy::new(ExplorationConfig::new(0.2, 1.0, 0.2));
        let state = BoardState::new();
        let mut q = QTable::new();
        q.set(state, a(0), 1.0);
        q.set(state, a(1), 1.0);
        q.set(state, a(2), -1.0);
        q.set(state, a(3), -1.0);

        let probs = greedy.probabilities(&q, &state, &[a(0), a(1), a(2), a(3)]);
        assert!((probs[0] - 0.45).abs() < 1e-12);
        assert!((probs[1] - 0.45).abs() < 1e-12);
        assert!((probs[2] - 0.05).abs() < 1e-12);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_reports_probability() {
        let greedy = EpsilonGreedy::new(ExplorationConfig::new(0.0, 1.0, 0.0));
        let state = BoardState::new();
        let mut q = QTable::new();
        q.set(state, a(4), 1.0);
        let mut rng = StdRng::seed_from_u64(5);

        let (action, prob) = greedy
            .sample(&q, &state, &state.legal_actions(), &mut rng)
            .unwrap();
        assert_eq!(action, a(4));
        assert_eq!(prob, 1.0);
        assert!(greedy.sample(&q, &state, &[], &mut rng).is_none());
    }

    #[test]
    fn test_decay_stops_at_floor() {
        let mut greedy = EpsilonGreedy::new(ExplorationConfig::new(0.2, 0.5, 0.06));
        greedy.decay();
        assert!((greedy.epsilon() - 0.1).abs() < 1e-12);
        greedy.decay();
        assert!((greedy.epsilon() - 0.06).abs() < 1e-12);
        greedy.decay();
        assert!((greedy.epsilon() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(ExplorationConfig::default().validate().is_ok());
        assert!(ExplorationConfig::new(1.5, 0.9, 0.1).validate().is_err());
        assert!(ExplorationConfig::new(0.1, 0.9, 0.2).validate().is_err());
    }
}
