//! Synchronous value iteration

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{ValueIterationConfig, best_lookahead, extract_policy, initial_values};
use crate::{
    Result,
    persistence::{Method, SavedPolicy, TrainingMetadata},
    ports::TrainingObserver,
    tables::{Policy, ValueTable},
    tictactoe::StateSpace,
};

/// Output of a dynamic programming run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpSolution {
    /// Value of every valid state in X's frame
    pub values: ValueTable,
    /// Greedy action for every non-terminal valid state
    pub policy: Policy,
    /// Sweeps (or improvement rounds) performed
    pub sweeps: usize,
    /// Whether the run stopped below θ rather than at the cap
    pub converged: bool,
    /// Largest value change of the last sweep
    pub final_delta: f64,
}

impl DpSolution {
    /// Package the solution for a [`crate::ports::PolicyStore`]
    pub fn into_saved(self, method: Method) -> SavedPolicy {
        let metadata = TrainingMetadata {
            sweeps: Some(self.sweeps),
            converged: Some(self.converged),
            ..TrainingMetadata::default()
        };
        SavedPolicy::new(method, self.policy)
            .with_values(self.values)
            .with_metadata(metadata)
    }
}

/// Value iteration over every turn-consistent board.
///
/// Each sweep computes a fresh table from the previous sweep's values, so the
/// result does not depend on the order states are visited in.
///
/// # Examples
///
/// ```no_run
/// use noughts::value_iteration::{ValueIterationConfig, ValueIterationSolver};
///
/// let mut solver = ValueIterationSolver::new(ValueIterationConfig::default())?;
/// let solution = solver.solve()?;
/// assert!(solution.converged);
/// # Ok::<(), noughts::Error>(())
/// ```
pub struct ValueIterationSolver {
    config: ValueIterationConfig,
    space: StateSpace,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl ValueIterationSolver {
    /// Create a solver, validating `config` and enumerating the state space.
    pub fn new(config: ValueIterationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            space: StateSpace::enumerate(),
            observers: Vec::new(),
        })
    }

    /// Add an observer notified after every sweep
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ValueIterationConfig {
        &self.config
    }

    /// Run sweeps until convergence or the sweep cap.
    ///
    /// Hitting the cap is logged as a warning and the values reached so far
    /// are returned with `converged == false`.
    pub fn solve(&mut self) -> Result<DpSolution> {
        let ValueIterationConfig {
            gamma,
            theta,
            max_sweeps,
            shaping,
        } = self.config;

        info!(
            "value iteration over {} states (gamma={gamma}, theta={theta:e}, shaping={shaping:?})",
            self.space.len()
        );
        for observer in &mut self.observers {
            observer.on_training_start("value iteration", max_sweeps)?;
        }

        let mut values = initial_values(&self.space);
        let mut sweeps = 0;
        let mut delta = f64::INFINITY;

        while sweeps < max_sweeps {
            let mut next = values.clone();
            for state in self.space.decision_states() {
                if let Some((_, value)) = best_lookahead(state, &values, &shaping, gamma)? {
                    next.set(*state, value);
                }
            }

            delta = next.max_abs_difference(&values);
            values = next;
            sweeps += 1;
            debug!("sweep {sweeps}: delta = {delta:e}");
            for observer in &mut self.observers {
                observer.on_sweep_end(sweeps, delta)?;
            }

            if delta < theta {
                break;
            }
        }

        let converged = delta < theta;
        if !converged {
            warn!(
                "value iteration stopped after {sweeps} sweeps without converging \
                 (delta = {delta:e}, theta = {theta:e})"
            );
        }

        let policy = extract_policy(&self.space, &values, &shaping, gamma)?;

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        info!(
            "value iteration finished after {sweeps} sweeps; policy covers {} states",
            policy.len()
        );

        Ok(DpSolution {
            values,
            policy,
            sweeps,
            converged,
            final_delta: delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Action, BoardState, RewardShaping};

    fn solve(config: ValueIterationConfig) -> DpSolution {
        ValueIterationSolver::new(config).unwrap().solve().unwrap()
    }

    #[test]
    fn test_converges_with_defaults() {
        let solution = solve(ValueIterationConfig::default());
        assert!(solution.converged);
        // ply depth bounds the number of sweeps needed
        assert!(solution.sweeps <= 11, "took {} sweeps", solution.sweeps);
        assert_eq!(solution.values.len(), 6_046);
        assert_eq!(solution.values.get(&BoardState::new()), 0.0);
    }

    #[test]
    fn test_takes_immediate_win() {
        let solution = solve(ValueIterationConfig::default());
        // only (0, 2) wins outright; anything else lets O win on row 1
        let state = BoardState::from_string("XX.OO....").unwrap();
        assert_eq!(solution.policy.get(&state), Some(Action::new(0, 2).unwrap()));
    }

    #[test]
    fn test_o_blocks_and_wins() {
        let solution = solve(ValueIterationConfig::default());
        let state = BoardState::from_string("XX.OO.X..").unwrap();
        assert_eq!(solution.policy.get(&state), Some(Action::new(1, 2).unwrap()));
        assert!(solution.values.get(&state) < 0.0);
    }

    #[test]
    fn test_values_stay_within_terminal_rewards() {
        let solution = solve(ValueIterationConfig::default());
        let x_to_win = BoardState::from_string("XX.OO....").unwrap();
        let o_to_win = BoardState::from_string("XX.OO.X..").unwrap();
        let x_won = BoardState::from_string("XXXOO....").unwrap();
        assert_eq!(solution.values.get(&x_to_win), 1.0);
        assert_eq!(solution.values.get(&o_to_win), -1.0);
        assert_eq!(solution.values.get(&x_won), 1.0);
        for (state, &value) in solution.values.iter() {
            assert!(value.abs() <= 1.0, "{state:?} valued at {value}");
        }
    }

    #[test]
    fn test_sweep_cap_returns_unconverged_solution() {
        let solution = solve(ValueIterationConfig::default().with_max_sweeps(2));
        assert!(!solution.converged);
        assert_eq!(solution.sweeps, 2);
        assert!(solution.final_delta >= 1e-9);
        assert!(!solution.policy.is_empty());
    }

    #[test]
    fn test_threat_shaping_covers_every_decision_state() {
        let config = ValueIterationConfig::default()
            .with_gamma(0.9)
            .with_shaping(RewardShaping::threat_bonus());
        let solution = solve(config);
        assert!(solution.converged);

        let space = StateSpace::enumerate();
        assert_eq!(solution.policy.len(), space.decision_states().count());
        let state = BoardState::from_string("XX.OO....").unwrap();
        assert_eq!(solution.policy.get(&state), Some(Action::new(0, 2).unwrap()));
    }

    #[test]
    fn test_into_saved_keeps_metadata() {
        let solution = solve(ValueIterationConfig::default());
        let sweeps = solution.sweeps;
        let saved = solution.into_saved(Method::ValueIteration);
        assert_eq!(saved.metadata.sweeps, Some(sweeps));
        assert_eq!(saved.metadata.converged, Some(true));
        assert!(saved.values.is_some());
    }
}
