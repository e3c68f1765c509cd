//! Policy iteration: alternate full evaluation and greedy improvement

use log::{debug, info, warn};

use super::{DpSolution, ValueIterationConfig, action_value, best_lookahead, initial_values};
use crate::{
    Result,
    ports::TrainingObserver,
    tables::{Policy, ValueTable},
    tictactoe::{BoardState, Player, StateSpace},
};

const CENTRE: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Starting policy: the centre if free, else the first free corner, else the
/// first free cell.
pub fn heuristic_policy(space: &StateSpace) -> Policy {
    let mut policy = Policy::new();
    for state in space.decision_states() {
        let legal = state.legal_actions();
        let pick = legal
            .iter()
            .find(|a| a.position() == CENTRE)
            .or_else(|| legal.iter().find(|a| CORNERS.contains(&a.position())))
            .or_else(|| legal.first());
        if let Some(&action) = pick {
            policy.insert(*state, action);
        }
    }
    policy
}

/// Policy iteration solver sharing [`ValueIterationConfig`].
///
/// `max_sweeps` caps both the evaluation sweeps per round and the number of
/// improvement rounds. A state's action only changes when another action is
/// strictly better, so ties never make the policy oscillate.
pub struct PolicyIterationSolver {
    config: ValueIterationConfig,
    space: StateSpace,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl PolicyIterationSolver {
    pub fn new(config: ValueIterationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            space: StateSpace::enumerate(),
            observers: Vec::new(),
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Evaluate `policy` in place, returning the last sweep's delta.
    fn evaluate(&self, policy: &Policy, values: &mut ValueTable) -> Result<f64> {
        let ValueIterationConfig {
            gamma,
            theta,
            max_sweeps,
            shaping,
        } = self.config;

        let mut delta = f64::INFINITY;
        for _ in 0..max_sweeps {
            let mut next = values.clone();
            delta = 0.0;
            for (state, &action) in policy.iter() {
                let value = action_value(state, action, values, &shaping, gamma)?;
                delta = delta.max((value - values.get(state)).abs());
                next.set(*state, value);
            }
            *values = next;
            if delta < theta {
                break;
            }
        }
        Ok(delta)
    }

    /// Switch each state to a strictly better action; returns how many changed.
    fn improve(&self, policy: &mut Policy, values: &ValueTable) -> Result<usize> {
        let ValueIterationConfig { gamma, shaping, .. } = self.config;
        let mut changed = 0;

        for state in self.space.decision_states() {
            let Some((best, best_value)) = best_lookahead(state, values, &shaping, gamma)? else {
                continue;
            };
            let current = policy.get(state);
            let keep = match current {
                Some(action) => {
                    let value = action_value(state, action, values, &shaping, gamma)?;
                    !is_better(state, best_value, value)
                }
                None => false,
            };
            if !keep && current != Some(best) {
                policy.insert(*state, best);
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Run evaluation/improvement rounds until the policy is stable.
    pub fn solve(&mut self) -> Result<DpSolution> {
        let max_rounds = self.config.max_sweeps;
        info!(
            "policy iteration over {} states (gamma={}, shaping={:?})",
            self.space.len(),
            self.config.gamma,
            self.config.shaping
        );
        for observer in &mut self.observers {
            observer.on_training_start("policy iteration", max_rounds)?;
        }

        let mut policy = heuristic_policy(&self.space);
        let mut values = initial_values(&self.space);
        let mut rounds = 0;
        let mut stable = false;
        let mut delta = f64::INFINITY;

        while rounds < max_rounds {
            delta = self.evaluate(&policy, &mut values)?;
            let changed = self.improve(&mut policy, &values)?;
            rounds += 1;
            debug!("round {rounds}: evaluation delta = {delta:e}, {changed} actions changed");
            for observer in &mut self.observers {
                observer.on_sweep_end(rounds, delta)?;
            }
            if changed == 0 {
                stable = true;
                break;
            }
        }

        if !stable {
            warn!("policy iteration stopped after {rounds} rounds with the policy still changing");
        }
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        info!("policy iteration finished after {rounds} rounds");

        Ok(DpSolution {
            values,
            policy,
            sweeps: rounds,
            converged: stable,
            final_delta: delta,
        })
    }
}

fn is_better(state: &BoardState, candidate: f64, current: f64) -> bool {
    match state.to_move() {
        Player::X => candidate > current,
        Player::O => candidate < current,
    }
}
