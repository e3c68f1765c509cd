//! Exact dynamic programming over the enumerated state space
//!
//! Both solvers keep a single value function in X's frame: X maximises it and
//! O minimises it. A one-step lookahead from a state `s` with mover `m` scores
//! action `a` as
//!
//! ```text
//! sign(m) · reward(result(s, a), m) + γ · V(result(s, a))
//! ```
//!
//! where `sign(X) = +1` and `sign(O) = -1` convert the mover's reward into X's
//! frame. Terminal states are pinned to their terminal reward, and a move that
//! ends the game scores that reward alone with no bootstrap term.
//!
//! ## Solvers
//!
//! - [`ValueIterationSolver`]: synchronous sweeps until the largest change
//!   drops below θ or the sweep cap is hit
//! - [`PolicyIterationSolver`]: alternate full policy evaluation and greedy
//!   improvement until the policy is stable

pub mod config;
pub mod policy_iteration;
pub mod solver;

pub use config::ValueIterationConfig;
pub use policy_iteration::PolicyIterationSolver;
pub use solver::{DpSolution, ValueIterationSolver};

use crate::{
    Result,
    tables::{Policy, ValueTable},
    tictactoe::{Action, BoardState, Player, RewardShaping, StateSpace, terminal_reward},
};

/// Lookahead score of playing `action` in `state`, in X's frame.
pub(crate) fn action_value(
    state: &BoardState,
    action: Action,
    values: &ValueTable,
    shaping: &RewardShaping,
    gamma: f64,
) -> Result<f64> {
    let mover = state.to_move();
    let next = state.apply(action, mover)?;
    let reward = mover.sign() * shaping.reward(&next, mover);
    if next.is_terminal() {
        return Ok(reward);
    }
    Ok(reward + gamma * values.get(&next))
}

/// Best action for the mover and its lookahead score.
///
/// X keeps the largest score and O the smallest; the first action in
/// row-major order wins ties. `None` for terminal states.
pub(crate) fn best_lookahead(
    state: &BoardState,
    values: &ValueTable,
    shaping: &RewardShaping,
    gamma: f64,
) -> Result<Option<(Action, f64)>> {
    if state.is_terminal() {
        return Ok(None);
    }

    let mover = state.to_move();
    let mut best: Option<(Action, f64)> = None;
    for action in state.legal_actions() {
        let value = action_value(state, action, values, shaping, gamma)?;
        let improves = match best {
            None => true,
            Some((_, current)) => match mover {
                Player::X => value > current,
                Player::O => value < current,
            },
        };
        if improves {
            best = Some((action, value));
        }
    }
    Ok(best)
}

/// V(s) = terminal reward for finished boards, 0 elsewhere.
pub(crate) fn initial_values(space: &StateSpace) -> ValueTable {
    let mut values = ValueTable::with_capacity(space.len());
    for state in space.states() {
        let value = if state.is_terminal() {
            terminal_reward(state, Player::X)
        } else {
            0.0
        };
        values.set(*state, value);
    }
    values
}

/// Greedy policy with respect to `values` for every decision state.
pub(crate) fn extract_policy(
    space: &StateSpace,
    values: &ValueTable,
    shaping: &RewardShaping,
    gamma: f64,
) -> Result<Policy> {
    let mut policy = Policy::new();
    for state in space.decision_states() {
        if let Some((action, _)) = best_lookahead(state, values, shaping, gamma)? {
            policy.insert(*state, action);
        }
    }
    Ok(policy)
}
