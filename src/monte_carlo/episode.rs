//! Episode records and the weighted importance-sampling update

use serde::{Deserialize, Serialize};

use crate::{
    tables::QTable,
    tictactoe::{Action, BoardState},
};

/// One learner decision in a sampled episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub state: BoardState,
    pub action: Action,
    /// Reward observed after the action (and the opponent's reply)
    pub reward: f64,
    /// Probability the behavior policy gave `action`
    pub behavior_probability: f64,
}

/// Weighted importance-sampling update over a finished episode.
///
/// Steps are processed newest first. For each step the return becomes
/// `G = γ·G + r`, the weight is divided by the step's behavior probability,
/// the cumulative weight `C(s, a)` grows by `W`, and
/// `Q(s, a) += (W / C(s, a)) · (G − Q(s, a))`. Missing `Q` and `C` entries read
/// as zero, so a first visit sets `Q(s, a)` to `G`.
///
/// # Examples
///
/// ```
/// use noughts::{
///     monte_carlo::{Step, apply_weighted_returns},
///     tables::QTable,
///     tictactoe::{Action, BoardState},
/// };
///
/// let state = BoardState::new();
/// let action = Action::new(1, 1).unwrap();
/// let (mut q, mut c) = (QTable::new(), QTable::new());
///
/// let step = Step { state, action, reward: 1.0, behavior_probability: 0.25 };
/// apply_weighted_returns(&[step], 0.9, &mut q, &mut c);
///
/// assert_eq!(q.get(&state, action), 1.0);
/// assert_eq!(c.get(&state, action), 4.0);
/// ```
pub fn apply_weighted_returns(steps: &[Step], gamma: f64, q: &mut QTable, c: &mut QTable) {
    let mut g = 0.0;
    let mut w = 1.0;

    for step in steps.iter().rev() {
        g = gamma * g + step.reward;
        w /= step.behavior_probability;

        let cumulative = c.add(step.state, step.action, w);
        let current = q.get(&step.state, step.action);
        q.set(step.state, step.action, current + (w / cumulative) * (g - current));
    }
}
