//! The one-step Q-learning update

use crate::{
    tables::QTable,
    tictactoe::{Action, BoardState},
};

/// TD target `r + γ · max_a' Q(s', a')`, or just `r` when the episode ended.
pub fn q_learning_target(
    q: &QTable,
    reward: f64,
    next: &BoardState,
    done: bool,
    gamma: f64,
) -> f64 {
    if done {
        return reward;
    }
    let next_actions = next.legal_actions();
    if next_actions.is_empty() {
        reward
    } else {
        reward + gamma * q.max_q(next, &next_actions)
    }
}

/// Move `Q(s, a)` a fraction `alpha` toward `target`; returns the new value.
pub fn q_learning_update(
    q: &mut QTable,
    state: BoardState,
    action: Action,
    target: f64,
    alpha: f64,
) -> f64 {
    let current = q.get(&state, action);
    q.add(state, action, alpha * (target - current))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(pos: usize) -> Action {
        Action::from_position(pos).unwrap()
    }

    #[test]
    fn test_terminal_target_is_reward() {
        let q = QTable::new();
        let won = BoardState::from_string("XXXOO....").unwrap();
        assert_eq!(q_learning_target(&q, 1.0, &won, true, 0.9), 1.0);
    }

    #[test]
    fn test_target_bootstraps_off_greedy_value() {
        let next = BoardState::from_string("X...O....").unwrap();
        let mut q = QTable::new();
        q.set(next, a(8), 0.5);
        q.set(next, a(1), -0.25);

        let target = q_learning_target(&q, 0.0, &next, false, 0.9);
        assert!((target - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_update_moves_toward_target() {
        let state = BoardState::new();
        let mut q = QTable::new();
        q.set(state, a(4), 0.2);

        let updated = q_learning_update(&mut q, state, a(4), 1.0, 0.1);
        assert!((updated - 0.28).abs() < 1e-12);
        assert_eq!(q.get(&state, a(4)), updated);
    }
}
