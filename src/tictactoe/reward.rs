//! Reward functions

use serde::{Deserialize, Serialize};

use super::{
    board::{BoardState, Player},
    lines::has_threat,
};

/// Default magnitude of the two-in-a-row bonus
pub const THREAT_BONUS: f64 = 0.5;

/// Terminal reward from `player`'s perspective: +1 win, -1 loss, 0 otherwise.
pub fn terminal_reward(state: &BoardState, player: Player) -> f64 {
    match state.winner() {
        Some(winner) if winner == player => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

/// How non-terminal states are rewarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RewardShaping {
    /// Only finished games carry reward
    #[default]
    TerminalOnly,
    /// Non-terminal states score `+bonus` when the evaluated player holds an
    /// open two-in-a-row, else `-bonus` when the opponent does.
    ///
    /// Bonuses accumulate along a line of play, so shaped values are not
    /// bounded by the terminal rewards. A greedy policy over them may put off
    /// an available win to collect bonuses first. The game is still won
    /// when the alternative is to lose it.
    ThreatBonus { bonus: f64 },
}

impl RewardShaping {
    /// The shaping used by the threat-aware DP variant
    pub fn threat_bonus() -> Self {
        RewardShaping::ThreatBonus {
            bonus: THREAT_BONUS,
        }
    }

    /// Reward of `state` from `player`'s perspective.
    pub fn reward(&self, state: &BoardState, player: Player) -> f64 {
        if state.is_terminal() {
            return terminal_reward(state, player);
        }

        match *self {
            RewardShaping::TerminalOnly => 0.0,
            RewardShaping::ThreatBonus { bonus } => {
                if has_threat(state.cells(), player) {
                    bonus
                } else if has_threat(state.cells(), player.opponent()) {
                    -bonus
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_reward() {
        let x_wins = BoardState::from_string("XXXOO....").unwrap();
        assert_eq!(terminal_reward(&x_wins, Player::X), 1.0);
        assert_eq!(terminal_reward(&x_wins, Player::O), -1.0);

        let draw = BoardState::from_string("XOXXOOOXX").unwrap();
        assert_eq!(terminal_reward(&draw, Player::X), 0.0);
        assert_eq!(terminal_reward(&draw, Player::O), 0.0);
    }

    #[test]
    fn test_terminal_only_ignores_threats() {
        let state = BoardState::from_string("XX..O....").unwrap();
        assert_eq!(RewardShaping::TerminalOnly.reward(&state, Player::X), 0.0);
    }

    #[test]
    fn test_threat_bonus() {
        let shaping = RewardShaping::threat_bonus();
        let state = BoardState::from_string("XX..O....").unwrap();
        assert_eq!(shaping.reward(&state, Player::X), 0.5);
        assert_eq!(shaping.reward(&state, Player::O), -0.5);

        let quiet = BoardState::from_string("X...O....").unwrap();
        assert_eq!(shaping.reward(&quiet, Player::X), 0.0);
    }

    #[test]
    fn test_threat_bonus_keeps_terminal_reward() {
        let shaping = RewardShaping::threat_bonus();
        let o_wins = BoardState::from_string("XX.OOOX..").unwrap();
        assert_eq!(shaping.reward(&o_wins, Player::O), 1.0);
    }
}
