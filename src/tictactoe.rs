//! Tic-Tac-Toe game model: board, moves, termination and rewards

pub mod action;
pub mod board;
pub mod game;
mod lines;
pub mod reward;
pub mod states;

pub use action::Action;
pub use board::{BoardState, Cell, Player};
pub use game::{Game, GameOutcome, Move};
pub use reward::{RewardShaping, THREAT_BONUS, terminal_reward};
pub use states::{StateSpace, count_reachable_states, enumerate_valid_states};
