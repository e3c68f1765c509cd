//! A game record: the board plus the moves that produced it

use serde::{Deserialize, Serialize};

use super::{
    action::Action,
    board::{BoardState, Player},
};
use crate::{Error, Result};

/// One placed marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal state, `None` while the game is still running
    pub fn of(state: &BoardState) -> Option<Self> {
        if let Some(winner) = state.winner() {
            Some(GameOutcome::Win(winner))
        } else if state.is_terminal() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

/// A game in progress or finished, with its move history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    state: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            state: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play an action for the player to move
    pub fn play(&mut self, action: Action) -> Result<()> {
        if self.is_over() {
            return Err(Error::GameOver);
        }

        let player = self.state.to_move();
        self.state = self.state.apply(action, player)?;
        self.moves.push(Move { action, player });
        self.outcome = GameOutcome::of(&self.state);

        Ok(())
    }

    /// Board after the last recorded move
    pub fn current_state(&self) -> BoardState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
