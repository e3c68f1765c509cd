//! Error types for the noughts crate

use std::path::PathBuf;

use thiserror::Error;

use crate::tictactoe::Player;

/// Everything the game model, solvers and stores can fail with
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("illegal move: game already over")]
    GameOver,

    #[error("illegal move: it is {expected}'s turn, not {player}'s")]
    OutOfTurn { player: Player, expected: Player },

    #[error("illegal move: cell index {position} is off the board (0-8)")]
    InvalidPosition { position: usize },

    #[error("board label '{context}' has {got} cells, need {expected}")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("board label '{context}': unexpected '{character}' at cell {position}")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("board has {x_count} X and {o_count} O; X must equal O or lead by one")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("opponent policy not found at {path:?}; train or supply one before learning")]
    MissingOpponentPolicy { path: PathBuf },

    #[error("unsupported saved policy version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("no saved policy stored under {path:?}")]
    PolicyNotFound { path: PathBuf },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("bad progress template: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// Whether this error reports an attempt to play an illegal move.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            Error::CellOccupied { .. }
                | Error::GameOver
                | Error::OutOfTurn { .. }
                | Error::InvalidPosition { .. }
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Crate-wide result
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "perform I/O".to_string(),
            source,
        }
    }
}
