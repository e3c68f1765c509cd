//! Board coordinates for moves

use std::fmt;

use serde::{Deserialize, Serialize};

/// A move target: the (row, column) of an empty cell.
///
/// Row and column are both in `0..3`; the flat row-major position is
/// `row * 3 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    /// Create an action, validating the coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] when either coordinate is
    /// outside the 3x3 grid.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Action { row, col })
        } else {
            Err(crate::Error::InvalidPosition {
                position: row * 3 + col,
            })
        }
    }

    /// Create an action from a flat row-major position (0-8).
    pub fn from_position(position: usize) -> Result<Self, crate::Error> {
        if position < 9 {
            Ok(Action {
                row: position / 3,
                col: position % 3,
            })
        } else {
            Err(crate::Error::InvalidPosition { position })
        }
    }

    /// Flat row-major position (0-8)
    pub fn position(self) -> usize {
        self.row * 3 + self.col
    }

    /// All nine cells in row-major order
    pub fn all() -> impl Iterator<Item = Action> {
        (0..9).map(|position| Action {
            row: position / 3,
            col: position % 3,
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
