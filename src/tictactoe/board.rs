//! Cells, players and the turn-consistent board

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{action::Action, lines};
use crate::{Error, Result};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub(crate) fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Sign of this player's preference in the X-maximising value frame.
    pub fn sign(self) -> f64 {
        match self {
            Player::X => 1.0,
            Player::O => -1.0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A turn-consistent 3x3 board.
///
/// The nine cells are stored row-major and are the whole identity of the
/// state: the player to move is derived from the piece counts (equal counts
/// means X to move), so two boards with the same cells are the same key in
/// every table. Construction through [`BoardState::from_cells`] or
/// [`BoardState::from_string`] rejects boards where X does not equal or lead
/// O by exactly one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardState {
    cells: [Cell; 9],
}

fn tally(cells: &[Cell; 9]) -> (usize, usize) {
    cells.iter().fold((0, 0), |(x, o), cell| match cell {
        Cell::X => (x + 1, o),
        Cell::O => (x, o + 1),
        Cell::Empty => (x, o),
    })
}

fn turn_consistent((x, o): (usize, usize)) -> bool {
    x == o || x == o + 1
}

impl BoardState {
    /// The empty board, X to move
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Wrap raw cells, rejecting boards that break the alternating-turn rule
    /// with [`Error::InvalidPieceCounts`].
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self> {
        let (x_count, o_count) = tally(&cells);
        if !turn_consistent((x_count, o_count)) {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }
        Ok(Self { cells })
    }

    pub(crate) fn from_cells_unchecked(cells: [Cell; 9]) -> Self {
        debug_assert!(turn_consistent(tally(&cells)));
        Self { cells }
    }

    /// Parse a board label.
    ///
    /// Exactly nine cell characters are read row-major; whitespace and the row
    /// separators `/`, `|` and `,` are ignored. Empty cells may be written as
    /// `.`, `_` or `-`.
    ///
    /// ```
    /// use noughts::tictactoe::{BoardState, Player};
    ///
    /// let board = BoardState::from_string("XOX/OXO/.XO").unwrap();
    /// assert_eq!(board.to_move(), Player::X);
    /// assert_eq!(board.legal_actions().len(), 1);
    /// ```
    pub fn from_string(s: &str) -> Result<Self> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '|' | ','))
            .collect();

        if symbols.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: symbols.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (position, (slot, &symbol)) in cells.iter_mut().zip(&symbols).enumerate() {
            *slot = Cell::from_char(symbol).ok_or_else(|| Error::InvalidCellCharacter {
                character: symbol,
                position,
                context: s.to_string(),
            })?;
        }

        Self::from_cells(cells)
    }

    /// The nine cells in row-major order
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// X moves on equal counts, O otherwise
    pub fn to_move(&self) -> Player {
        let (x, o) = tally(&self.cells);
        if x == o { Player::X } else { Player::O }
    }

    /// Number of X and O pieces on the board
    pub fn piece_counts(&self) -> (usize, usize) {
        tally(&self.cells)
    }

    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.position()]
    }

    pub fn is_empty(&self, action: Action) -> bool {
        self.get(action) == Cell::Empty
    }

    /// All empty cells in row-major order; empty only when the board is full.
    pub fn legal_actions(&self) -> Vec<Action> {
        Action::all().filter(|&a| self.is_empty(a)).collect()
    }

    /// Place `player`'s marker on the cell named by `action`.
    ///
    /// Fails with an illegal-move error ([`Error::is_illegal_move`]) when the
    /// action is off the board, the game is already over, `player` is not the
    /// player to move, or the cell is occupied.
    #[must_use = "apply returns a new board state; the original is unchanged"]
    pub fn apply(&self, action: Action, player: Player) -> Result<BoardState> {
        if action.row >= 3 || action.col >= 3 {
            return Err(Error::InvalidPosition {
                position: action.row * 3 + action.col,
            });
        }
        if self.is_terminal() {
            return Err(Error::GameOver);
        }

        let expected = self.to_move();
        if player != expected {
            return Err(Error::OutOfTurn { player, expected });
        }
        if !self.is_empty(action) {
            return Err(Error::CellOccupied {
                row: action.row,
                col: action.col,
            });
        }

        let mut next = *self;
        next.cells[action.position()] = player.to_cell();
        Ok(next)
    }

    /// [`BoardState::apply`] for whoever is to move
    #[must_use = "successor returns a new board state; the original is unchanged"]
    pub fn successor(&self, action: Action) -> Result<BoardState> {
        self.apply(action, self.to_move())
    }

    /// The marker that completes a line, if any.
    ///
    /// Lines are scanned rows, then columns, then diagonals; the first
    /// complete line decides.
    pub fn winner(&self) -> Option<Player> {
        lines::line_owner(&self.cells)
    }

    fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// A line is complete or no cell is left
    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Nine-character label such as `"XO.X....."`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .chunks(3)
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect();
        f.write_str(&rows.join("\n"))
    }
}

impl Serialize for BoardState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for BoardState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        BoardState::from_string(&label).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(label: &str) -> BoardState {
        BoardState::from_string(label).unwrap()
    }

    fn at(pos: usize) -> Action {
        Action::from_position(pos).unwrap()
    }

    /// Alternate moves from the empty board
    fn replay(positions: &[usize]) -> BoardState {
        positions
            .iter()
            .fold(BoardState::new(), |state, &pos| state.successor(at(pos)).unwrap())
    }

    #[test]
    fn test_empty_board_has_nine_moves_for_x() {
        let state = BoardState::new();
        assert_eq!(state.to_move(), Player::X);
        assert_eq!(state.legal_actions(), Action::all().collect::<Vec<_>>());
        assert_eq!(state.piece_counts(), (0, 0));
    }

    #[test]
    fn test_apply_places_marker_and_flips_turn() {
        let state = board("....X....").apply(at(0), Player::O).unwrap();
        assert_eq!(state.get(at(0)), Cell::O);
        assert_eq!(state.to_move(), Player::X);
        assert_eq!(state.piece_counts(), (1, 1));
    }

    #[test]
    fn test_occupied_cell_is_illegal() {
        let err = board("....X....").apply(at(4), Player::O).unwrap_err();
        assert!(err.is_illegal_move());
        assert!(matches!(err, Error::CellOccupied { row: 1, col: 1 }));
    }

    #[test]
    fn test_wrong_player_is_illegal() {
        let err = board("X...O....").apply(at(8), Player::O).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfTurn {
                player: Player::O,
                expected: Player::X
            }
        ));
    }

    #[test]
    fn test_no_moves_after_a_win() {
        let state = replay(&[6, 0, 7, 1, 8]);
        assert_eq!(state.winner(), Some(Player::X));
        assert!(matches!(state.successor(at(2)), Err(Error::GameOver)));
    }

    #[test]
    fn test_o_wins_on_a_diagonal() {
        let state = replay(&[1, 2, 3, 4, 8, 6]);
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::O));
        assert!(!state.is_draw());
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let state = replay(&[4, 0, 8, 2, 1, 7, 6, 3, 5]);
        assert_eq!(state.encode(), "OXOOXXXOX");
        assert!(state.is_draw());
        assert!(state.legal_actions().is_empty());
    }

    #[test]
    fn test_from_string_errors() {
        assert!(matches!(
            BoardState::from_string("XO/"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            BoardState::from_string("XOX/OXO/.XOXX"),
            Err(Error::InvalidBoardLength { got: 11, .. })
        ));
        assert!(matches!(
            BoardState::from_string("..#......"),
            Err(Error::InvalidCellCharacter {
                character: '#',
                position: 2,
                ..
            })
        ));
        assert!(matches!(
            BoardState::from_string("OO.X....."),
            Err(Error::InvalidPieceCounts {
                x_count: 1,
                o_count: 2
            })
        ));
    }

    #[test]
    fn test_label_accepts_separators_and_aliases() {
        assert_eq!(board("x-o | -x- | o-_").encode(), "X.O.X.O..");
        assert_eq!(board("X0X/...,...").encode(), "XOX......");
    }

    #[test]
    fn test_display_is_three_rows() {
        assert_eq!(board(".X.O.....").to_string(), ".X.\nO..\n...");
    }

    #[test]
    fn test_serializes_as_label() {
        let state = board("..X.O....");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"..X.O....\"");
        assert_eq!(serde_json::from_str::<BoardState>(&json).unwrap(), state);
        assert!(serde_json::from_str::<BoardState>("\"XXX......\"").is_err());
    }
}
