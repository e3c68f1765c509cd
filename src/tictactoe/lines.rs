//! The eight three-in-a-row lines and queries over them

use super::{Cell, Player};

/// Cell indices of every line: rows, then columns, then the two diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn markers(cells: &[Cell; 9], line: [usize; 3]) -> [Cell; 3] {
    line.map(|idx| cells[idx])
}

/// Lines fully held by `player`
pub fn lines_held_by(cells: &[Cell; 9], player: Player) -> impl Iterator<Item = [usize; 3]> + '_ {
    let mark = player.to_cell();
    LINES
        .into_iter()
        .filter(move |&line| markers(cells, line) == [mark; 3])
}

/// Owner of the first complete line in [`LINES`] order
pub fn line_owner(cells: &[Cell; 9]) -> Option<Player> {
    LINES.into_iter().find_map(|line| match markers(cells, line) {
        [a, b, c] if a == b && b == c => a.to_player(),
        _ => None,
    })
}

/// Empty cell that would complete a line for `player`
pub fn completing_cell(cells: &[Cell; 9], player: Player) -> Option<usize> {
    let mark = player.to_cell();
    LINES.into_iter().find_map(|line| {
        let row = markers(cells, line);
        let own = row.iter().filter(|&&c| c == mark).count();
        let gap = row.iter().position(|&c| c == Cell::Empty);
        match (own, gap) {
            (2, Some(offset)) => Some(line[offset]),
            _ => None,
        }
    })
}

/// Whether `player` has two in a line with the third cell open
pub fn has_threat(cells: &[Cell; 9], player: Player) -> bool {
    completing_cell(cells, player).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(board: &str) -> [Cell; 9] {
        let mut out = [Cell::Empty; 9];
        for (slot, ch) in out.iter_mut().zip(board.chars()) {
            *slot = match ch {
                'X' => Cell::X,
                'O' => Cell::O,
                _ => Cell::Empty,
            };
        }
        out
    }

    #[test]
    fn test_column_owner() {
        let board = cells("OX.OX.O..");
        assert_eq!(lines_held_by(&board, Player::O).collect::<Vec<_>>(), vec![[0, 3, 6]]);
        assert_eq!(lines_held_by(&board, Player::X).next(), None);
        assert_eq!(line_owner(&board), Some(Player::O));
    }

    #[test]
    fn test_anti_diagonal_owner() {
        assert_eq!(line_owner(&cells("OOX.X.X..")), Some(Player::X));
    }

    #[test]
    fn test_row_scanned_before_column() {
        let board = cells("XXXX..X..");
        assert_eq!(lines_held_by(&board, Player::X).next(), Some([0, 1, 2]));
        assert_eq!(lines_held_by(&board, Player::X).count(), 2);
    }

    #[test]
    fn test_open_board_has_no_owner() {
        assert_eq!(line_owner(&cells("X...O....")), None);
    }

    #[test]
    fn test_completing_cell_on_diagonal() {
        let board = cells("X.O.X..O.");
        assert_eq!(completing_cell(&board, Player::X), Some(8));
        assert!(has_threat(&board, Player::X));
        assert!(!has_threat(&board, Player::O));
    }

    #[test]
    fn test_closed_pair_is_not_a_threat() {
        let board = cells("OXX......");
        assert_eq!(completing_cell(&board, Player::X), None);
    }
}
