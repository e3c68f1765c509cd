//! State-space enumeration and reachability

use std::collections::HashSet;

use super::{
    board::{BoardState, Cell, Player},
    lines::lines_held_by,
};

/// Number of raw 3x3 cell assignments (3^9)
pub const RAW_CONFIGURATIONS: usize = 19_683;

/// Number of boards satisfying the alternating-turn invariant
pub const TURN_VALID_STATES: usize = 6_046;

/// Number of boards reachable from the empty board by legal play
pub const REACHABLE_STATES: usize = 5_478;

fn decode(index: usize) -> [Cell; 9] {
    let mut n = index;
    let mut cells = [Cell::Empty; 9];
    for slot in (0..9).rev() {
        cells[slot] = match n % 3 {
            0 => Cell::Empty,
            1 => Cell::X,
            _ => Cell::O,
        };
        n /= 3;
    }
    cells
}

/// Lazily enumerate every board with `count(X) - count(O)` in `{0, 1}`.
///
/// Walks all 3^9 cell assignments in base-3 order (cell 0 most significant)
/// and keeps the turn-consistent ones. The sequence is finite; collect it
/// with [`StateSpace::enumerate`] when it has to be traversed more than once.
pub fn enumerate_valid_states() -> impl Iterator<Item = BoardState> {
    (0..RAW_CONFIGURATIONS).filter_map(|index| {
        let cells = decode(index);
        let x = cells.iter().filter(|&&c| c == Cell::X).count();
        let o = cells.iter().filter(|&&c| c == Cell::O).count();
        (x == o || x == o + 1).then(|| BoardState::from_cells_unchecked(cells))
    })
}

/// The enumerated valid state space, materialised once.
#[derive(Debug, Clone)]
pub struct StateSpace {
    states: Vec<BoardState>,
}

impl StateSpace {
    /// Enumerate and store every turn-valid state
    pub fn enumerate() -> Self {
        Self {
            states: enumerate_valid_states().collect(),
        }
    }

    pub fn states(&self) -> &[BoardState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Non-terminal states, in enumeration order
    pub fn decision_states(&self) -> impl Iterator<Item = &BoardState> {
        self.states.iter().filter(|s| !s.is_terminal())
    }
}

impl BoardState {
    /// Whether this board can arise from the empty board under legal play.
    ///
    /// Turn-valid boards that cannot occur are those where both players hold a
    /// line, a winner did not make the last move, or a player holds two lines
    /// that no single placement could have completed together.
    pub fn is_reachable(&self) -> bool {
        let (x_count, o_count) = self.piece_counts();
        match (self.lines_form_one_move(Player::X), self.lines_form_one_move(Player::O)) {
            (None, None) => true,
            (Some(true), None) => x_count == o_count + 1,
            (None, Some(true)) => o_count == x_count,
            _ => false,
        }
    }

    /// `None` when `player` holds no line, otherwise whether all held lines
    /// meet in a common cell (so one placement completed them).
    fn lines_form_one_move(&self, player: Player) -> Option<bool> {
        let held: Vec<[usize; 3]> = lines_held_by(self.cells(), player).collect();
        match held.as_slice() {
            [] => None,
            [_] => Some(true),
            [first, rest @ ..] => Some(
                first
                    .iter()
                    .any(|idx| rest.iter().all(|line| line.contains(idx))),
            ),
        }
    }
}

/// Count states reachable from the empty board by depth-first play
pub fn count_reachable_states() -> usize {
    let mut stack = vec![BoardState::new()];
    let mut seen = HashSet::new();

    while let Some(state) = stack.pop() {
        if !seen.insert(state) {
            continue;
        }
        if state.is_terminal() {
            continue;
        }
        for action in state.legal_actions() {
            if let Ok(next) = state.successor(action) {
                stack.push(next);
            }
        }
    }

    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_valid_count() {
        assert_eq!(enumerate_valid_states().count(), TURN_VALID_STATES);
    }

    #[test]
    fn test_enumeration_respects_turn_invariant() {
        for state in enumerate_valid_states() {
            let (x, o) = state.piece_counts();
            assert!(x == o || x == o + 1, "bad counts in {}", state.encode());
        }
    }

    #[test]
    fn test_enumeration_starts_with_empty_board() {
        assert_eq!(enumerate_valid_states().next(), Some(BoardState::new()));
    }

    #[test]
    fn test_reachable_filter_matches_search() {
        let filtered = enumerate_valid_states().filter(|s| s.is_reachable()).count();
        assert_eq!(filtered, REACHABLE_STATES);
        assert_eq!(count_reachable_states(), REACHABLE_STATES);
    }

    #[test]
    fn test_both_players_winning_is_unreachable() {
        let state = BoardState::from_string("XXXOOO...").unwrap();
        assert!(!state.is_reachable());
    }

    #[test]
    fn test_state_space_decision_states() {
        let space = StateSpace::enumerate();
        assert_eq!(space.len(), TURN_VALID_STATES);
        assert!(space.decision_states().all(|s| !s.legal_actions().is_empty()));
    }
}
