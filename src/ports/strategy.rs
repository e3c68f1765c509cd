//! Strategy port - the query interface a player or UI drives

use crate::tictactoe::{Action, BoardState};

/// Something that picks moves.
///
/// This is the only contract between the trained policies and whatever
/// presents the game: the caller checks [`BoardState::is_terminal`], asks for
/// an action, and plays it.
///
/// # Examples
///
/// ```
/// use noughts::{
///     ports::Strategy,
///     tictactoe::{Action, BoardState},
/// };
///
/// struct FirstEmpty;
///
/// impl Strategy for FirstEmpty {
///     fn best_action(&mut self, state: &BoardState) -> Option<Action> {
///         state.legal_actions().first().copied()
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
///
/// let mut strategy = FirstEmpty;
/// assert_eq!(
///     strategy.best_action(&BoardState::new()),
///     Some(Action::new(0, 0).unwrap())
/// );
/// ```
pub trait Strategy {
    /// Choose an action for the player to move.
    ///
    /// Never fails: returns `None` when the board has no legal action, and
    /// otherwise always a legal action.
    fn best_action(&mut self, state: &BoardState) -> Option<Action>;

    /// Name used in reports and logs
    fn name(&self) -> &str;
}
