//! Learner-centred view of a game against a fixed opponent
//!
//! Each step is one learner move followed, unless the game ended, by the
//! opponent's reply. The learner therefore only ever observes its own
//! decision states and terminal states.

use rand::Rng;

use super::OpponentPolicy;
use crate::{
    Error, Result,
    tictactoe::{Action, BoardState, Player, terminal_reward},
};

/// Result of one learner step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Next learner decision state, or the terminal state
    pub next: BoardState,
    /// Terminal reward for the learner; 0 while the game continues
    pub reward: f64,
    pub done: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Environment<'a> {
    learner: Player,
    opponent: &'a OpponentPolicy,
}

impl<'a> Environment<'a> {
    pub fn new(learner: Player, opponent: &'a OpponentPolicy) -> Self {
        Self { learner, opponent }
    }

    /// First learner decision state: the empty board for X, the board after
    /// the opponent's opening move for O.
    pub fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BoardState> {
        let start = BoardState::new();
        match self.learner {
            Player::X => Ok(start),
            Player::O => self.reply(&start, rng),
        }
    }

    /// Play `action` for the learner, then the opponent's reply.
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &BoardState,
        action: Action,
        rng: &mut R,
    ) -> Result<Transition> {
        let after = state.apply(action, self.learner)?;
        let next = if after.is_terminal() {
            after
        } else {
            self.reply(&after, rng)?
        };

        let done = next.is_terminal();
        let reward = if done {
            terminal_reward(&next, self.learner)
        } else {
            0.0
        };
        Ok(Transition { next, reward, done })
    }

    fn reply<R: Rng + ?Sized>(&self, state: &BoardState, rng: &mut R) -> Result<BoardState> {
        let action = self.opponent.choose(state, rng).ok_or(Error::GameOver)?;
        state.apply(action, self.learner.opponent())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tables::Policy;

    fn a(pos: usize) -> Action {
        Action::from_position(pos).unwrap()
    }

    fn corner_opponent() -> OpponentPolicy {
        let mut policy = Policy::new();
        policy.insert(BoardState::new(), a(0));
        policy.insert(BoardState::from_string("....X....").unwrap(), a(0));
        OpponentPolicy::new(policy, "test")
    }

    #[test]
    fn test_reset_lets_opponent_open_for_o() {
        let opponent = corner_opponent();
        let mut rng = StdRng::seed_from_u64(1);

        let as_x = Environment::new(Player::X, &opponent).reset(&mut rng).unwrap();
        assert_eq!(as_x, BoardState::new());

        let as_o = Environment::new(Player::O, &opponent).reset(&mut rng).unwrap();
        assert_eq!(as_o, BoardState::from_string("X........").unwrap());
    }

    #[test]
    fn test_step_includes_reply() {
        let opponent = corner_opponent();
        let env = Environment::new(Player::X, &opponent);
        let mut rng = StdRng::seed_from_u64(1);

        let t = env.step(&BoardState::new(), a(4), &mut rng).unwrap();
        assert_eq!(t.next, BoardState::from_string("O...X....").unwrap());
        assert_eq!(t.reward, 0.0);
        assert!(!t.done);
    }

    #[test]
    fn test_winning_step_ends_episode() {
        let opponent = corner_opponent();
        let env = Environment::new(Player::X, &opponent);
        let mut rng = StdRng::seed_from_u64(1);

        let state = BoardState::from_string("XX.OO....").unwrap();
        let t = env.step(&state, a(2), &mut rng).unwrap();
        assert!(t.done);
        assert_eq!(t.reward, 1.0);

        let err = env.step(&state, a(0), &mut rng).unwrap_err();
        assert!(err.is_illegal_move());
    }

    #[test]
    fn test_opponent_win_is_a_loss() {
        let mut policy = Policy::new();
        let after = BoardState::from_string("XX.OO.X..").unwrap();
        policy.insert(after, a(5));
        let opponent = OpponentPolicy::new(policy, "test");
        let env = Environment::new(Player::X, &opponent);
        let mut rng = StdRng::seed_from_u64(1);

        let state = BoardState::from_string("XX.OO....").unwrap();
        let t = env.step(&state, a(6), &mut rng).unwrap();
        assert!(t.done);
        assert_eq!(t.reward, -1.0);
    }
}
