//! Match play between strategies

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Strategy,
    tictactoe::{Game, GameOutcome, Player},
};

/// Play one game from the empty board, `x` moving first.
///
/// A strategy that returns an illegal action aborts the game with the
/// illegal-move error from the game model.
pub fn play_match(x: &mut dyn Strategy, o: &mut dyn Strategy) -> Result<Game> {
    let mut game = Game::new();
    while !game.is_over() {
        let state = game.current_state();
        let choice = match state.to_move() {
            Player::X => x.best_action(&state),
            Player::O => o.best_action(&state),
        };
        let Some(action) = choice else {
            break;
        };
        game.play(action)?;
    }
    Ok(game)
}

/// Tally of a series of games from one side's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl MatchResult {
    pub fn new(games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if games > 0 {
                count as f64 / games as f64
            } else {
                0.0
            }
        };
        Self {
            games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// Play `games` games of `candidate` (as `role`) against `opponent`.
pub fn evaluate(
    candidate: &mut dyn Strategy,
    opponent: &mut dyn Strategy,
    role: Player,
    games: usize,
) -> Result<MatchResult> {
    let (mut wins, mut draws, mut losses) = (0, 0, 0);

    for _ in 0..games {
        let game = match role {
            Player::X => play_match(candidate, opponent)?,
            Player::O => play_match(opponent, candidate)?,
        };
        match game.outcome {
            Some(GameOutcome::Win(winner)) if winner == role => wins += 1,
            Some(GameOutcome::Win(_)) => losses += 1,
            Some(GameOutcome::Draw) | None => draws += 1,
        }
    }

    let result = MatchResult::new(games, wins, draws, losses);
    info!(
        "{} as {role} vs {}: W/D/L {}/{}/{}",
        candidate.name(),
        opponent.name(),
        result.wins,
        result.draws,
        result.losses
    );
    Ok(result)
}
