//! Observer port - progress reporting for training runs

use crate::{Result, tictactoe::GameOutcome};

/// Hooks for watching a solver or learner run.
///
/// Solvers notify their observers at phase boundaries, after each DP sweep,
/// and after each sampled episode. Observers never influence training.
///
/// Call order per phase:
///
/// 1. `on_training_start(phase, total)` - once per phase (a DP run, or one
///    learner role of a sampling run)
/// 2. `on_sweep_end` or `on_episode_end` - once per unit of work
/// 3. `on_training_end()` - once per phase
///
/// # Examples
///
/// ```no_run
/// use noughts::{ports::TrainingObserver, tictactoe::GameOutcome};
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl TrainingObserver for EpisodeCounter {
///     fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> noughts::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait TrainingObserver: Send {
    /// Called when a phase starts with the number of sweeps or episodes it may run.
    fn on_training_start(&mut self, _phase: &str, _total: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each value-iteration sweep with the largest value change.
    fn on_sweep_end(&mut self, _sweep: usize, _delta: f64) -> Result<()> {
        Ok(())
    }

    /// Called after each sampled episode with its outcome.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when a phase finishes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
