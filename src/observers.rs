//! Training observers: terminal progress bars and in-memory metrics

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::TrainingObserver,
    tictactoe::{GameOutcome, Player},
};

fn bar_style(template: &str) -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(template)
        .map_err(|e| Error::ProgressBarTemplate {
            message: e.to_string(),
        })?
        .progress_chars("=>-"))
}

/// One progress bar per phase, with a running X/O/draw tally for episodes
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn tally(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, phase: &str, total: usize) -> Result<()> {
        self.x_wins = 0;
        self.o_wins = 0;
        self.draws = 0;

        let pb = ProgressBar::new(total as u64);
        let template =
            format!("{phase} [{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} ({{msg}})");
        pb.set_style(bar_style(&template)?);
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_sweep_end(&mut self, sweep: usize, delta: f64) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(sweep as u64);
            pb.set_message(format!("delta {delta:.3e}"));
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            // redrawing the message every episode dominates short runs
            if episode % 1_000 == 0 {
                pb.set_message(self.tally());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Records sweep deltas and episode outcomes in memory
#[derive(Debug, Default)]
pub struct MetricsObserver {
    phases: Vec<String>,
    deltas: Vec<f64>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every phase started so far
    pub fn phases(&self) -> &[String] {
        &self.phases
    }

    /// Largest value change of each sweep, in order
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.x_wins + self.o_wins + self.draws,
            sweeps: self.deltas.len(),
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
        }
    }
}

/// Totals collected by a [`MetricsObserver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub sweeps: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl TrainingObserver for MetricsObserver {
    fn on_training_start(&mut self, phase: &str, _total: usize) -> Result<()> {
        self.phases.push(phase.to_string());
        Ok(())
    }

    fn on_sweep_end(&mut self, _sweep: usize, delta: f64) -> Result<()> {
        self.deltas.push(delta);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        Ok(())
    }
}
