//! Per-role results of a sampling run

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    persistence::Method,
    tictactoe::{GameOutcome, Player},
};

/// Outcome counts for one learner role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleReport {
    pub role: Player,
    pub episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// ε when the role finished training
    pub final_epsilon: f64,
}

impl RoleReport {
    pub fn new(role: Player) -> Self {
        Self {
            role,
            episodes: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            final_epsilon: 0.0,
        }
    }

    /// Count one finished episode from the learner's side
    pub fn record(&mut self, outcome: GameOutcome) {
        self.episodes += 1;
        match outcome {
            GameOutcome::Win(winner) if winner == self.role => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            count as f64 / self.episodes as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }
}

/// Result of a Monte Carlo or Q-learning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub method: Method,
    pub roles: Vec<RoleReport>,
    /// Number of states the derived policy covers
    pub states_covered: usize,
    pub seed: Option<u64>,
}

impl TrainingReport {
    pub fn total_episodes(&self) -> usize {
        self.roles.iter().map(|r| r.episodes).sum()
    }

    pub fn role(&self, role: Player) -> Option<&RoleReport> {
        self.roles.iter().find(|r| r.role == role)
    }

    /// Save report to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create report {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load report from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}
