//! Train command - Sampling learners against a fixed opponent

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    adapters::MsgPackPolicyStore,
    cli::{
        DEFAULT_DP_POLICY,
        config::load_or_default,
        output::{print_kv, print_saved_policy, print_section, print_training_report},
    },
    exploration::ExplorationConfig,
    monte_carlo::{MonteCarloConfig, MonteCarloController},
    observers::ProgressObserver,
    ports::PolicyStore,
    q_learning::{TemporalDifferenceConfig, TemporalDifferenceLearner},
    training::{LearnedPolicy, OpponentPolicy},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LearnerType {
    /// Off-policy Monte Carlo control
    MonteCarlo,
    /// Q-learning
    QLearning,
}

impl LearnerType {
    fn default_output(self) -> PathBuf {
        match self {
            LearnerType::MonteCarlo => PathBuf::from("policies/monte_carlo.msgpack"),
            LearnerType::QLearning => PathBuf::from("policies/q_learning.msgpack"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a learner against a fixed opponent policy")]
pub struct TrainArgs {
    /// Type of learner to train
    #[arg(value_enum)]
    pub learner: LearnerType,

    /// Saved opponent policy to train against
    #[arg(long, short = 'o', default_value = DEFAULT_DP_POLICY)]
    pub opponent: PathBuf,

    /// JSON file with a full learner configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'g')]
    pub episodes: Option<usize>,

    /// Share of episodes played as X
    #[arg(long)]
    pub x_share: Option<f64>,

    /// Discount factor
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Learning rate (Q-learning only)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Starting exploration rate
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Per-episode exploration decay
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Exploration floor
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained policy
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Write the training report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Train even if a policy already exists at the output path
    #[arg(long)]
    pub retrain: bool,

    /// Hide progress bars
    #[arg(long)]
    pub quiet: bool,
}

impl TrainArgs {
    fn exploration(&self, base: ExplorationConfig) -> ExplorationConfig {
        ExplorationConfig::new(
            self.epsilon.unwrap_or(base.epsilon),
            self.epsilon_decay.unwrap_or(base.epsilon_decay),
            self.min_epsilon.unwrap_or(base.min_epsilon),
        )
    }

    fn monte_carlo_config(&self) -> Result<MonteCarloConfig> {
        let mut config: MonteCarloConfig = load_or_default(self.config.as_deref())?;
        if let Some(episodes) = self.episodes {
            config = config.with_episodes(episodes);
        }
        if let Some(x_share) = self.x_share {
            config = config.with_x_share(x_share);
        }
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config.with_exploration(self.exploration(config.exploration)))
    }

    fn temporal_difference_config(&self) -> Result<TemporalDifferenceConfig> {
        let mut config: TemporalDifferenceConfig = load_or_default(self.config.as_deref())?;
        if let Some(episodes) = self.episodes {
            config = config.with_episodes(episodes);
        }
        if let Some(x_share) = self.x_share {
            config = config.with_x_share(x_share);
        }
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config.with_exploration(self.exploration(config.exploration)))
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let store = MsgPackPolicyStore::new();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.learner.default_output());

    if store.exists(&output) && !args.retrain {
        let saved = store
            .load(&output)
            .with_context(|| format!("loading existing policy {}", output.display()))?;
        print_section("Existing Policy (use --retrain to train again)");
        print_kv("Path", &output.display().to_string());
        print_saved_policy(&saved);
        return Ok(());
    }

    // fails before any training when the opponent file is absent
    let opponent = OpponentPolicy::load(&store, &args.opponent)
        .with_context(|| format!("loading opponent policy {}", args.opponent.display()))?;

    let learned = run_learner(&args, opponent)?;

    print_section("Training Results");
    print_training_report(&learned.report);

    if let Some(report_path) = &args.report {
        learned
            .report
            .save(report_path)
            .with_context(|| format!("writing report {}", report_path.display()))?;
        println!("\n✓ Report written to: {}", report_path.display());
    }

    save_learned(&store, learned, &args.opponent, &output)?;
    println!("\n✓ Policy saved to: {}", output.display());
    Ok(())
}

fn run_learner(args: &TrainArgs, opponent: OpponentPolicy) -> Result<LearnedPolicy> {
    print_section("Training");
    print_kv("Learner", &format!("{:?}", args.learner));
    print_kv("Opponent", opponent.source());

    let learned = match args.learner {
        LearnerType::MonteCarlo => {
            let config = args.monte_carlo_config()?;
            print_kv("Episodes", &config.episodes.to_string());
            let mut controller = MonteCarloController::new(config, opponent)?;
            if !args.quiet {
                controller = controller.with_observer(Box::new(ProgressObserver::new()));
            }
            controller.train()?
        }
        LearnerType::QLearning => {
            let config = args.temporal_difference_config()?;
            print_kv("Episodes", &config.episodes.to_string());
            let mut learner = TemporalDifferenceLearner::new(config, opponent)?;
            if !args.quiet {
                learner = learner.with_observer(Box::new(ProgressObserver::new()));
            }
            learner.train()?
        }
    };
    Ok(learned)
}

fn save_learned(
    store: &MsgPackPolicyStore,
    learned: LearnedPolicy,
    opponent: &Path,
    output: &Path,
) -> Result<()> {
    let saved = learned.into_saved(Some(opponent.display().to_string()));
    store
        .save(&saved, output)
        .with_context(|| format!("saving policy to {}", output.display()))?;
    Ok(())
}
