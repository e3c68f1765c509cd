//! Solve command - Exact dynamic programming policies

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    adapters::MsgPackPolicyStore,
    cli::{
        DEFAULT_DP_POLICY,
        config::load_or_default,
        output::{print_kv, print_saved_policy, print_section},
    },
    observers::ProgressObserver,
    persistence::Method,
    ports::PolicyStore,
    tictactoe::RewardShaping,
    value_iteration::{PolicyIterationSolver, ValueIterationConfig, ValueIterationSolver},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DpMethod {
    ValueIteration,
    PolicyIteration,
}

#[derive(Parser, Debug)]
#[command(about = "Compute an exact policy by dynamic programming")]
pub struct SolveArgs {
    /// Solver to run
    #[arg(value_enum, default_value = "value-iteration")]
    pub method: DpMethod,

    /// JSON file with a full solver configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Discount factor
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Convergence threshold
    #[arg(long)]
    pub theta: Option<f64>,

    /// Sweep (or improvement round) cap
    #[arg(long)]
    pub max_sweeps: Option<usize>,

    /// Reward open two-in-a-rows with this bonus
    #[arg(long)]
    pub threat_bonus: Option<f64>,

    /// Where to save the policy
    #[arg(long, short = 'O', default_value = DEFAULT_DP_POLICY)]
    pub output: PathBuf,

    /// Recompute even if a policy already exists at the output path
    #[arg(long)]
    pub retrain: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

impl SolveArgs {
    fn config(&self) -> Result<ValueIterationConfig> {
        let mut config: ValueIterationConfig = load_or_default(self.config.as_deref())?;
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }
        if let Some(theta) = self.theta {
            config = config.with_theta(theta);
        }
        if let Some(max_sweeps) = self.max_sweeps {
            config = config.with_max_sweeps(max_sweeps);
        }
        if let Some(bonus) = self.threat_bonus {
            config = config.with_shaping(RewardShaping::ThreatBonus { bonus });
        }
        Ok(config)
    }
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let store = MsgPackPolicyStore::new();

    if store.exists(&args.output) && !args.retrain {
        let saved = store
            .load(&args.output)
            .with_context(|| format!("loading existing policy {}", args.output.display()))?;
        print_section("Existing Policy (use --retrain to recompute)");
        print_kv("Path", &args.output.display().to_string());
        print_saved_policy(&saved);
        return Ok(());
    }

    let config = args.config()?;
    print_section("Dynamic Programming");
    print_kv("Method", &format!("{:?}", args.method));
    print_kv("Gamma", &config.gamma.to_string());
    print_kv("Theta", &format!("{:e}", config.theta));
    print_kv("Max sweeps", &config.max_sweeps.to_string());
    print_kv("Shaping", &format!("{:?}", config.shaping));

    let (solution, method) = match args.method {
        DpMethod::ValueIteration => {
            let mut solver = ValueIterationSolver::new(config)?;
            if !args.quiet {
                solver = solver.with_observer(Box::new(ProgressObserver::new()));
            }
            (solver.solve()?, Method::ValueIteration)
        }
        DpMethod::PolicyIteration => {
            let mut solver = PolicyIterationSolver::new(config)?;
            if !args.quiet {
                solver = solver.with_observer(Box::new(ProgressObserver::new()));
            }
            (solver.solve()?, Method::PolicyIteration)
        }
    };

    if !solution.converged {
        println!(
            "\nWarning: stopped at the cap with delta {:e}; the policy may be suboptimal",
            solution.final_delta
        );
    }

    let saved = solution.into_saved(method);
    store
        .save(&saved, &args.output)
        .with_context(|| format!("saving policy to {}", args.output.display()))?;

    print_section("Result");
    print_saved_policy(&saved);
    println!("\n✓ Policy saved to: {}", args.output.display());
    Ok(())
}
