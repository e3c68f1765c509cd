//! noughts CLI - Solve, train, evaluate and query tic-tac-toe policies
//!
//! This CLI provides a unified interface for:
//! - Computing exact policies by value or policy iteration
//! - Training Monte Carlo and Q-learning policies against a saved opponent
//! - Evaluating saved policies against each other or a random player
//! - Querying a saved policy for its move on a given board

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Policy learning toolkit for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an exact policy (value or policy iteration)
    Solve(noughts::cli::commands::solve::SolveArgs),

    /// Train a Monte Carlo or Q-learning policy
    Train(Box<noughts::cli::commands::train::TrainArgs>),

    /// Evaluate a saved policy against an opponent
    Evaluate(noughts::cli::commands::evaluate::EvaluateArgs),

    /// Print a saved policy's move for a board
    Query(noughts::cli::commands::query::QueryArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => noughts::cli::commands::solve::execute(args),
        Commands::Train(args) => noughts::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => noughts::cli::commands::evaluate::execute(args),
        Commands::Query(args) => noughts::cli::commands::query::execute(args),
    }
}
