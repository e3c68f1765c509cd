//! Query command - Ask a saved policy for its move

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::{MsgPackPolicyStore, PolicyAgent},
    ports::{PolicyStore, Strategy},
    tictactoe::{BoardState, GameOutcome},
};

#[derive(Parser, Debug)]
#[command(about = "Print a policy's move for a board")]
pub struct QueryArgs {
    /// Path to the saved policy
    pub policy: PathBuf,

    /// Board as nine cells, row-major (`X`, `O`, `.`); `/` separators allowed
    pub board: String,

    /// Random seed for the fallback move on uncovered boards
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: QueryArgs) -> Result<()> {
    let state = BoardState::from_string(&args.board)
        .with_context(|| format!("parsing board '{}'", args.board))?;

    println!("{state}\n");
    if let Some(outcome) = GameOutcome::of(&state) {
        match outcome {
            GameOutcome::Win(player) => println!("Game over: {player} has won"),
            GameOutcome::Draw => println!("Game over: draw"),
        }
        return Ok(());
    }

    let saved = MsgPackPolicyStore::new()
        .load(&args.policy)
        .with_context(|| format!("loading policy {}", args.policy.display()))?;
    let covered = saved.policy.contains(&state);

    let mut agent = PolicyAgent::new(saved.method.to_string(), saved.policy);
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
    }

    if let Some(action) = agent.best_action(&state) {
        let source = if covered { "policy" } else { "random fallback" };
        println!("{} plays {action} ({source})", state.to_move());
    }
    Ok(())
}
