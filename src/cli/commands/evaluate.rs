//! Evaluate command - Play a saved policy against an opponent

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::parse_player_token;
use crate::{
    adapters::{MsgPackPolicyStore, PolicyAgent, RandomAgent},
    arena::{MatchResult, evaluate},
    cli::output::{print_kv, print_match_result, print_section},
    ports::{PolicyStore, Strategy},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a saved policy")]
pub struct EvaluateArgs {
    /// Path to the saved policy
    pub policy: PathBuf,

    /// Opponent: `random` or the path of another saved policy
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Number of games per side
    #[arg(long, short = 'g', default_value_t = 1_000)]
    pub games: usize,

    /// Which token the evaluated policy controls (`x` or `o`); both when omitted
    #[arg(long)]
    pub role: Option<String>,

    /// Random seed for the fallback moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationExport {
    policy: String,
    opponent: String,
    seed: Option<u64>,
    results: Vec<(Player, MatchResult)>,
}

fn with_seed(agent: PolicyAgent, seed: Option<u64>) -> PolicyAgent {
    match seed {
        Some(seed) => agent.with_seed(seed),
        None => agent,
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let store = MsgPackPolicyStore::new();
    let saved = store
        .load(&args.policy)
        .with_context(|| format!("loading policy {}", args.policy.display()))?;

    let roles = match &args.role {
        Some(value) => vec![parse_player_token(value, "--role")?],
        None => vec![Player::X, Player::O],
    };

    let mut candidate = with_seed(
        PolicyAgent::new(saved.method.to_string(), saved.policy),
        args.seed,
    );
    let opponent_seed = args.seed.map(|s| s.wrapping_add(1));
    let mut opponent: Box<dyn Strategy> = if args.opponent.eq_ignore_ascii_case("random") {
        Box::new(RandomAgent::new(opponent_seed))
    } else {
        let path = PathBuf::from(&args.opponent);
        let other = store
            .load(&path)
            .with_context(|| format!("loading opponent policy {}", path.display()))?;
        Box::new(with_seed(PolicyAgent::new(args.opponent.clone(), other.policy), opponent_seed))
    };

    print_section("Evaluation");
    print_kv("Policy", &args.policy.display().to_string());
    print_kv("Opponent", opponent.name());
    print_kv("Games per side", &args.games.to_string());

    let mut results = Vec::with_capacity(roles.len());
    for role in roles {
        let result = evaluate(&mut candidate, opponent.as_mut(), role, args.games)?;
        print_match_result(&format!("As {role}"), &result);
        results.push((role, result));
    }

    if let Some(path) = &args.export {
        let export = EvaluationExport {
            policy: args.policy.display().to_string(),
            opponent: args.opponent.clone(),
            seed: args.seed,
            results,
        };
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}
