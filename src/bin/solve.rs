//! One-shot Solve Binary
//!
//! Reads a snapshot as JSON from a file or stdin, solves it, and prints
//! the strategy advice.

use clap::Parser;
use robosolver::cfr::Budget;
use robosolver::dto::AnalysisResponse;
use robosolver::dto::GameRequest;
use robosolver::dto::StrategyResponse;
use robosolver::gameplay::Game;
use robosolver::solver::Config;
use robosolver::*;
use std::io::Read;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Solve one snapshot and print the advice", long_about = None)]
struct Args {
    /// JSON snapshot; stdin when omitted
    path: Option<std::path::PathBuf>,
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    iterations: usize,
    #[arg(long, default_value_t = MAX_WALLCLOCK_MS)]
    millis: u64,
    #[arg(long, default_value_t = HORIZON)]
    horizon: usize,
    #[arg(long, default_value_t = WORLD_COUNT)]
    worlds: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// print the full analysis instead of the strategy
    #[arg(long)]
    analysis: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let json = match args.path {
        Some(ref path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let request = serde_json::from_str::<GameRequest>(&json)?;
    let game = Game::try_from(&request)?;
    let config = Config {
        horizon: args.horizon,
        worlds: args.worlds,
        seed: args.seed,
        ..Config::default()
    };
    let budget = Budget::new(args.iterations, Duration::from_millis(args.millis));
    eprintln!("{}", game);
    eprintln!("{} {}", budget, config);
    let result = solver::solve(&game, &budget, &config)?;
    let output = match args.analysis {
        true => serde_json::to_string_pretty(&AnalysisResponse::from((&game, &result)))?,
        false => serde_json::to_string_pretty(&StrategyResponse::from((&game, &result)))?,
    };
    println!("{}", output);
    Ok(())
}
