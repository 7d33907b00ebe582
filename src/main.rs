use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use tiles_2048::config::RunConfig;
use tiles_2048::game::{Game, GameSummary};
use tiles_2048::policy::PolicyKind;

#[derive(Parser, Debug)]
#[command(
    name = "autoplay",
    version,
    about = "Play one headless 2048 game with a simple policy"
)]
struct Args {
    /// TOML file with seed / policy / max_moves
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
    /// RNG seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,
    /// Move-choosing policy
    #[arg(short = 'p', long = "policy", value_enum)]
    policy: Option<PolicyKind>,
    /// Stop after this many moves
    #[arg(long = "max-moves", value_name = "N")]
    max_moves: Option<u32>,
    /// Only print the final summary
    #[arg(short = 'q', long)]
    quiet: bool,
    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    seed: u64,
    policy: PolicyKind,
    #[serde(flatten)]
    summary: GameSummary,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let file_cfg = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    let cfg = file_cfg.merge_cli(args.seed, args.policy, args.max_moves);
    let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {seed}, policy {:?}, max moves {:?}", cfg.policy, cfg.max_moves);

    let mut game = Game::new(StdRng::seed_from_u64(seed));
    let mut policy = cfg.policy.build(StdRng::seed_from_u64(seed.wrapping_add(1)));
    if !args.quiet {
        println!("{}", game.grid());
    }

    while !game.is_over() {
        if cfg.max_moves.is_some_and(|cap| game.moves() >= cap) {
            info!("move cap of {} reached", game.moves());
            break;
        }
        let Some(direction) = policy.next_move(&game.grid()) else {
            break;
        };
        game.step(direction);
        if !args.quiet {
            println!("{direction} | score {}\n{}", game.score(), game.grid());
        }
    }

    let summary = game.summary();
    if args.json {
        let report = Report { seed, policy: cfg.policy, summary };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "Moves made: {}, Score: {}, Highest tile: {}, Status: {:?}",
            summary.moves, summary.score, summary.highest_tile, summary.status
        );
    }
    Ok(())
}
