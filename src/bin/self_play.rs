//! Bot-vs-bot game runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --light minimax --dark random --depth 2`

use std::error::Error;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use slate_chess::engines::engine_minimax::MinimaxEngine;
use slate_chess::engines::engine_random::RandomEngine;
use slate_chess::engines::engine_trait::{Engine, GoParams};
use slate_chess::game_state::chess_rules::DEFAULT_SEARCH_DEPTH;
use slate_chess::game_state::chess_types::Side;
use slate_chess::search::minimax::SearchConfig;
use slate_chess::session::{GameSession, SessionConfig};
use slate_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Minimax,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play the Slate engines against each other", version)]
struct CmdArgs {
    #[arg(long, value_enum, default_value = "minimax")]
    light: EngineArg,

    #[arg(long, value_enum, default_value = "random")]
    dark: EngineArg,

    /// Search depth for minimax players
    #[arg(long, env = "SLATE_DEPTH", default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Stop after this many plies even without a result
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    /// Seed for random players
    #[arg(long, default_value_t = 1234)]
    seed: u64,
}

fn build(kind: EngineArg, depth: u8, seed: u64) -> Box<dyn Engine> {
    match kind {
        EngineArg::Minimax => Box::new(MinimaxEngine::new(SearchConfig { depth })),
        EngineArg::Random => Box::new(RandomEngine::with_seed(seed)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CmdArgs::parse();
    let mut players = [
        build(args.light, args.depth, args.seed),
        build(args.dark, args.depth, args.seed.wrapping_add(1)),
    ];

    // Both sides are driven from here, so the session itself runs in
    // two-player mode and every move still goes through its pipeline.
    let mut session = GameSession::new(SessionConfig::default());
    let started = Instant::now();

    for ply in 0..args.max_plies {
        let side = session.board().active_side;
        let engine = &mut players[side.index()];
        let output = engine.choose_move(session.board(), &GoParams::default())?;
        let Some(mv) = output.best_move else {
            info!(ply, %side, "no move available");
            break;
        };

        let record = session.apply_bot_move(mv)?;
        let outcome = session.end_turn()?;
        info!(ply, player = engine.name(), san = %record.san, ?outcome, "ply played");

        if session.is_over() {
            break;
        }
    }

    println!("{}", render_game_state(session.board()));
    println!("{}", session.board().move_history.join(" "));
    match session.outcome() {
        Some(outcome) if outcome.is_game_over() => println!("result: {outcome:?}"),
        _ => println!(
            "result: unfinished after {} plies",
            session.board().move_history.len()
        ),
    }
    println!(
        "{} vs {} in {:.2?}",
        players[Side::Light.index()].name(),
        players[Side::Dark.index()].name(),
        started.elapsed()
    );
    Ok(())
}
