//! Command-line driver.
//!
//! ```text
//! birch_chess search   [--fen FEN] [--moves MOVES] [--depth N]
//! birch_chess perft    [--fen FEN] [--moves MOVES] [--depth N]
//! birch_chess selfplay [--fen FEN] [--moves MOVES] [--depth N] [--plies N] [--seed N] [--opening N]
//! ```
//!
//! `--moves` takes a quoted, space-separated list of long algebraic moves
//! played from the starting position (or `--fen`) before the command runs.
//!
//! `BIRCH_DEPTH` overrides the default search depth; `RUST_LOG` controls
//! log output (default `info`).

use std::time::Instant;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use birch_chess::engines::chess_engine::ChessEngine;
use birch_chess::game_state::game_state::GameState;
use birch_chess::move_generation::perft::{perft, perft_divide};
use birch_chess::search::alpha_beta::SearchConfig;
use birch_chess::utils::long_algebraic::replay_moves;
use birch_chess::utils::render_game_state::render_game_state;
use birch_chess::utils::self_play::{play_self_game, SelfPlayConfig};

const DEFAULT_DEPTH: u8 = 4;
const DEFAULT_PERFT_DEPTH: u8 = 4;
const DEFAULT_OPENING_PLIES: u8 = 4;
const DEFAULT_MAX_PLIES: u16 = 200;

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: birch_chess <search|perft|selfplay> [--fen FEN] [--moves MOVES] [--depth N] [--plies N] [--seed N] [--opening N]")]
    Usage,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("flag `{0}` needs a value")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{flag}`")]
    BadValue { flag: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Search,
    Perft,
    SelfPlay,
}

#[derive(Debug, Clone)]
struct CliOptions {
    command: Command,
    fen: Option<String>,
    moves: Option<String>,
    depth: Option<u8>,
    plies: u16,
    seed: u64,
    opening: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = parse_args(std::env::args().skip(1))?;
    let mut start = match &options.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new_game(),
    };
    if let Some(moves) = &options.moves {
        replay_moves(&mut start, moves)?;
    }

    match options.command {
        Command::Search => run_search(start, options.depth.unwrap_or_else(default_depth)),
        Command::Perft => run_perft(start, options.depth.unwrap_or(DEFAULT_PERFT_DEPTH)),
        Command::SelfPlay => run_self_play(start, &options),
    }
    Ok(())
}

/// `BIRCH_DEPTH` when set to a valid depth, otherwise [`DEFAULT_DEPTH`].
fn default_depth() -> u8 {
    std::env::var("BIRCH_DEPTH")
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_DEPTH)
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliOptions, CliError> {
    let command = match args.next().as_deref() {
        Some("search") => Command::Search,
        Some("perft") => Command::Perft,
        Some("selfplay") => Command::SelfPlay,
        Some(other) => return Err(CliError::UnknownCommand(other.to_owned())),
        None => return Err(CliError::Usage),
    };

    let mut options = CliOptions {
        command,
        fen: None,
        moves: None,
        depth: None,
        plies: DEFAULT_MAX_PLIES,
        seed: 0,
        opening: DEFAULT_OPENING_PLIES,
    };

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| CliError::MissingValue(flag.clone()))?;
        match flag.as_str() {
            "--fen" => options.fen = Some(value),
            "--moves" => options.moves = Some(value),
            "--depth" => options.depth = Some(parse_value(&flag, &value)?),
            "--plies" => options.plies = parse_value(&flag, &value)?,
            "--seed" => options.seed = parse_value(&flag, &value)?,
            "--opening" => options.opening = parse_value(&flag, &value)?,
            _ => return Err(CliError::UnknownFlag(flag)),
        }
    }

    Ok(options)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::BadValue {
        flag: flag.to_owned(),
        value: value.to_owned(),
    })
}

fn engine_for_depth(depth: u8) -> ChessEngine {
    ChessEngine::with_config(SearchConfig {
        max_depth: depth,
        ..SearchConfig::default()
    })
}

fn run_search(mut game: GameState, depth: u8) {
    println!("{}", render_game_state(&game));
    let started = Instant::now();
    let result = engine_for_depth(depth).search(&mut game);
    let elapsed = started.elapsed();

    match result.best_move {
        Some(mv) => println!("bestmove {mv} score {} nodes {}", result.score, result.nodes),
        None => println!("bestmove (none) score {}", result.score),
    }
    info!(depth, ms = elapsed.as_millis() as u64, "search done");
}

fn run_perft(mut game: GameState, depth: u8) {
    let started = Instant::now();
    for (mv, nodes) in perft_divide(&mut game, depth) {
        println!("{mv}: {nodes}");
    }
    let counts = perft(&mut game, depth);
    let elapsed = started.elapsed();

    println!();
    println!("depth {depth}");
    println!("nodes {}", counts.nodes);
    println!("captures {}", counts.captures);
    println!("en_passant {}", counts.en_passant);
    println!("castles {}", counts.castles);
    println!("promotions {}", counts.promotions);
    println!("checks {}", counts.checks);
    println!("checkmates {}", counts.checkmates);
    info!(depth, ms = elapsed.as_millis() as u64, "perft done");
}

fn run_self_play(start: GameState, options: &CliOptions) {
    let mut engine = engine_for_depth(options.depth.unwrap_or_else(default_depth));
    let config = SelfPlayConfig {
        max_plies: options.plies,
        opening_plies: options.opening,
        seed: options.seed,
    };
    let record = play_self_game(&mut engine, start, config);
    print!("{}", record.to_text());
    println!();
    println!("{}", render_game_state(&record.final_state));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> impl Iterator<Item = String> + '_ {
        line.split_whitespace().map(str::to_owned)
    }

    #[test]
    fn parses_command_and_flags() {
        let options = parse_args(args("selfplay --depth 2 --plies 30 --seed 9")).expect("valid args");
        assert_eq!(options.command, Command::SelfPlay);
        assert_eq!(options.depth, Some(2));
        assert_eq!(options.plies, 30);
        assert_eq!(options.seed, 9);
        assert_eq!(options.opening, DEFAULT_OPENING_PLIES);
    }

    #[test]
    fn moves_flag_takes_one_quoted_value() {
        let argv = ["search", "--moves", "e2e4 e7e5", "--depth", "1"].map(str::to_owned);
        let options = parse_args(argv.into_iter()).expect("valid args");
        assert_eq!(options.moves.as_deref(), Some("e2e4 e7e5"));
        assert_eq!(options.depth, Some(1));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_args(args("")), Err(CliError::Usage)));
        assert!(matches!(parse_args(args("play")), Err(CliError::UnknownCommand(_))));
        assert!(matches!(parse_args(args("search --depth")), Err(CliError::MissingValue(_))));
        assert!(matches!(parse_args(args("search --depth x")), Err(CliError::BadValue { .. })));
        assert!(matches!(parse_args(args("perft --speed 3")), Err(CliError::UnknownFlag(_))));
    }
}
