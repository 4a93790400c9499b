//! Engine-vs-itself games with an optional seeded random opening.
//!
//! A game runs until checkmate, stalemate, threefold repetition,
//! insufficient material or the ply limit, and is returned as a
//! [`GameRecord`] that renders to PGN-style text.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::engines::chess_engine::ChessEngine;
use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub max_plies: u16,
    /// Uniformly random legal moves played before the engine takes over.
    pub opening_plies: u8,
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_plies: 0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    LightWinsCheckmate,
    DarkWinsCheckmate,
    DrawStalemate,
    DrawRepetition,
    DrawInsufficientMaterial,
    DrawMaxPlies,
}

impl GameOutcome {
    pub const fn result_tag(self) -> &'static str {
        match self {
            GameOutcome::LightWinsCheckmate => "1-0",
            GameOutcome::DarkWinsCheckmate => "0-1",
            _ => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub initial_state: GameState,
    /// Random opening plies, also included at the front of `moves`.
    pub opening_len: usize,
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
    pub final_state: GameState,
}

impl GameRecord {
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Event".to_owned(), "Birch Chess self-play".to_owned());
        headers.insert("Date".to_owned(), self.date.format("%Y.%m.%d").to_string());
        headers.insert("White".to_owned(), "Birch Chess".to_owned());
        headers.insert("Black".to_owned(), "Birch Chess".to_owned());
        headers.insert("Result".to_owned(), self.outcome.result_tag().to_owned());
        headers.insert("Termination".to_owned(), format!("{:?}", self.outcome));
        headers.insert("FEN".to_owned(), self.initial_state.get_fen());
        headers
    }

    /// Header block followed by numbered long-algebraic movetext.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.headers() {
            out.push_str(&format!("[{key} \"{value}\"]\n"));
        }
        out.push('\n');

        let mut parts = Vec::with_capacity(self.moves.len() + 1);
        let mut number = self.initial_state.fullmove_number;
        let mut side = self.initial_state.side_to_move;
        for (ply, mv) in self.moves.iter().enumerate() {
            match side {
                Color::Light => parts.push(format!("{number}. {mv}")),
                Color::Dark if ply == 0 => parts.push(format!("{number}... {mv}")),
                Color::Dark => parts.push(mv.to_string()),
            }
            if side == Color::Dark {
                number += 1;
            }
            side = side.opposite();
        }
        parts.push(self.outcome.result_tag().to_owned());
        out.push_str(&parts.join(" "));
        out.push('\n');
        out
    }
}

/// Game-ending state of the current position, if any.
pub fn adjudicate(state: &mut GameState) -> Option<GameOutcome> {
    if state.is_checkmate() {
        return Some(match state.side_to_move {
            Color::Light => GameOutcome::DarkWinsCheckmate,
            Color::Dark => GameOutcome::LightWinsCheckmate,
        });
    }
    if state.is_stalemate() {
        return Some(GameOutcome::DrawStalemate);
    }
    if state.is_threefold_repetition() {
        return Some(GameOutcome::DrawRepetition);
    }
    if state.has_insufficient_material() {
        return Some(GameOutcome::DrawInsufficientMaterial);
    }
    None
}

/// Plays `engine` against itself from `start`.
pub fn play_self_game(
    engine: &mut ChessEngine,
    start: GameState,
    config: SelfPlayConfig,
) -> GameRecord {
    let initial_state = start.clone();
    let mut state = start;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut moves = apply_seeded_random_opening(&mut state, &mut rng, config.opening_plies);
    let opening_len = moves.len();
    debug!(opening = opening_len, seed = config.seed, "random opening applied");

    let mut outcome = None;
    while moves.len() < usize::from(config.max_plies) {
        outcome = adjudicate(&mut state);
        if outcome.is_some() {
            break;
        }
        let Some(mv) = engine.play_best_move(&mut state) else {
            warn!(fen = %state.get_fen(), "engine produced no playable move");
            break;
        };
        moves.push(mv);
    }
    let outcome = outcome
        .or_else(|| adjudicate(&mut state))
        .unwrap_or(GameOutcome::DrawMaxPlies);

    info!(plies = moves.len(), ?outcome, "self-play game finished");
    GameRecord {
        date: Local::now().date_naive(),
        initial_state,
        opening_len,
        moves,
        outcome,
        final_state: state,
    }
}

/// Plays up to `plies` uniformly random legal moves, stopping early if the
/// game ends.
fn apply_seeded_random_opening(state: &mut GameState, rng: &mut StdRng, plies: u8) -> Vec<Move> {
    let mut played = Vec::with_capacity(usize::from(plies));
    for _ in 0..plies {
        let legal = state.legal_moves();
        if legal.is_empty() {
            break;
        }
        let idx = rng.random_range(0..legal.len());
        let Some(mv) = legal.get(idx) else {
            break;
        };
        if !state.make_move(mv) {
            break;
        }
        played.push(mv);
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::alpha_beta::SearchConfig;

    fn shallow_engine() -> ChessEngine {
        ChessEngine::with_config(SearchConfig {
            max_depth: 1,
            node_budget: None,
        })
    }

    #[test]
    fn mate_in_one_ends_with_light_win() {
        let mut engine = ChessEngine::with_config(SearchConfig {
            max_depth: 2,
            node_budget: None,
        });
        let start =
            GameState::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        let record = play_self_game(&mut engine, start, SelfPlayConfig::default());
        assert_eq!(record.outcome, GameOutcome::LightWinsCheckmate);
        assert_eq!(record.moves, vec![Move::normal(3, 59)]);
        assert!(record.to_text().ends_with("1. d1d8 1-0\n"));
    }

    #[test]
    fn bare_kings_end_immediately() {
        let start = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let record = play_self_game(&mut shallow_engine(), start, SelfPlayConfig::default());
        assert_eq!(record.outcome, GameOutcome::DrawInsufficientMaterial);
        assert!(record.moves.is_empty());
    }

    #[test]
    fn ply_limit_counts_opening_moves() {
        let config = SelfPlayConfig {
            max_plies: 6,
            opening_plies: 2,
            seed: 7,
        };
        let record = play_self_game(&mut shallow_engine(), GameState::new_game(), config);
        assert_eq!(record.outcome, GameOutcome::DrawMaxPlies);
        assert_eq!(record.opening_len, 2);
        assert_eq!(record.moves.len(), 6);
        assert_eq!(record.final_state.history_len(), 6);
    }

    #[test]
    fn seeded_openings_are_reproducible() {
        let mut a = GameState::new_game();
        let mut b = GameState::new_game();
        let first = apply_seeded_random_opening(&mut a, &mut StdRng::seed_from_u64(42), 6);
        let second = apply_seeded_random_opening(&mut b, &mut StdRng::seed_from_u64(42), 6);
        assert_eq!(first, second);
        assert_eq!(a, b);
    }

    #[test]
    fn record_text_carries_headers() {
        let start = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 9").expect("FEN should parse");
        let record = GameRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            initial_state: start.clone(),
            opening_len: 0,
            moves: vec![Move::normal(60, 59), Move::normal(4, 3)],
            outcome: GameOutcome::DrawMaxPlies,
            final_state: start,
        };
        let text = record.to_text();
        assert!(text.contains("[Date \"2024.03.01\"]"));
        assert!(text.contains("[Result \"1/2-1/2\"]"));
        assert!(text.ends_with("9... e8d8 10. e1d1 1/2-1/2\n"));
    }
}
