//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Light maximizes and dark minimizes; all scores here are from light's
//! perspective. The position is made and unmade in place, and a line-local
//! [`RepetitionTable`] scores any position reached twice within the current
//! search as a draw without touching the game's own repetition history.

use tracing::{debug, trace, warn};

use crate::game_state::repetition::{RepetitionTable, RepetitionTracker};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::search::board_scoring::{CombinedScorer, MATE_VALUE, STALEMATE_VALUE};
use crate::search::move_ordering::order_moves;

/// Bound above every reachable score, mates included.
pub const SCORE_INFINITY: i32 = MATE_VALUE + 1;

/// Occurrences of a position within one search line that score as a draw.
const LINE_REPETITION_DRAW_COUNT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Stop starting new root moves once this many nodes have been visited.
    /// At least one root move is always searched.
    pub node_budget: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            node_budget: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Light-minus-dark score of the chosen line.
    pub score: i32,
    pub nodes: u64,
}

pub struct AlphaBetaSearch<'a> {
    scorer: &'a CombinedScorer,
    config: SearchConfig,
    nodes: u64,
    line: RepetitionTable,
}

impl<'a> AlphaBetaSearch<'a> {
    pub fn new(scorer: &'a CombinedScorer, config: SearchConfig) -> Self {
        Self {
            scorer,
            config,
            nodes: 0,
            line: RepetitionTable::with_capacity(64),
        }
    }

    /// Searches every root move to `config.max_depth` plies and restores
    /// `game_state` before returning. A depth of zero still plays out one ply
    /// so a move can be chosen.
    pub fn run(&mut self, game_state: &mut GameState) -> SearchResult {
        self.nodes = 0;
        self.line.clear();
        self.line.record(game_state.zobrist_key);

        let mut moves = game_state.legal_moves();
        if moves.is_empty() {
            debug!(fen = %game_state.get_fen(), "no legal moves at root");
            return SearchResult::default();
        }
        order_moves(game_state, moves.as_mut_slice());

        let maximizing = game_state.side_to_move == Color::Light;
        let child_depth = i32::from(self.config.max_depth) - 1;
        let mut alpha = -SCORE_INFINITY;
        let mut beta = SCORE_INFINITY;
        let mut best_move = None;
        let mut best_score = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for &mv in moves.iter() {
            if let Some(budget) = self.config.node_budget {
                if best_move.is_some() && self.nodes >= budget {
                    debug!(nodes = self.nodes, budget, "node budget reached at root");
                    break;
                }
            }

            if !game_state.make_search_move(mv, &mut self.line) {
                warn!(%mv, fen = %game_state.get_fen(), "root move rejected by make");
                continue;
            }
            let score = self.minimax(game_state, child_depth, 1, alpha, beta);
            game_state.undo_search_move(&mut self.line);

            debug!(%mv, score, "root move scored");

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }
        }

        let result = SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            nodes: self.nodes,
        };
        debug!(
            best = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            depth = self.config.max_depth,
            "search finished"
        );
        result
    }

    fn minimax(
        &mut self,
        game_state: &mut GameState,
        depth: i32,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if self.line.count(game_state.zobrist_key) >= LINE_REPETITION_DRAW_COUNT {
            trace!(ply, "repetition within search line");
            return STALEMATE_VALUE;
        }

        let side = game_state.side_to_move;
        if depth <= 0 {
            return self.scorer.evaluate(game_state, ply) * side.sign();
        }

        let mut moves = game_state.legal_moves();
        if moves.is_empty() {
            if game_state.is_in_check() {
                trace!(ply, "checkmate in search");
                return -(MATE_VALUE - ply as i32) * side.sign();
            }
            trace!(ply, "stalemate in search");
            return STALEMATE_VALUE;
        }
        order_moves(game_state, moves.as_mut_slice());

        let maximizing = side == Color::Light;
        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for &mv in moves.iter() {
            if !game_state.make_search_move(mv, &mut self.line) {
                warn!(%mv, ply, "search move rejected by make");
                continue;
            }
            let score = self.minimax(game_state, depth - 1, ply + 1, alpha, beta);
            game_state.undo_search_move(&mut self.line);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Searches `game_state` to `depth` plies with the standard evaluator.
pub fn search(game_state: &mut GameState, depth: u8) -> SearchResult {
    let scorer = CombinedScorer::standard();
    let config = SearchConfig {
        max_depth: depth,
        ..SearchConfig::default()
    };
    AlphaBetaSearch::new(&scorer, config).run(game_state)
}
