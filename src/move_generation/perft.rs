//! Move-path enumeration for validating the generator.
//!
//! `perft_nodes` counts leaves only (bulk-counting the last ply). `perft`
//! additionally classifies each leaf move the way the standard published
//! tables do.

use crate::game_state::chess_types::{GameState, Move, MoveKind};
use crate::game_state::repetition::NoRepetitionTracking;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_move};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::move_list::MoveList;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft_nodes(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generate_legal_moves(game_state, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in moves.iter() {
        if game_state.make_search_move(mv, &mut NoRepetitionTracking) {
            nodes += perft_nodes(game_state, depth - 1);
            game_state.undo_search_move(&mut NoRepetitionTracking);
        }
    }
    nodes
}

pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut moves = MoveList::new();
    generate_legal_moves(game_state, &mut moves);

    let mut total = PerftCounts::default();
    for &mv in moves.iter() {
        let is_capture = mv.kind() == MoveKind::EnPassant || enemy_piece_on(game_state, mv.to()).is_some();
        if !game_state.make_search_move(mv, &mut NoRepetitionTracking) {
            continue;
        }
        if depth == 1 {
            total.merge(classify_leaf(game_state, mv, is_capture));
        } else {
            total.merge(perft(game_state, depth - 1));
        }
        game_state.undo_search_move(&mut NoRepetitionTracking);
    }
    total
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = MoveList::new();
    generate_legal_moves(game_state, &mut moves);

    let mut out = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        if game_state.make_search_move(mv, &mut NoRepetitionTracking) {
            out.push((mv, perft_nodes(game_state, depth.saturating_sub(1))));
            game_state.undo_search_move(&mut NoRepetitionTracking);
        }
    }
    out
}

/// Classifies `mv`, which has just been made on `game_state`.
fn classify_leaf(game_state: &mut GameState, mv: Move, is_capture: bool) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    if is_capture {
        counts.captures = 1;
    }
    match mv.kind() {
        MoveKind::EnPassant => counts.en_passant = 1,
        MoveKind::Castling => counts.castles = 1,
        MoveKind::Promotion => counts.promotions = 1,
        MoveKind::Normal => {}
    }
    if game_state.is_in_check() {
        counts.checks = 1;
        if !has_legal_move(game_state) {
            counts.checkmates = 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    #[test_case(STARTING_POSITION_FEN, 1, 20; "start depth 1")]
    #[test_case(STARTING_POSITION_FEN, 2, 400; "start depth 2")]
    #[test_case(STARTING_POSITION_FEN, 3, 8_902; "start depth 3")]
    #[test_case(STARTING_POSITION_FEN, 4, 197_281; "start depth 4")]
    #[test_case(KIWIPETE, 1, 48; "kiwipete depth 1")]
    #[test_case(KIWIPETE, 2, 2_039; "kiwipete depth 2")]
    #[test_case(KIWIPETE, 3, 97_862; "kiwipete depth 3")]
    #[test_case(POSITION_3, 1, 14; "rook endgame depth 1")]
    #[test_case(POSITION_3, 2, 191; "rook endgame depth 2")]
    #[test_case(POSITION_3, 3, 2_812; "rook endgame depth 3")]
    #[test_case(POSITION_3, 4, 43_238; "rook endgame depth 4")]
    #[test_case(POSITION_4, 1, 6; "promotion mess depth 1")]
    #[test_case(POSITION_4, 2, 264; "promotion mess depth 2")]
    #[test_case(POSITION_4, 3, 9_467; "promotion mess depth 3")]
    #[test_case(POSITION_5, 1, 44; "underpromotion depth 1")]
    #[test_case(POSITION_5, 2, 1_486; "underpromotion depth 2")]
    #[test_case(POSITION_5, 3, 62_379; "underpromotion depth 3")]
    fn perft_matches_published_node_counts(fen: &str, depth: u8, expected: u64) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        assert_eq!(perft_nodes(&mut game, depth), expected);
        assert_eq!(game, before);
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(
            perft(&mut game, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_depth_three_breakdown() {
        let mut game = GameState::new_game();
        assert_eq!(
            perft(&mut game, 3),
            PerftCounts {
                nodes: 8_902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_depth_two_breakdown() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        assert_eq!(
            perft(&mut game, 2),
            PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn divide_sums_to_total() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let divided = perft_divide(&mut game, 2);
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 2_039);
    }
}
