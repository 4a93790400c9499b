//! Zobrist hashing for position signatures and repetition tracking.
//!
//! Keys come from a fixed-seed `StdRng`, so signatures are identical across
//! runs. Make/unmake maintain the key incrementally; [`compute_zobrist_key`]
//! rebuilds it from scratch after setup.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::bitboard::squares;
use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x5EED_B1C4_C4E5_5000;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Key for a full castling mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[(file & 7) as usize]
}

/// Toggled in when dark is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in ALL_COLORS {
        for piece in ALL_PIECE_KINDS {
            for square in squares(game_state.pieces[color.index()][piece.index()]) {
                key ^= piece_square_key(color, piece, square);
            }
        }
    }

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);

    if let Some(ep_square) = game_state.en_passant_square {
        key ^= en_passant_file_key(ep_square % 8);
    }

    key
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key, b.zobrist_key);
        assert_eq!(a.zobrist_key, compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key, without_rights.zobrist_key);
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key, ep.zobrist_key);
    }

    #[test]
    fn incremental_key_matches_recompute_after_moves() {
        let mut game = GameState::new_game();
        for text in ["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "g1f3", "c6b5", "e1g1"] {
            let mv = crate::utils::long_algebraic::parse_long_algebraic(text, &mut game)
                .expect("move should parse");
            assert!(game.make_move(mv), "{text} should apply");
            assert_eq!(game.zobrist_key, compute_zobrist_key(&game), "after {text}");
        }
    }
}
