use crate::game_state::bitboard::{square_mask, squares};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_square_attacked, king_square};
use crate::move_generation::legal_move_shared::own_occupancy;
use crate::moves::attack_tables::king_attacks;
use crate::moves::move_list::MoveList;

/// One castling option: required right, king path, squares that must be empty,
/// and squares the king passes that must not be attacked (start included).
struct CastlePath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    must_be_empty: u64,
    must_be_safe: [Square; 3],
}

const LIGHT_CASTLES: [CastlePath; 2] = [
    CastlePath {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        must_be_empty: square_mask(5) | square_mask(6),
        must_be_safe: [4, 5, 6],
    },
    CastlePath {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        must_be_empty: square_mask(1) | square_mask(2) | square_mask(3),
        must_be_safe: [4, 3, 2],
    },
];

const DARK_CASTLES: [CastlePath; 2] = [
    CastlePath {
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        must_be_empty: square_mask(61) | square_mask(62),
        must_be_safe: [60, 61, 62],
    },
    CastlePath {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        must_be_empty: square_mask(57) | square_mask(58) | square_mask(59),
        must_be_safe: [60, 59, 58],
    },
];

pub fn generate_king_moves(game_state: &GameState, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let Some(from) = king_square(game_state, side) else {
        return;
    };

    for to in squares(king_attacks(from) & !own_occupancy(game_state)) {
        out.push(Move::normal(from, to));
    }

    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let paths = match side {
        Color::Light => &LIGHT_CASTLES,
        Color::Dark => &DARK_CASTLES,
    };

    for path in paths {
        if game_state.castling_rights & path.right == 0
            || king_from != path.king_from
            || game_state.occupancy_all & path.must_be_empty != 0
        {
            continue;
        }
        if path
            .must_be_safe
            .iter()
            .any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }
        out.push(Move::castling(path.king_from, path.king_to));
    }
}
