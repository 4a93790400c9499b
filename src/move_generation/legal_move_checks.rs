use crate::game_state::bitboard::lsb;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    lsb(game_state.pieces_of(color, PieceKind::King))
}

/// `false` when `color` has no king on the board.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacker = |kind: PieceKind| game_state.pieces_of(attacker_color, kind);

    // A pawn of `attacker_color` hits `square` iff it stands where a defender's
    // pawn on `square` would attack.
    if pawn_attacks(attacker_color.opposite(), square) & attacker(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & attacker(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & attacker(PieceKind::King) != 0 {
        return true;
    }

    let queens = attacker(PieceKind::Queen);
    let diagonal = attacker(PieceKind::Bishop) | queens;
    if diagonal != 0 && bishop_attacks(square, game_state.occupancy_all) & diagonal != 0 {
        return true;
    }

    let orthogonal = attacker(PieceKind::Rook) | queens;
    orthogonal != 0 && rook_attacks(square, game_state.occupancy_all) & orthogonal != 0
}
