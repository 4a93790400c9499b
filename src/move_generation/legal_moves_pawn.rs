//! Bit-parallel pawn move generation.
//!
//! Whole target sets are produced by shifting the pawn plane, masking off the
//! wrapped file before diagonal shifts. Each target is then mapped back to its
//! source by the inverse offset.

use crate::game_state::bitboard::{squares, FILE_A, FILE_H, RANK_1, RANK_3, RANK_6, RANK_8};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::enemy_occupancy;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::move_list::MoveList;

#[inline]
const fn shift(bitboard: u64, offset: i8) -> u64 {
    if offset >= 0 {
        bitboard << offset
    } else {
        bitboard >> -offset
    }
}

/// Pushes one move per target, fanning last-rank targets into all four
/// promotion kinds.
fn push_targets(targets: u64, offset: i8, promotion_rank: u64, out: &mut MoveList) {
    for to in squares(targets) {
        let from = (to as i8 - offset) as Square;
        if promotion_rank & (1u64 << to) != 0 {
            for kind in PromotionKind::ALL {
                out.push(Move::promotion(from, to, kind));
            }
        } else {
            out.push(Move::normal(from, to));
        }
    }
}

pub fn generate_pawn_moves(game_state: &GameState, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let pawns = game_state.pieces_of(side, PieceKind::Pawn);
    if pawns == 0 {
        return;
    }
    let empty = !game_state.occupancy_all;
    let enemy = enemy_occupancy(game_state);

    // (forward, toward a-file capture, toward h-file capture, double-push rank, last rank)
    let (forward, west, east, third_rank, last_rank) = match side {
        Color::Light => (8i8, 7i8, 9i8, RANK_3, RANK_8),
        Color::Dark => (-8i8, -9i8, -7i8, RANK_6, RANK_1),
    };

    let single = shift(pawns, forward) & empty;
    let double = shift(single & third_rank, forward) & empty;
    let west_captures = shift(pawns & !FILE_A, west) & enemy;
    let east_captures = shift(pawns & !FILE_H, east) & enemy;

    push_targets(single, forward, last_rank, out);
    push_targets(double, forward * 2, 0, out);
    push_targets(west_captures, west, last_rank, out);
    push_targets(east_captures, east, last_rank, out);

    if let Some(ep) = game_state.en_passant_square {
        // Our pawns standing where an enemy pawn on `ep` would attack.
        for from in squares(pawn_attacks(side.opposite(), ep) & pawns) {
            out.push(Move::en_passant(from, ep));
        }
    }
}
