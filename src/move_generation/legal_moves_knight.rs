use crate::game_state::bitboard::squares;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::own_occupancy;
use crate::moves::attack_tables::knight_attacks;
use crate::moves::move_list::MoveList;

/// Appends pseudo-legal knight moves (quiet and captures) for the side to move.
pub fn generate_knight_moves(game_state: &GameState, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let own_occ = own_occupancy(game_state);

    for from in squares(game_state.pieces_of(side, PieceKind::Knight)) {
        for to in squares(knight_attacks(from) & !own_occ) {
            out.push(Move::normal(from, to));
        }
    }
}
