use crate::game_state::bitboard::square_mask;
use crate::game_state::{chess_types::*, game_state::GameState};

#[inline]
pub fn piece_on_square_for_color(
    game_state: &GameState,
    color: Color,
    square: Square,
) -> Option<PieceKind> {
    let mask = square_mask(square);
    if game_state.occupancy_by_color[color.index()] & mask == 0 {
        return None;
    }
    ALL_PIECE_KINDS
        .into_iter()
        .find(|kind| game_state.pieces[color.index()][kind.index()] & mask != 0)
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    piece_on_square_for_color(game_state, game_state.side_to_move.opposite(), square)
}

/// Own pieces for the side to move, as a blocker mask for target generation.
#[inline]
pub fn own_occupancy(game_state: &GameState) -> u64 {
    game_state.occupancy_by_color[game_state.side_to_move.index()]
}

#[inline]
pub fn enemy_occupancy(game_state: &GameState) -> u64 {
    game_state.occupancy_by_color[game_state.side_to_move.opposite().index()]
}
