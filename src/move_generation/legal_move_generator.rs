//! Full legal move generation pipeline.
//!
//! Piece-wise pseudo-legal generation, then a legality filter that plays each
//! candidate with the search make/unmake and a no-op repetition tracker and
//! keeps it iff the mover's king is not left attacked.

use crate::game_state::chess_types::{GameState, Move};
use crate::game_state::repetition::NoRepetitionTracking;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::move_list::MoveList;

/// Replaces `out` with every pseudo-legal move for the side to move.
pub fn generate_pseudo_legal_moves(game_state: &GameState, out: &mut MoveList) {
    out.clear();
    generate_pawn_moves(game_state, out);
    generate_knight_moves(game_state, out);
    generate_bishop_moves(game_state, out);
    generate_rook_moves(game_state, out);
    generate_queen_moves(game_state, out);
    generate_king_moves(game_state, out);
}

/// Replaces `out` with the legal moves for the side to move. The position is
/// mutated while probing and restored before returning.
pub fn generate_legal_moves(game_state: &mut GameState, out: &mut MoveList) {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal_moves(game_state, &mut pseudo);

    out.clear();
    for &mv in pseudo.iter() {
        if leaves_king_safe(game_state, mv) {
            out.push(mv);
        }
    }
}

/// Stops at the first legal move found.
pub fn has_legal_move(game_state: &mut GameState) -> bool {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal_moves(game_state, &mut pseudo);
    pseudo.iter().any(|&mv| leaves_king_safe(game_state, mv))
}

fn leaves_king_safe(game_state: &mut GameState, mv: Move) -> bool {
    let mover = game_state.side_to_move;
    if !game_state.make_search_move(mv, &mut NoRepetitionTracking) {
        return false;
    }
    let safe = !is_king_in_check(game_state, mover);
    game_state.undo_search_move(&mut NoRepetitionTracking);
    safe
}
