//! Pseudo-legal bishop, rook, and queen moves from ray-walk attack sets.

use crate::game_state::bitboard::squares;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::own_occupancy;
use crate::moves::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::move_list::MoveList;

fn generate_slider_moves(
    game_state: &GameState,
    kind: PieceKind,
    attacks: fn(Square, u64) -> u64,
    out: &mut MoveList,
) {
    let own_occ = own_occupancy(game_state);
    for from in squares(game_state.pieces_of(game_state.side_to_move, kind)) {
        for to in squares(attacks(from, game_state.occupancy_all) & !own_occ) {
            out.push(Move::normal(from, to));
        }
    }
}

pub fn generate_bishop_moves(game_state: &GameState, out: &mut MoveList) {
    generate_slider_moves(game_state, PieceKind::Bishop, bishop_attacks, out);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut MoveList) {
    generate_slider_moves(game_state, PieceKind::Rook, rook_attacks, out);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut MoveList) {
    generate_slider_moves(game_state, PieceKind::Queen, queen_attacks, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliders_are_boxed_in_at_start() {
        let game = GameState::new_game();
        let mut out = MoveList::new();
        generate_bishop_moves(&game, &mut out);
        generate_rook_moves(&game, &mut out);
        generate_queen_moves(&game, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn rook_includes_capture_and_stops_there() {
        let game =
            GameState::from_fen("4k3/8/8/8/r7/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut out = MoveList::new();
        generate_rook_moves(&game, &mut out);
        // a2, a3, capture a4, then b1 c1 d1
        assert_eq!(out.len(), 6);
        assert!(out.contains(Move::normal(0, 24)));
        assert!(!out.contains(Move::normal(0, 32)));
    }

    #[test]
    fn queen_in_open_center_has_twenty_seven_moves() {
        let game =
            GameState::from_fen("8/7k/8/8/3Q4/8/8/1K6 w - - 0 1").expect("FEN should parse");
        let mut out = MoveList::new();
        generate_queen_moves(&game, &mut out);
        assert_eq!(out.len(), 27);
    }
}
