//! Pawn-structure terms: doubled, isolated, passed and protected pawns.

use crate::game_state::bitboard::{
    adjacent_files_mask, file_of, forward_ranks_mask, relative_rank, squares, Bitboard, FILE_MASKS,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::pawn_attacks;
use crate::search::board_scoring::{for_side_to_move, BoardScorer};

pub const DOUBLED_PAWN_PENALTY: i32 = -10;
pub const ISOLATED_PAWN_PENALTY: i32 = -20;
pub const PASSED_PAWN_BONUS: i32 = 20;
pub const PASSED_PAWN_ADVANCE_BONUS: i32 = 5;
pub const PROTECTED_PAWN_BONUS: i32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct PawnStructureScorer;

impl PawnStructureScorer {
    pub fn structure_for(game_state: &GameState, color: Color) -> i32 {
        let own = game_state.pieces_of(color, PieceKind::Pawn);
        let enemy = game_state.pieces_of(color.opposite(), PieceKind::Pawn);
        let mut score = 0;

        for file_mask in FILE_MASKS {
            let on_file = (own & file_mask).count_ones() as i32;
            if on_file > 1 {
                score += (on_file - 1) * DOUBLED_PAWN_PENALTY;
            }
        }

        for sq in squares(own) {
            let file = file_of(sq);
            if own & adjacent_files_mask(file) == 0 {
                score += ISOLATED_PAWN_PENALTY;
            }
            if is_passed(color, sq, enemy) {
                score += PASSED_PAWN_BONUS
                    + PASSED_PAWN_ADVANCE_BONUS * relative_rank(color, sq) as i32;
            }
            // A defender stands where an enemy pawn on `sq` would capture.
            if pawn_attacks(color.opposite(), sq) & own != 0 {
                score += PROTECTED_PAWN_BONUS;
            }
        }

        score
    }
}

/// No enemy pawn ahead of `square` on its own or an adjacent file.
pub fn is_passed(color: Color, square: Square, enemy_pawns: Bitboard) -> bool {
    let file = file_of(square);
    let span = (FILE_MASKS[file as usize] | adjacent_files_mask(file)) & forward_ranks_mask(color, square);
    enemy_pawns & span == 0
}

impl BoardScorer for PawnStructureScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = Self::structure_for(game_state, Color::Light)
            - Self::structure_for(game_state, Color::Dark);
        for_side_to_move(game_state, white_minus_black)
    }

    fn name(&self) -> &'static str {
        "pawn_structure"
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn light_structure(fen: &str) -> i32 {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        PawnStructureScorer::structure_for(&game, Color::Light)
    }

    #[test]
    fn start_position_is_symmetric() {
        let game = GameState::new_game();
        assert_eq!(PawnStructureScorer.score(&game), 0);
    }

    // Lone e2 pawn: isolated, passed at relative rank 1.
    #[test_case("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", -20 + 20 + 5; "isolated passer")]
    // Doubled e-pawns, both isolated and passed.
    #[test_case("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1", -10 - 40 + (20 + 5) + (20 + 10); "doubled")]
    // d4 defended by e3; neither isolated, both passed.
    #[test_case("4k3/8/8/8/3P4/4P3/8/4K3 w - - 0 1", 10 + (20 + 15) + (20 + 10); "protected chain")]
    // Enemy pawn on f7 stops the e4 pawn from being passed.
    #[test_case("4k3/5p2/8/8/4P3/8/8/4K3 w - - 0 1", -20; "blocked by adjacent file")]
    fn light_terms(fen: &str, expected: i32) {
        assert_eq!(light_structure(fen), expected);
    }

    #[test]
    fn dark_passer_uses_its_own_advancement() {
        let game = GameState::from_fen("4k3/8/8/8/8/4p3/8/4K3 w - - 0 1").expect("FEN should parse");
        // e3 is five ranks from dark's home rank.
        assert_eq!(
            PawnStructureScorer::structure_for(&game, Color::Dark),
            -20 + 20 + 5 * 5
        );
    }

    #[test]
    fn passed_detection_respects_direction() {
        let dark_pawn_behind = 1u64 << 20; // e3
        assert!(is_passed(Color::Light, 28, dark_pawn_behind)); // e4
        assert!(!is_passed(Color::Dark, 36, dark_pawn_behind)); // e5
    }
}
