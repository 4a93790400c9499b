//! Endgame-only terms: king centralization and amplified passed pawns.

use crate::game_state::bitboard::{relative_rank, squares};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::king_square;
use crate::search::board_scoring::{for_side_to_move, BoardScorer};
use crate::search::game_phase::{detect_phase, GamePhase};
use crate::search::pawn_structure::is_passed;
use crate::search::piece_square_tables::{square_value, KING_ENDGAME_TABLE};

pub const ENDGAME_PASSED_PAWN_BONUS: i32 = 20;
pub const ENDGAME_PASSED_PAWN_RANK_BONUS: i32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct EndgameScorer;

impl EndgameScorer {
    /// Endgame terms for `color`, regardless of the current phase.
    pub fn endgame_terms_for(game_state: &GameState, color: Color) -> i32 {
        let centralization = king_square(game_state, color)
            .map_or(0, |king| square_value(&KING_ENDGAME_TABLE, color, king));

        let enemy_pawns = game_state.pieces_of(color.opposite(), PieceKind::Pawn);
        let passers: i32 = squares(game_state.pieces_of(color, PieceKind::Pawn))
            .filter(|&sq| is_passed(color, sq, enemy_pawns))
            .map(|sq| {
                ENDGAME_PASSED_PAWN_BONUS
                    + ENDGAME_PASSED_PAWN_RANK_BONUS * relative_rank(color, sq) as i32
            })
            .sum();

        centralization + passers
    }
}

impl BoardScorer for EndgameScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        if detect_phase(game_state) != GamePhase::Endgame {
            return 0;
        }
        let white_minus_black = Self::endgame_terms_for(game_state, Color::Light)
            - Self::endgame_terms_for(game_state, Color::Dark);
        for_side_to_move(game_state, white_minus_black)
    }

    fn name(&self) -> &'static str {
        "endgame"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_outside_endgame() {
        assert_eq!(EndgameScorer.score(&GameState::new_game()), 0);
    }

    #[test]
    fn central_king_beats_corner_king() {
        // Light king on e4, dark king on h8.
        let game = GameState::from_fen("7k/8/8/8/4K3/8/8/8 w - - 0 1").expect("FEN should parse");
        assert_eq!(EndgameScorer::endgame_terms_for(&game, Color::Light), 40);
        assert_eq!(EndgameScorer::endgame_terms_for(&game, Color::Dark), -50);
        assert_eq!(EndgameScorer.score(&game), 90);
    }

    #[test]
    fn advanced_passer_is_amplified() {
        // Light pawn on b6 with no dark pawns; both kings on their home squares.
        let game = GameState::from_fen("4k3/8/1P6/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let light = EndgameScorer::endgame_terms_for(&game, Color::Light);
        let king_e1 = -30;
        assert_eq!(light, king_e1 + 20 + 10 * 5);
        // Dark to move sees the same advantage as a deficit.
        let dark = EndgameScorer::endgame_terms_for(&game, Color::Dark);
        assert_eq!(EndgameScorer.score(&game), dark - light);
    }
}
