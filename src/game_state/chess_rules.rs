//! Chess-rule constants and terminal-state detection.
//!
//! Draws are threefold repetition, stalemate, and insufficient material
//! (bare kings, king and one minor piece against a bare king, or opposing
//! single bishops on the same square color).

use crate::game_state::bitboard::{count, DARK_SQUARES, LIGHT_SQUARES};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Occurrences of one position that end the game as a draw.
pub const REPETITION_DRAW_COUNT: u32 = 3;

impl GameState {
    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check() && !has_legal_move(self)
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check() && !has_legal_move(self)
    }

    #[inline]
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= REPETITION_DRAW_COUNT
    }

    pub fn has_insufficient_material(&self) -> bool {
        has_insufficient_material(self)
    }

    pub fn is_draw(&mut self) -> bool {
        self.is_threefold_repetition() || self.has_insufficient_material() || self.is_stalemate()
    }
}

pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
    for color in ALL_COLORS {
        for kind in heavy_or_pawn {
            if game_state.pieces_of(color, kind) != 0 {
                return false;
            }
        }
    }

    let minors = |color: Color| {
        count(game_state.pieces_of(color, PieceKind::Knight))
            + count(game_state.pieces_of(color, PieceKind::Bishop))
    };
    let light_minors = minors(Color::Light);
    let dark_minors = minors(Color::Dark);

    match (light_minors, dark_minors) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (1, 1) => {
            let bishops = game_state.pieces_of(Color::Light, PieceKind::Bishop)
                | game_state.pieces_of(Color::Dark, PieceKind::Bishop);
            count(bishops) == 2
                && (bishops & LIGHT_SQUARES == bishops || bishops & DARK_SQUARES == bishops)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true; "bare kings")]
    #[test_case("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1", true; "king and bishop")]
    #[test_case("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1", true; "king and knight")]
    #[test_case("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1", false; "bishops on opposite colors")]
    #[test_case("3bk3/8/8/8/8/8/8/2B1K3 w - - 0 1", true; "bishops on same color")]
    #[test_case("4k3/8/8/8/8/8/8/1NN1K3 w - - 0 1", false; "two knights")]
    #[test_case("1n2k3/8/8/8/8/8/8/1N2K3 w - - 0 1", false; "knight against knight")]
    #[test_case("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false; "single pawn")]
    #[test_case("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", false; "single rook")]
    fn insufficient_material_cases(fen: &str, expected: bool) {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        assert_eq!(game.has_insufficient_material(), expected);
    }

    #[test]
    fn back_rank_mate_is_checkmate_not_stalemate() {
        let mut game =
            GameState::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(game.is_in_check());
        assert!(game.is_checkmate());
        assert!(!game.is_stalemate());
        assert!(!game.is_draw());
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let mut game =
            GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(!game.is_in_check());
        assert!(game.is_stalemate());
        assert!(!game.is_checkmate());
        assert!(game.is_draw());
    }

    #[test]
    fn start_position_is_not_terminal() {
        let mut game = GameState::new_game();
        assert!(!game.is_in_check());
        assert!(!game.is_checkmate());
        assert!(!game.is_stalemate());
        assert!(!game.is_draw());
    }

    #[test]
    fn knight_shuffle_reaches_threefold_repetition() {
        let mut game = GameState::new_game();
        let shuffle = [
            Move::normal(6, 21),
            Move::normal(62, 45),
            Move::normal(21, 6),
            Move::normal(45, 62),
        ];
        for mv in shuffle {
            assert!(game.make_move(mv));
        }
        assert_eq!(game.repetition_count(), 2);
        assert!(!game.is_threefold_repetition());
        for mv in shuffle {
            assert!(game.make_move(mv));
        }
        assert_eq!(game.repetition_count(), 3);
        assert!(game.is_threefold_repetition());
        assert!(game.is_draw());

        assert!(game.undo_move());
        assert!(!game.is_threefold_repetition());
    }
}
