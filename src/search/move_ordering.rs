//! Static move ordering for alpha-beta.
//!
//! Promotions first, then captures by most-valuable-victim /
//! least-valuable-attacker, then en passant, castling and quiet moves. The
//! sort is stable so equal-priority moves keep generation order.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::enemy_piece_on;

const PROMOTION_BASE: i32 = 300_000;
const CAPTURE_BASE: i32 = 200_000;
const EN_PASSANT_SCORE: i32 = 150_000;
const CASTLING_SCORE: i32 = 100_000;

pub fn order_moves(game_state: &GameState, moves: &mut [Move]) {
    moves.sort_by_key(|m| -move_order_score(game_state, *m));
}

pub fn move_order_score(game_state: &GameState, mv: Move) -> i32 {
    match mv.kind() {
        MoveKind::Promotion => {
            let promo = mv
                .promotion_kind()
                .map_or(0, |p| ordering_value(p.piece_kind()));
            let victim = enemy_piece_on(game_state, mv.to()).map_or(0, ordering_value);
            PROMOTION_BASE + promo + victim
        }
        MoveKind::EnPassant => EN_PASSANT_SCORE,
        MoveKind::Castling => CASTLING_SCORE,
        MoveKind::Normal => match enemy_piece_on(game_state, mv.to()) {
            Some(victim) => {
                let aggressor = game_state
                    .piece_at(mv.from())
                    .map_or(0, |(_, kind)| ordering_value(kind));
                CAPTURE_BASE + ordering_value(victim) * 16 - aggressor
            }
            None => 0,
        },
    }
}

#[inline]
const fn ordering_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 2_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_come_in_priority_order() {
        // Light can promote on b8, take d5 with the queen, capture en passant
        // on f6 and castle kingside.
        let mut game = GameState::from_fen("8/1P6/k7/3p1pP1/8/8/8/3QK2R w K f6 0 1")
            .expect("FEN should parse");
        let mut moves = game.legal_moves().to_vec();
        order_moves(&game, &mut moves);

        assert_eq!(moves[0], Move::promotion(49, 57, PromotionKind::Queen));
        let first_non_promotion = moves.iter().position(|m| !m.is_promotion()).unwrap_or(0);
        assert_eq!(first_non_promotion, 4);
        assert_eq!(moves[4], Move::normal(3, 35)); // Qxd5
        assert_eq!(moves[5], Move::en_passant(38, 45));
        assert_eq!(moves[6], Move::castling(4, 6));
    }

    #[test]
    fn cheaper_attacker_goes_first_on_equal_victims() {
        let game = GameState::from_fen("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let pawn_takes = Move::normal(28, 35);
        let queen_takes = Move::normal(3, 35);
        assert!(move_order_score(&game, pawn_takes) > move_order_score(&game, queen_takes));
    }

    #[test]
    fn quiet_moves_keep_generation_order() {
        let mut game = GameState::new_game();
        let generated = game.legal_moves().to_vec();
        let mut ordered = generated.clone();
        order_moves(&game, &mut ordered);
        assert_eq!(generated, ordered);
    }
}
