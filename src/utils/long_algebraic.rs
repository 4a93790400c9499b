//! Long algebraic move input (`e2e4`, `e7e8q`).
//!
//! Text is resolved against the legal move list, so the returned [`Move`]
//! carries the right class (castling, en passant, promotion) even though the
//! text only names two squares.

use crate::errors::MoveParseError;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_long_algebraic(text: &str, game_state: &mut GameState) -> Result<Move, MoveParseError> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(MoveParseError::WrongLength(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(PromotionKind::from_char(ch).ok_or(MoveParseError::BadPromotion(ch))?),
        None => None,
    };

    game_state
        .legal_moves()
        .iter()
        .copied()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_kind() == promotion)
        .ok_or_else(|| MoveParseError::NotLegal(text.to_owned()))
}

/// Plays space-separated long algebraic moves onto `game_state`. The position
/// is only updated when every move is legal in turn.
pub fn replay_moves(game_state: &mut GameState, moves: &str) -> Result<(), MoveParseError> {
    let mut scratch = game_state.clone();
    for text in moves.split_whitespace() {
        let mv = parse_long_algebraic(text, &mut scratch)?;
        if !scratch.make_move(mv) {
            return Err(MoveParseError::NotLegal(text.to_owned()));
        }
    }
    *game_state = scratch;
    Ok(())
}

/// FEN reached by playing `moves` from the starting position.
pub fn fen_from_moves(moves: &str) -> Result<String, MoveParseError> {
    let mut game_state = GameState::new_game();
    replay_moves(&mut game_state, moves)?;
    Ok(game_state.get_fen())
}
