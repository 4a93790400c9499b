//! FEN-to-GameState parser.
//!
//! Builds a complete position on a scratch instance and validates it before
//! handing it back, so callers never observe a half-parsed state.

use crate::errors::FenError;
use crate::game_state::bitboard::square_mask;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let mut game_state = GameState::new_empty();

    parse_board(fields[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(fields[1])?;
    game_state.castling_rights = parse_castling_rights(fields[2])?;
    game_state.en_passant_square = parse_en_passant_square(fields[3], game_state.side_to_move)?;
    game_state.halfmove_clock = fields[4]
        .parse::<u16>()
        .map_err(|_| FenError::BadHalfmoveClock(fields[4].to_owned()))?;
    game_state.fullmove_number = match fields[5].parse::<u16>() {
        Ok(n) if n >= 1 => n,
        _ => return Err(FenError::BadFullmoveNumber(fields[5].to_owned())),
    };

    game_state.reset_history();
    game_state.validate()?;
    Ok(game_state)
}

fn parse_board(board: &str, game_state: &mut GameState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_text) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_text.chars() {
            if let Some(empty) = ch.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(FenError::BadPiece(ch));
                }
                file += empty as u8;
            } else {
                let kind = PieceKind::from_char(ch).ok_or(FenError::BadPiece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::Light
                } else {
                    Color::Dark
                };
                if file < 8 {
                    game_state.pieces[color.index()][kind.index()] |=
                        square_mask(board_rank * 8 + file);
                }
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth {
                    rank: board_rank + 1,
                    files: file,
                });
            }
        }

        if file != 8 {
            return Err(FenError::RankWidth {
                rank: board_rank + 1,
                files: file,
            });
        }
    }

    Ok(())
}

fn parse_side_to_move(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::BadSideToMove(field.to_owned())),
    }
}

fn parse_castling_rights(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in field.chars() {
        let flag = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::BadCastling(field.to_owned())),
        };
        if rights & flag != 0 {
            return Err(FenError::BadCastling(field.to_owned()));
        }
        rights |= flag;
    }
    Ok(rights)
}

/// The target must sit on the rank just behind a pawn that double-pushed on
/// the previous move: rank 6 with light to move, rank 3 with dark to move.
fn parse_en_passant_square(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }

    let square =
        algebraic_to_square(field).map_err(|_| FenError::BadEnPassant(field.to_owned()))?;
    let expected_rank = match side_to_move {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if square / 8 != expected_rank {
        return Err(FenError::BadEnPassant(field.to_owned()));
    }
    Ok(Some(square))
}
