use std::fmt::Write as _;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

/// Serializes `game_state` as a six-field FEN string.
pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let en_passant = game_state
        .en_passant_square
        .and_then(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            match game_state.piece_at(rank * 8 + file) {
                Some((color, kind)) => {
                    if empty_run > 0 {
                        let _ = write!(out, "{empty_run}");
                        empty_run = 0;
                    }
                    out.push(fen_char(color, kind));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            let _ = write!(out, "{empty_run}");
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

#[inline]
fn fen_char(color: Color, kind: PieceKind) -> char {
    let ch = kind.to_char();
    match color {
        Color::Light => ch.to_ascii_uppercase(),
        Color::Dark => ch,
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let field: String = [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|(flag, _)| rights & flag != 0)
    .map(|(_, ch)| ch)
    .collect();

    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Move;
    use crate::game_state::game_state::GameState;

    #[test_case(STARTING_POSITION_FEN; "start")]
    #[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"; "kiwipete")]
    #[test_case("rnbqkbnr/pppp1ppp/8/8/4pP2/8/PPPPP1PP/RNBQKBNR b KQkq f3 0 3"; "en passant target")]
    #[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"; "no castling")]
    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 7 42"; "partial rights and clocks")]
    fn parse_then_generate_is_identity(fen: &str) {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        assert_eq!(generate_fen(&game), fen);
    }

    #[test]
    fn fen_tracks_moves_played() {
        let mut game = GameState::new_game();
        assert!(game.make_move(Move::normal(12, 28)));
        assert_eq!(
            generate_fen(&game),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert!(game.make_move(Move::normal(62, 45)));
        assert_eq!(
            generate_fen(&game),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }
}
