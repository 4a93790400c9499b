//! Terminal board renderer used by the command-line driver and in debugging.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Renders the board with rank 8 at the top, followed by side to move and FEN.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');
        for file in 0..8u8 {
            let glyph = game_state
                .piece_at(rank * 8 + file)
                .map_or('·', |(color, kind)| piece_glyph(color, kind));
            out.push(glyph);
            if file < 7 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    let side = match game_state.side_to_move {
        Color::Light => "white",
        Color::Dark => "black",
    };
    out.push_str(&format!("{side} to move | {}", game_state.get_fen()));
    out
}

fn piece_glyph(color: Color, kind: PieceKind) -> char {
    match (color, kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
