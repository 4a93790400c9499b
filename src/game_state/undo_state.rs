use crate::game_state::chess_types::*;

/// Piece removed by a move, with the square it was taken on (differs from the
/// destination for en passant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedPiece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

/// Single undo record pushed by every successful make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: PieceKind,
    pub captured: Option<CapturedPiece>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
    /// Signature recorded in the repetition tracker after the move.
    pub next_zobrist_key: u64,
}
