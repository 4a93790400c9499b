//! Error types returned by the textual codecs.
//!
//! The position state machine itself reports rejected moves with `bool`; only
//! parsing of user-supplied text produces these values.

use thiserror::Error;

/// Coordinate text such as `e4` that does not name a square.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square must be exactly two characters, got {0:?}")]
    WrongLength(String),
    #[error("invalid file in square {0:?}")]
    BadFile(String),
    #[error("invalid rank in square {0:?}")]
    BadRank(String),
}

/// Malformed or structurally impossible FEN input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have 6 fields, got {0}")]
    FieldCount(usize),
    #[error("piece placement must describe 8 ranks, got {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files")]
    RankWidth { rank: u8, files: u8 },
    #[error("invalid piece character {0:?}")]
    BadPiece(char),
    #[error("invalid side to move {0:?}")]
    BadSideToMove(String),
    #[error("invalid castling field {0:?}")]
    BadCastling(String),
    #[error("invalid en passant square {0:?}")]
    BadEnPassant(String),
    #[error("invalid halfmove clock {0:?}")]
    BadHalfmoveClock(String),
    #[error("invalid fullmove number {0:?}")]
    BadFullmoveNumber(String),
    #[error("two pieces occupy square {0}")]
    OverlappingPieces(u8),
    #[error("en passant square {0} does not follow a double pawn push")]
    EnPassantMismatch(u8),
    #[error("each side needs exactly one king")]
    KingCount,
    #[error("pawns may not stand on the first or last rank")]
    PawnOnBackRank,
    #[error("the side not to move is in check")]
    OpponentInCheck,
}

/// Long algebraic move text that does not name a legal move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move must be 4 or 5 characters, got {0:?}")]
    WrongLength(String),
    #[error(transparent)]
    Square(#[from] SquareParseError),
    #[error("invalid promotion piece {0:?}")]
    BadPromotion(char),
    #[error("{0} is not a legal move in this position")]
    NotLegal(String),
}
