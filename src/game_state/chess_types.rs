//! Core value types shared by the position model, move generation, and search.
//!
//! Colors and piece kinds are kept separate so the twelve piece planes can be
//! indexed as `[color][piece_kind]`.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;
pub use crate::moves::move_descriptions::Move;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// `+1` for light, `-1` for dark. Multiplies a white-minus-black score into
    /// this color's perspective.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_COLORS: [Color; 2] = [Color::Light, Color::Dark];

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    /// Lowercase FEN letter.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// Move class carried by every [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Promotion,
    EnPassant,
    Castling,
}

/// Piece a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionKind {
    /// Generation order for promotion fan-out.
    pub const ALL: [PromotionKind; 4] = [
        PromotionKind::Queen,
        PromotionKind::Rook,
        PromotionKind::Bishop,
        PromotionKind::Knight,
    ];

    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            PromotionKind::Queen => PieceKind::Queen,
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Knight => PieceKind::Knight,
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PromotionKind::Queen => 'q',
            PromotionKind::Rook => 'r',
            PromotionKind::Bishop => 'b',
            PromotionKind::Knight => 'n',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'q' => Some(PromotionKind::Queen),
            'r' => Some(PromotionKind::Rook),
            'b' => Some(PromotionKind::Bishop),
            'n' => Some(PromotionKind::Knight),
            _ => None,
        }
    }
}

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

/// Castling rights as a 4-bit mask of the `CASTLE_*` flags.
pub type CastlingRights = u8;

/// Board square index (`0..=63`, `a1 == 0`, `h8 == 63`).
pub type Square = u8;
