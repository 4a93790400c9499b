//! Core incremental board state representation.
//!
//! `GameState` stores piece bitboards, occupancy caches, turn/state flags,
//! clocks, the undo stack used by make/unmake, and the game's repetition
//! table. Move execution lives in `move_generation::legal_move_apply`.

use tracing::debug;

use crate::errors::FenError;
use crate::game_state::bitboard::{
    count, square_mask, squares, Bitboard, RANK_1, RANK_3, RANK_6, RANK_8,
};
use crate::game_state::chess_types::*;
use crate::game_state::repetition::{RepetitionTable, RepetitionTracker};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Undo records reserved up front; long games grow past this without issue.
pub const UNDO_STACK_CAPACITY: usize = 512;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches, always derived from `pieces`.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,

    pub undo_stack: Vec<UndoState>,
    pub repetition_table: RepetitionTable,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl GameState {
    /// Empty board, light to move, no castling rights.
    pub fn new_empty() -> Self {
        let mut game_state = Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            undo_stack: Vec::with_capacity(UNDO_STACK_CAPACITY),
            repetition_table: RepetitionTable::new(),
        };
        game_state.reset_history();
        game_state
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as Square;
            game_state.pieces[Color::Light.index()][kind.index()] |= square_mask(file);
            game_state.pieces[Color::Dark.index()][kind.index()] |= square_mask(56 + file);
            game_state.pieces[Color::Light.index()][PieceKind::Pawn.index()] |=
                square_mask(8 + file);
            game_state.pieces[Color::Dark.index()][PieceKind::Pawn.index()] |=
                square_mask(48 + file);
        }
        game_state.castling_rights = CASTLE_ALL;
        game_state.reset_history();
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    /// Replaces this position with `fen`. On failure the position is untouched.
    pub fn load_fen(&mut self, fen: &str) -> bool {
        match parse_fen(fen) {
            Ok(parsed) => {
                *self = parsed;
                true
            }
            Err(err) => {
                debug!(%err, fen, "rejected FEN");
                false
            }
        }
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Removes every piece and resets all scalar state.
    pub fn clear(&mut self) {
        *self = Self::new_empty();
    }

    /// Places a piece on an empty square. Returns `false` if the square is
    /// off-board or occupied.
    ///
    /// Editing the board starts a new history: the undo stack and repetition
    /// table are reset to the edited position.
    pub fn add_piece(&mut self, square: Square, color: Color, kind: PieceKind) -> bool {
        if square > 63 || self.occupancy_all & square_mask(square) != 0 {
            return false;
        }
        self.pieces[color.index()][kind.index()] |= square_mask(square);
        self.reset_history();
        true
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        if square > 63 {
            return None;
        }
        let mask = square_mask(square);
        for color in ALL_COLORS {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some((color, kind));
                }
            }
        }
        None
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn recalc_occupancy(&mut self) {
        let light = self.pieces[Color::Light.index()].iter().fold(0, |acc, bb| acc | bb);
        let dark = self.pieces[Color::Dark.index()].iter().fold(0, |acc, bb| acc | bb);
        self.occupancy_by_color = [light, dark];
        self.occupancy_all = light | dark;
    }

    /// Recomputes derived planes and the signature, then starts a fresh history
    /// containing only the current position.
    pub fn reset_history(&mut self) {
        self.recalc_occupancy();
        self.zobrist_key = compute_zobrist_key(self);
        self.undo_stack.clear();
        self.repetition_table.clear();
        self.repetition_table.record(self.zobrist_key);
    }

    /// How many times the current position has occurred in this game.
    #[inline]
    pub fn repetition_count(&self) -> u32 {
        self.repetition_table.count(self.zobrist_key)
    }

    /// Number of moves that can be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Structural checks: disjoint planes, exactly one king per color, no pawns
    /// on the back ranks, a consistent en passant target, and the side not to
    /// move is not in check.
    pub fn validate(&self) -> Result<(), FenError> {
        let mut seen = 0u64;
        for color in ALL_COLORS {
            for kind in ALL_PIECE_KINDS {
                let plane = self.pieces[color.index()][kind.index()];
                if let Some(square) = squares(plane & seen).next() {
                    return Err(FenError::OverlappingPieces(square));
                }
                seen |= plane;
            }
        }

        for color in ALL_COLORS {
            if count(self.pieces_of(color, PieceKind::King)) != 1 {
                return Err(FenError::KingCount);
            }
        }

        let pawns = self.pieces_of(Color::Light, PieceKind::Pawn)
            | self.pieces_of(Color::Dark, PieceKind::Pawn);
        if pawns & (RANK_1 | RANK_8) != 0 {
            return Err(FenError::PawnOnBackRank);
        }

        if let Some(target) = self.en_passant_square {
            self.validate_en_passant(target, seen)?;
        }

        if is_king_in_check(self, self.side_to_move.opposite()) {
            return Err(FenError::OpponentInCheck);
        }
        Ok(())
    }

    /// The target and the pawn's origin square are empty, and the enemy pawn
    /// that double-pushed stands directly in front of the target.
    fn validate_en_passant(&self, target: Square, occupied: Bitboard) -> Result<(), FenError> {
        let mover = self.side_to_move;
        let target_rank = match mover {
            Color::Light => RANK_6,
            Color::Dark => RANK_3,
        };
        if target > 63 || square_mask(target) & target_rank == 0 {
            return Err(FenError::EnPassantMismatch(target));
        }

        let (pushed, origin) = match mover {
            Color::Light => (target - 8, target + 8),
            Color::Dark => (target + 8, target - 8),
        };
        let pushed_pawn = self.pieces_of(mover.opposite(), PieceKind::Pawn) & square_mask(pushed);
        if pushed_pawn == 0 || occupied & (square_mask(target) | square_mask(origin)) != 0 {
            return Err(FenError::EnPassantMismatch(target));
        }
        Ok(())
    }
}
