//! In-place make/unmake.
//!
//! One implementation serves both the game and the search. The game variant
//! records signatures in the position's own repetition table; the search
//! variant records into a tracker owned by the caller. Every successful make
//! pushes an [`UndoState`], and the matching undo pops it and releases the
//! same signature, so a balanced sequence restores the position exactly.

use crate::game_state::bitboard::{square_mask, RANK_1, RANK_8};
use crate::game_state::chess_types::*;
use crate::game_state::repetition::RepetitionTracker;
use crate::game_state::undo_state::CapturedPiece;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::legal_move_shared::piece_on_square_for_color;
use crate::moves::move_list::MoveList;
use crate::search::zobrist::{
    castling_key, en_passant_file_key, piece_square_key, side_to_move_key,
};

impl GameState {
    /// Plays a legal move in the game. Returns `false` and leaves the position
    /// untouched if `mv` is not legal here.
    pub fn make_move(&mut self, mv: Move) -> bool {
        if !self.is_legal_move(mv) {
            return false;
        }
        let mut table = std::mem::take(&mut self.repetition_table);
        let applied = self.make_move_tracked(mv, &mut table);
        self.repetition_table = table;
        applied
    }

    /// Takes back the last game move. `false` on an empty history.
    pub fn undo_move(&mut self) -> bool {
        let mut table = std::mem::take(&mut self.repetition_table);
        let undone = self.undo_move_tracked(&mut table);
        self.repetition_table = table;
        undone
    }

    /// Applies a pseudo-legal move without a legality check, recording the
    /// resulting signature in `tracker`.
    #[inline]
    pub fn make_search_move<T: RepetitionTracker + ?Sized>(
        &mut self,
        mv: Move,
        tracker: &mut T,
    ) -> bool {
        self.make_move_tracked(mv, tracker)
    }

    #[inline]
    pub fn undo_search_move<T: RepetitionTracker + ?Sized>(&mut self, tracker: &mut T) -> bool {
        self.undo_move_tracked(tracker)
    }

    pub fn is_legal_move(&mut self, mv: Move) -> bool {
        let mut legal = MoveList::new();
        generate_legal_moves(self, &mut legal);
        legal.contains(mv)
    }

    pub fn legal_moves(&mut self) -> MoveList {
        let mut legal = MoveList::new();
        generate_legal_moves(self, &mut legal);
        legal
    }

    fn make_move_tracked<T: RepetitionTracker + ?Sized>(&mut self, mv: Move, tracker: &mut T) -> bool {
        let Some(undo) = self.apply_unrecorded(mv) else {
            return false;
        };
        tracker.record(undo.next_zobrist_key);
        self.undo_stack.push(undo);
        true
    }

    fn undo_move_tracked<T: RepetitionTracker + ?Sized>(&mut self, tracker: &mut T) -> bool {
        let Some(undo) = self.undo_stack.pop() else {
            return false;
        };
        tracker.release(undo.next_zobrist_key);
        self.revert(&undo);
        true
    }

    /// Executes `mv` on the board, or returns `None` without touching anything
    /// if the move is structurally impossible here.
    fn apply_unrecorded(&mut self, mv: Move) -> Option<UndoState> {
        let from = mv.from();
        let to = mv.to();
        let mover = self.side_to_move;
        let enemy = mover.opposite();

        let moved_piece = piece_on_square_for_color(self, mover, from)?;
        if self.occupancy_by_color[mover.index()] & square_mask(to) != 0 {
            return None;
        }

        let last_rank = match mover {
            Color::Light => RANK_8,
            Color::Dark => RANK_1,
        };
        let reaches_last_rank = square_mask(to) & last_rank != 0;
        let rook_hop = match mv.kind() {
            MoveKind::Normal => {
                if moved_piece == PieceKind::Pawn && reaches_last_rank {
                    return None;
                }
                None
            }
            MoveKind::Promotion => {
                if moved_piece != PieceKind::Pawn || !reaches_last_rank {
                    return None;
                }
                None
            }
            MoveKind::EnPassant => {
                if moved_piece != PieceKind::Pawn || self.en_passant_square != Some(to) {
                    return None;
                }
                None
            }
            MoveKind::Castling => {
                if moved_piece != PieceKind::King {
                    return None;
                }
                let (rook_from, rook_to) = castling_rook_squares(from, to)?;
                if self.pieces_of(mover, PieceKind::Rook) & square_mask(rook_from) == 0 {
                    return None;
                }
                Some((rook_from, rook_to))
            }
        };

        let captured = match mv.kind() {
            MoveKind::EnPassant => {
                let square = match mover {
                    Color::Light => to.checked_sub(8)?,
                    Color::Dark => to.checked_add(8)?,
                };
                if self.pieces_of(enemy, PieceKind::Pawn) & square_mask(square) == 0 {
                    return None;
                }
                Some(CapturedPiece {
                    kind: PieceKind::Pawn,
                    color: enemy,
                    square,
                })
            }
            _ => piece_on_square_for_color(self, enemy, to).map(|kind| CapturedPiece {
                kind,
                color: enemy,
                square: to,
            }),
        };
        if matches!(captured, Some(CapturedPiece { kind: PieceKind::King, .. })) {
            return None;
        }

        let mut undo = UndoState {
            mv,
            moved_piece,
            captured,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_zobrist_key: self.zobrist_key,
            next_zobrist_key: 0,
        };

        let mut key = self.zobrist_key ^ castling_key(self.castling_rights) ^ side_to_move_key();
        if let Some(ep) = self.en_passant_square {
            key ^= en_passant_file_key(ep % 8);
        }

        if let Some(taken) = captured {
            self.pieces[taken.color.index()][taken.kind.index()] &= !square_mask(taken.square);
            key ^= piece_square_key(taken.color, taken.kind, taken.square);
        }

        let placed = mv
            .promotion_kind()
            .map_or(moved_piece, PromotionKind::piece_kind);
        self.pieces[mover.index()][moved_piece.index()] &= !square_mask(from);
        self.pieces[mover.index()][placed.index()] |= square_mask(to);
        key ^= piece_square_key(mover, moved_piece, from) ^ piece_square_key(mover, placed, to);

        if let Some((rook_from, rook_to)) = rook_hop {
            self.shift_piece(mover, PieceKind::Rook, rook_from, rook_to);
            key ^= piece_square_key(mover, PieceKind::Rook, rook_from)
                ^ piece_square_key(mover, PieceKind::Rook, rook_to);
        }

        self.halfmove_clock = if moved_piece == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if mover == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.castling_rights = updated_castling_rights(self.castling_rights, mover, moved_piece, from, to);
        self.en_passant_square = if moved_piece == PieceKind::Pawn && from.abs_diff(to) == 16 {
            Some((from + to) / 2)
        } else {
            None
        };

        key ^= castling_key(self.castling_rights);
        if let Some(ep) = self.en_passant_square {
            key ^= en_passant_file_key(ep % 8);
        }

        self.side_to_move = enemy;
        self.recalc_occupancy();
        self.zobrist_key = key;
        undo.next_zobrist_key = key;
        Some(undo)
    }

    fn revert(&mut self, undo: &UndoState) {
        let mover = self.side_to_move.opposite();
        let from = undo.mv.from();
        let to = undo.mv.to();

        let placed = undo
            .mv
            .promotion_kind()
            .map_or(undo.moved_piece, PromotionKind::piece_kind);
        self.pieces[mover.index()][placed.index()] &= !square_mask(to);
        self.pieces[mover.index()][undo.moved_piece.index()] |= square_mask(from);

        if undo.mv.kind() == MoveKind::Castling {
            if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                self.shift_piece(mover, PieceKind::Rook, rook_to, rook_from);
            }
        }

        if let Some(taken) = undo.captured {
            self.pieces[taken.color.index()][taken.kind.index()] |= square_mask(taken.square);
        }

        self.side_to_move = mover;
        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.zobrist_key = undo.prev_zobrist_key;
        self.recalc_occupancy();
    }

    #[inline]
    fn shift_piece(&mut self, color: Color, kind: PieceKind, from: Square, to: Square) {
        let plane = &mut self.pieces[color.index()][kind.index()];
        *plane = (*plane & !square_mask(from)) | square_mask(to);
    }
}

/// Rook hop for a castling king move, keyed by the king's from/to squares.
#[inline]
pub const fn castling_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    match (king_from, king_to) {
        (4, 6) => Some((7, 5)),
        (4, 2) => Some((0, 3)),
        (60, 62) => Some((63, 61)),
        (60, 58) => Some((56, 59)),
        _ => None,
    }
}

/// Castling right lost when a piece leaves or is captured on `square`.
#[inline]
const fn corner_right(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

fn updated_castling_rights(
    rights: CastlingRights,
    mover: Color,
    moved_piece: PieceKind,
    from: Square,
    to: Square,
) -> CastlingRights {
    let mut lost = corner_right(from) | corner_right(to);
    if moved_piece == PieceKind::King {
        lost |= match mover {
            Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
            Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
        };
    }
    rights & !lost
}
