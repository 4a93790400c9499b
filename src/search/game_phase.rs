//! Game phase classification from remaining non-king material.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::search::board_scoring::MaterialScorer;

/// Total non-king material at or above which the position counts as an opening.
pub const OPENING_MATERIAL_THRESHOLD: i32 = 2800;
/// Total non-king material at or below which the position counts as an endgame.
pub const ENDGAME_MATERIAL_THRESHOLD: i32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

/// Sum of non-king piece values for both colors.
pub fn total_material(game_state: &GameState) -> i32 {
    let mut total = 0;
    for color in ALL_COLORS {
        for kind in ALL_PIECE_KINDS {
            if kind == PieceKind::King {
                continue;
            }
            total += game_state.pieces_of(color, kind).count_ones() as i32
                * MaterialScorer::piece_value(kind);
        }
    }
    total
}

pub fn detect_phase(game_state: &GameState) -> GamePhase {
    phase_for_material(total_material(game_state))
}

#[inline]
pub const fn phase_for_material(total: i32) -> GamePhase {
    if total >= OPENING_MATERIAL_THRESHOLD {
        GamePhase::Opening
    } else if total <= ENDGAME_MATERIAL_THRESHOLD {
        GamePhase::Endgame
    } else {
        GamePhase::Middlegame
    }
}
