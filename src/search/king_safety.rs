//! King-safety terms for the opening and middlegame.
//!
//! Covers castled placement, the pawn shield, open files around the king,
//! enemy pawn storms and enemy queen proximity. The whole term is zero once
//! [`detect_phase`] reports an endgame.

use crate::game_state::bitboard::{file_of, is_set, lsb, msb, rank_of, squares, FILE_MASKS};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::king_square;
use crate::search::board_scoring::{for_side_to_move, BoardScorer};
use crate::search::game_phase::{detect_phase, GamePhase};

pub const CASTLED_BONUS: i32 = 50;
pub const SHIELD_PAWN_BONUS: i32 = 10;
pub const OPEN_FILE_PENALTY: i32 = -30;
pub const SEMI_OPEN_FILE_PENALTY: i32 = -15;
pub const PAWN_STORM_PENALTY: i32 = -10;
pub const QUEEN_TROPISM_PENALTY: i32 = -5;

#[derive(Debug, Clone, Copy, Default)]
pub struct KingSafetyScorer;

impl KingSafetyScorer {
    /// Safety of `color`'s king, ignoring game phase.
    pub fn safety_for(game_state: &GameState, color: Color) -> i32 {
        let Some(king) = king_square(game_state, color) else {
            return 0;
        };

        castled_bonus(color, king)
            + pawn_shield(game_state, color, king)
            + file_exposure(game_state, color, king)
            + pawn_storm(game_state, color, king)
            + queen_tropism(game_state, color, king)
    }
}

impl BoardScorer for KingSafetyScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        if detect_phase(game_state) == GamePhase::Endgame {
            return 0;
        }
        let white_minus_black = Self::safety_for(game_state, Color::Light)
            - Self::safety_for(game_state, Color::Dark);
        for_side_to_move(game_state, white_minus_black)
    }

    fn name(&self) -> &'static str {
        "king_safety"
    }
}

fn castled_bonus(color: Color, king: Square) -> i32 {
    let castled = match color {
        Color::Light => king == 6 || king == 2,
        Color::Dark => king == 62 || king == 58,
    };
    if castled {
        CASTLED_BONUS
    } else {
        0
    }
}

/// Own pawns one and two ranks ahead on the king's file and its neighbours.
/// Nothing counts once the king has walked within two ranks of the far edge.
fn pawn_shield(game_state: &GameState, color: Color, king: Square) -> i32 {
    let pawns = game_state.pieces_of(color, PieceKind::Pawn);
    let king_file = file_of(king) as i32;
    let king_rank = rank_of(king) as i32;

    let (step, has_room) = match color {
        Color::Light => (1, king_rank < 6),
        Color::Dark => (-1, king_rank > 1),
    };
    if !has_room {
        return 0;
    }

    let mut score = 0;
    for file in (king_file - 1)..=(king_file + 1) {
        if !(0..8).contains(&file) {
            continue;
        }
        for distance in 1..=2 {
            let rank = king_rank + step * distance;
            if is_set(pawns, (rank * 8 + file) as Square) {
                score += SHIELD_PAWN_BONUS - (distance - 1) * 2;
            }
        }
    }
    score
}

/// Open and semi-open files under and beside the king; neighbours count half.
fn file_exposure(game_state: &GameState, color: Color, king: Square) -> i32 {
    let own = game_state.pieces_of(color, PieceKind::Pawn);
    let enemy = game_state.pieces_of(color.opposite(), PieceKind::Pawn);
    let king_file = file_of(king) as i32;

    let file_penalty = |file: i32| -> i32 {
        let mask = FILE_MASKS[file as usize];
        if (own | enemy) & mask == 0 {
            OPEN_FILE_PENALTY
        } else if own & mask == 0 {
            SEMI_OPEN_FILE_PENALTY
        } else {
            0
        }
    };

    let mut score = file_penalty(king_file);
    for file in [king_file - 1, king_file + 1] {
        if (0..8).contains(&file) {
            score += file_penalty(file) / 2;
        }
    }
    score
}

/// The most advanced enemy pawn on each file within two of the king, scored
/// by how many ranks separate it from the king.
fn pawn_storm(game_state: &GameState, color: Color, king: Square) -> i32 {
    let enemy = game_state.pieces_of(color.opposite(), PieceKind::Pawn);
    let king_file = file_of(king) as i32;
    let king_rank = rank_of(king) as i32;

    let mut score = 0;
    for file in (king_file - 2)..=(king_file + 2) {
        if !(0..8).contains(&file) {
            continue;
        }
        let on_file = enemy & FILE_MASKS[file as usize];
        let leader = match color {
            Color::Light => lsb(on_file),
            Color::Dark => msb(on_file),
        };
        if let Some(pawn) = leader {
            let distance = (rank_of(pawn) as i32 - king_rank).abs();
            if distance <= 3 {
                score += PAWN_STORM_PENALTY * (4 - distance);
            }
        }
    }
    score
}

fn queen_tropism(game_state: &GameState, color: Color, king: Square) -> i32 {
    let queens = game_state.pieces_of(color.opposite(), PieceKind::Queen);
    squares(queens)
        .map(|queen| {
            let distance = (file_of(queen) as i32 - file_of(king) as i32).abs()
                + (rank_of(queen) as i32 - rank_of(king) as i32).abs();
            if distance <= 5 {
                QUEEN_TROPISM_PENALTY * (6 - distance)
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn safety(fen: &str, color: Color) -> i32 {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        KingSafetyScorer::safety_for(&game, color)
    }

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(KingSafetyScorer.score(&game), 0);
    }

    #[test]
    fn castled_king_behind_full_shield() {
        // Castled bonus, three shield pawns on rank 2; no files open.
        let fen = "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 w - - 6 5";
        assert_eq!(safety(fen, Color::Light), 50 + 30);
        assert_eq!(safety(fen, Color::Dark), 50 + 30);
    }

    #[test]
    fn second_rank_shield_pawn_counts_less() {
        // g1 king, pawns on f2, g3, h2; rooks keep the phase out of the endgame.
        let fen = "rrrr2k1/5ppp/8/8/8/6P1/5P1P/RRRR2K1 w - - 0 1";
        assert_eq!(safety(fen, Color::Light), 50 + 10 + 8 + 10);
    }

    #[test]
    fn open_and_semi_open_files() {
        let own_open = "4k3/pppp1ppp/8/8/8/8/PPP3PP/4K3 w - - 0 1";
        // e-file fully open; d and f files have only dark pawns. No shield.
        assert_eq!(safety(own_open, Color::Light), -30 + (-15 / 2) * 2);
    }

    #[test]
    fn pawn_storm_and_queen_tropism() {
        // Dark pawn on g4 three ranks from the g1 king; dark queen on e2 is
        // three squares away.
        let fen = "6k1/5ppp/8/8/6p1/8/4qPPP/6K1 w - - 0 1";
        let storm = -10 * (4 - 3);
        let tropism = -5 * (6 - 3);
        let shield = 10 * 3;
        assert_eq!(safety(fen, Color::Light), 50 + shield + storm + tropism);
    }

    #[test]
    fn tropism_counts_every_enemy_queen() {
        // e2 is three squares from the g1 king, h4 is four.
        let one = GameState::from_fen("6k1/8/8/8/8/8/4q3/6K1 w - - 0 1").expect("FEN should parse");
        let two = GameState::from_fen("6k1/8/8/8/7q/8/4q3/6K1 w - - 0 1").expect("FEN should parse");
        assert_eq!(queen_tropism(&one, Color::Light, 6), -15);
        assert_eq!(queen_tropism(&two, Color::Light, 6), -15 - 10);
    }

    #[test]
    fn endgame_disables_king_safety() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(KingSafetyScorer.score(&game), 0);
    }
}
