//! Attack sets per square.
//!
//! Leaper tables (knight, king, pawn captures) are built at compile time.
//! Sliding attacks walk rays until the first occupied square, which is
//! included so captures fall out of the same mask.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const LIGHT_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

/// `(file_step, rank_step)` ray directions.
pub const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_OFFSETS);
pub const LIGHT_PAWN_ATTACKS: [u64; 64] = leaper_table(&LIGHT_PAWN_OFFSETS);
pub const DARK_PAWN_ATTACKS: [u64; 64] = leaper_table(&DARK_PAWN_OFFSETS);

const fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            let (df, dr) = offsets[i];
            attacks |= on_board_bit(file + df, rank + dr);
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }
    table
}

const fn on_board_bit(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        0
    } else {
        1u64 << (rank * 8 + file)
    }
}

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a `color` pawn on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) as i32 + file_step;
    let mut rank = (square / 8) as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[inline]
fn slide(square: Square, directions: &[(i32, i32)], occupancy: u64) -> u64 {
    directions
        .iter()
        .fold(0, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}
