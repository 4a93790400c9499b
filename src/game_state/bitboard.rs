//! Bit-plane primitives over 64-bit square sets.
//!
//! Bit `n` corresponds to square `n` (`a1 == 0`, `h8 == 63`).

use crate::game_state::chess_types::{Color, Square};

pub type Bitboard = u64;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const RANK_1: Bitboard = 0x0000_0000_0000_00FF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const FILE_MASKS: [Bitboard; 8] = [
    FILE_A,
    FILE_A << 1,
    FILE_A << 2,
    FILE_A << 3,
    FILE_A << 4,
    FILE_A << 5,
    FILE_A << 6,
    FILE_A << 7,
];

pub const RANK_MASKS: [Bitboard; 8] = [
    RANK_1,
    RANK_1 << 8,
    RANK_1 << 16,
    RANK_1 << 24,
    RANK_1 << 32,
    RANK_1 << 40,
    RANK_1 << 48,
    RANK_1 << 56,
];

/// Light-colored squares (`a1` is dark, `h1` is light).
pub const LIGHT_SQUARES: Bitboard = 0x55AA_55AA_55AA_55AA;
pub const DARK_SQUARES: Bitboard = !LIGHT_SQUARES;

#[inline]
pub const fn square_mask(square: Square) -> Bitboard {
    1u64 << square
}

#[inline]
pub const fn is_set(bitboard: Bitboard, square: Square) -> bool {
    bitboard & square_mask(square) != 0
}

#[inline]
pub const fn set_square(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard | square_mask(square)
}

#[inline]
pub const fn clear_square(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard & !square_mask(square)
}

#[inline]
pub const fn count(bitboard: Bitboard) -> u32 {
    bitboard.count_ones()
}

#[inline]
pub const fn lsb(bitboard: Bitboard) -> Option<Square> {
    if bitboard == 0 {
        None
    } else {
        Some(bitboard.trailing_zeros() as Square)
    }
}

#[inline]
pub const fn msb(bitboard: Bitboard) -> Option<Square> {
    if bitboard == 0 {
        None
    } else {
        Some(63 - bitboard.leading_zeros() as Square)
    }
}

/// Removes and returns the least-significant square.
#[inline]
pub fn pop_lsb(bitboard: &mut Bitboard) -> Option<Square> {
    let square = lsb(*bitboard)?;
    *bitboard &= *bitboard - 1;
    Some(square)
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

/// Rank counted from `color`'s own back rank (0 = home rank, 7 = promotion rank).
#[inline]
pub const fn relative_rank(color: Color, square: Square) -> u8 {
    match color {
        Color::Light => rank_of(square),
        Color::Dark => 7 - rank_of(square),
    }
}

/// Files directly left and right of `file`.
#[inline]
pub const fn adjacent_files_mask(file: u8) -> Bitboard {
    let mut mask = 0;
    if file > 0 {
        mask |= FILE_MASKS[(file - 1) as usize];
    }
    if file < 7 {
        mask |= FILE_MASKS[(file + 1) as usize];
    }
    mask
}

/// Every square on a rank strictly in front of `square` from `color`'s point of view.
#[inline]
pub const fn forward_ranks_mask(color: Color, square: Square) -> Bitboard {
    let rank = rank_of(square) as u32;
    match color {
        Color::Light => {
            if rank >= 7 {
                0
            } else {
                !0u64 << ((rank + 1) * 8)
            }
        }
        Color::Dark => (1u64 << (rank * 8)) - 1,
    }
}

/// Iterator over the set squares of a bitboard, lowest first.
#[derive(Debug, Clone, Copy)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

#[inline]
pub const fn squares(bitboard: Bitboard) -> Squares {
    Squares(bitboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_and_count_agree() {
        let bb = set_square(set_square(0, 0), 63);
        assert!(is_set(bb, 0));
        assert!(is_set(bb, 63));
        assert_eq!(count(bb), 2);
        assert_eq!(count(clear_square(bb, 63)), 1);
    }

    #[test]
    fn lsb_and_msb_handle_empty_sets() {
        assert_eq!(lsb(0), None);
        assert_eq!(msb(0), None);
        assert_eq!(lsb(0b1010_0000), Some(5));
        assert_eq!(msb(0b1010_0000), Some(7));
    }

    #[test]
    fn square_iterator_walks_in_ascending_order() {
        let collected: Vec<Square> = squares(FILE_A & (RANK_1 | RANK_8)).collect();
        assert_eq!(collected, vec![0, 56]);
    }

    #[test]
    fn forward_masks_exclude_own_rank() {
        let e4 = 28;
        assert_eq!(forward_ranks_mask(Color::Light, e4) & RANK_MASKS[3], 0);
        assert_ne!(forward_ranks_mask(Color::Light, e4) & RANK_8, 0);
        assert_eq!(forward_ranks_mask(Color::Dark, e4), RANK_1 | RANK_2 | RANK_3);
        assert_eq!(forward_ranks_mask(Color::Light, 63), 0);
        assert_eq!(forward_ranks_mask(Color::Dark, 0), 0);
    }

    #[test]
    fn adjacent_files_clip_at_board_edges() {
        assert_eq!(adjacent_files_mask(0), FILE_B);
        assert_eq!(adjacent_files_mask(7), FILE_G);
        assert_eq!(count(adjacent_files_mask(3)), 16);
    }

    #[test]
    fn a1_is_a_dark_square() {
        assert!(is_set(DARK_SQUARES, 0));
        assert!(is_set(LIGHT_SQUARES, 7));
        assert!(is_set(LIGHT_SQUARES, 56));
    }
}
