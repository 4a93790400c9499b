//! Packed 16-bit move descriptor.
//!
//! Layout: bits 0-5 source square, bits 6-11 destination square, bits 12-13
//! promotion kind, bits 14-15 move class.

use std::fmt;

use crate::game_state::chess_types::{MoveKind, PromotionKind, Square};

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const PROMOTION_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

const SQUARE_MASK: u16 = 0x3F;
const TWO_BIT_MASK: u16 = 0x3;

const KIND_NORMAL: u16 = 0;
const KIND_PROMOTION: u16 = 1;
const KIND_EN_PASSANT: u16 = 2;
const KIND_CASTLING: u16 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// `a1a1` placeholder used to fill fixed-capacity buffers.
    pub const NULL: Move = Move(0);

    #[inline]
    const fn pack(from: Square, to: Square, promotion: u16, kind: u16) -> Self {
        Move(
            ((from as u16 & SQUARE_MASK) << FROM_SHIFT)
                | ((to as u16 & SQUARE_MASK) << TO_SHIFT)
                | ((promotion & TWO_BIT_MASK) << PROMOTION_SHIFT)
                | ((kind & TWO_BIT_MASK) << KIND_SHIFT),
        )
    }

    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, KIND_NORMAL)
    }

    #[inline]
    pub const fn promotion(from: Square, to: Square, promotion: PromotionKind) -> Self {
        let code = match promotion {
            PromotionKind::Queen => 0,
            PromotionKind::Rook => 1,
            PromotionKind::Bishop => 2,
            PromotionKind::Knight => 3,
        };
        Self::pack(from, to, code, KIND_PROMOTION)
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, KIND_EN_PASSANT)
    }

    /// King move of two squares; the rook hop is implied by the destination.
    #[inline]
    pub const fn castling(from: Square, to: Square) -> Self {
        Self::pack(from, to, 0, KIND_CASTLING)
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        match (self.0 >> KIND_SHIFT) & TWO_BIT_MASK {
            KIND_PROMOTION => MoveKind::Promotion,
            KIND_EN_PASSANT => MoveKind::EnPassant,
            KIND_CASTLING => MoveKind::Castling,
            _ => MoveKind::Normal,
        }
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<PromotionKind> {
        if !matches!(self.kind(), MoveKind::Promotion) {
            return None;
        }
        Some(match (self.0 >> PROMOTION_SHIFT) & TWO_BIT_MASK {
            0 => PromotionKind::Queen,
            1 => PromotionKind::Rook,
            2 => PromotionKind::Bishop,
            _ => PromotionKind::Knight,
        })
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind(), MoveKind::Promotion)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

fn write_square(f: &mut fmt::Formatter<'_>, square: Square) -> fmt::Result {
    let file = (b'a' + square % 8) as char;
    let rank = (b'1' + square / 8) as char;
    write!(f, "{file}{rank}")
}

/// Long algebraic coordinates, e.g. `e2e4`, `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_square(f, self.from())?;
        write_square(f, self.to())?;
        if let Some(promotion) = self.promotion_kind() {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_survive_packing() {
        let mv = Move::promotion(52, 60, PromotionKind::Knight);
        assert_eq!(mv.from(), 52);
        assert_eq!(mv.to(), 60);
        assert_eq!(mv.kind(), MoveKind::Promotion);
        assert_eq!(mv.promotion_kind(), Some(PromotionKind::Knight));
    }

    #[test]
    fn non_promotions_report_no_promotion_kind() {
        assert_eq!(Move::en_passant(36, 43).promotion_kind(), None);
        assert_eq!(Move::castling(4, 6).kind(), MoveKind::Castling);
        assert_eq!(Move::normal(12, 28).kind(), MoveKind::Normal);
    }

    #[test]
    fn display_uses_long_algebraic() {
        assert_eq!(Move::normal(12, 28).to_string(), "e2e4");
        assert_eq!(Move::promotion(48, 56, PromotionKind::Queen).to_string(), "a7a8q");
        assert_eq!(Move::castling(60, 58).to_string(), "e8c8");
    }

    #[test]
    fn moves_compare_by_value() {
        assert_eq!(Move::normal(1, 18), Move::normal(1, 18));
        assert_ne!(Move::normal(12, 28), Move::en_passant(12, 28));
        assert_eq!(std::mem::size_of::<Move>(), 2);
    }
}
