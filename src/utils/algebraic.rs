//! Square coordinates in algebraic form (`a1` .. `h8`).

use crate::errors::SquareParseError;
use crate::game_state::chess_types::Square;

pub fn algebraic_to_square(text: &str) -> Result<Square, SquareParseError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(SquareParseError::WrongLength(text.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) {
        return Err(SquareParseError::BadFile(text.to_owned()));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(SquareParseError::BadRank(text.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// `None` for indices past `h8`.
pub fn square_to_algebraic(square: Square) -> Option<String> {
    if square > 63 {
        return None;
    }
    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'1' + square / 8);
    Some(format!("{file}{rank}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_squares_convert_both_ways() {
        assert_eq!(algebraic_to_square("a1"), Ok(0));
        assert_eq!(algebraic_to_square("h8"), Ok(63));
        assert_eq!(algebraic_to_square("E4"), Ok(28));
        assert_eq!(square_to_algebraic(0).as_deref(), Some("a1"));
        assert_eq!(square_to_algebraic(63).as_deref(), Some("h8"));
        assert_eq!(square_to_algebraic(64), None);
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        assert!(matches!(algebraic_to_square("e"), Err(SquareParseError::WrongLength(_))));
        assert!(matches!(algebraic_to_square("i4"), Err(SquareParseError::BadFile(_))));
        assert!(matches!(algebraic_to_square("e9"), Err(SquareParseError::BadRank(_))));
        assert!(matches!(algebraic_to_square("e10"), Err(SquareParseError::WrongLength(_))));
    }
}
