//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and grid
//! squares, where row 0 is rank 8. Reused by the FEN, SAN and text UI code.

use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a grid square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(Square::new(file - b'a', b'8' - rank))
}

/// File letter to grid column.
#[inline]
pub fn file_to_x(file: char) -> Option<u8> {
    ('a'..='h').contains(&file).then(|| file as u8 - b'a')
}

/// Rank digit to grid row.
#[inline]
pub fn rank_to_y(rank: char) -> Option<u8> {
    ('1'..='8').contains(&rank).then(|| b'8' - rank as u8)
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
