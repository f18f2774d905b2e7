use std::fmt;

use crate::chess_errors::MoveError;
use crate::game_state::chess_types::{Piece, PieceKind, Square};

/// A requested move. Produced by the SAN parser, the bot, or grid input, and
/// discarded once committed (only its SAN string survives in the history).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Parse the relay code written by [`MoveRecord::coordinate_code`]:
    /// four grid digits `x1 y1 x2 y2` and an optional promotion letter.
    pub fn from_coordinate_code(code: &str) -> Result<Self, MoveError> {
        let bad = || MoveError::ParseFormat(code.to_owned());
        let chars: Vec<char> = code.trim().chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(bad());
        }

        let mut digits = [0u8; 4];
        for (slot, ch) in digits.iter_mut().zip(&chars) {
            let value = ch.to_digit(10).filter(|d| *d < 8).ok_or_else(bad)?;
            *slot = value as u8;
        }

        let promotion = match chars.get(4) {
            Some(letter) => Some(PieceKind::from_letter(*letter).ok_or_else(bad)?),
            None => None,
        };

        Ok(Self {
            from: Square::new(digits[0], digits[1]),
            to: Square::new(digits[2], digits[3]),
            promotion,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Side effect of a committed move beyond relocating the moving piece.
/// At most one applies to any move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMove {
    Castling { rook_from: Square, rook_to: Square },
    EnPassant { captured_square: Square },
    Promotion { kind: PieceKind },
}

/// Outcome of committing a move, handed back to the caller so it can animate
/// secondary piece movement and report check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: Option<SpecialMove>,
    pub san: String,
    pub gives_check: bool,
    pub gives_checkmate: bool,
}

impl MoveRecord {
    /// Grid-digit encoding of the move (`"4644"` for e2-e4), with the
    /// promotion letter cased to the mover's side. Used to relay the last
    /// move to a remote peer.
    pub fn coordinate_code(&self) -> String {
        let mut out = format!(
            "{}{}{}{}",
            self.mv.from.x, self.mv.from.y, self.mv.to.x, self.mv.to.y
        );
        if let Some(SpecialMove::Promotion { kind }) = self.special {
            out.push(Piece::new(kind, self.piece.side).symbol());
        }
        out
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Side;

    #[test]
    fn coordinate_code_round_trips_through_parser() {
        let record = MoveRecord {
            mv: Move::with_promotion(Square::new(0, 1), Square::new(0, 0), PieceKind::Queen),
            piece: Piece::new(PieceKind::Pawn, Side::Light),
            captured: None,
            special: Some(SpecialMove::Promotion {
                kind: PieceKind::Queen,
            }),
            san: "a8=Q".to_owned(),
            gives_check: false,
            gives_checkmate: false,
        };

        let code = record.coordinate_code();
        assert_eq!(code, "0100Q");
        assert_eq!(
            Move::from_coordinate_code(&code).expect("relay code should parse"),
            record.mv
        );
    }

    #[test]
    fn coordinate_code_rejects_out_of_range_digits() {
        assert!(Move::from_coordinate_code("4648").is_err());
        assert!(Move::from_coordinate_code("46").is_err());
        assert!(Move::from_coordinate_code("4644x").is_err());
    }

    #[test]
    fn display_uses_long_algebraic_form() {
        let mv = Move::new(Square::new(4, 6), Square::new(4, 4));
        assert_eq!(mv.to_string(), "e2e4");
    }
}
