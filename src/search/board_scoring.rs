//! Pluggable board evaluation interfaces and the baseline material scorer.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.

use crate::game_state::chess_types::*;

pub trait BoardScorer: Send + Sync {
    /// Absolute score: positive favours Light, negative favours Dark.
    fn score(&self, board: &Board) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    /// Kings carry no material value.
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        Square::all()
            .filter_map(|sq| board.piece(sq))
            .map(|piece| match piece.side {
                Side::Light => Self::piece_value(piece.kind),
                Side::Dark => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}
