//! One-step king moves. Castling is produced by the legality filter because
//! it depends on attacked squares.

use crate::game_state::chess_types::*;
use crate::moves::knight_moves::leap_targets;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

pub fn generate_king_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    leap_targets(board, from, side, &KING_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_in_start_position_has_no_steps() {
        let mut out = Vec::new();
        generate_king_moves(&Board::new_game(), Square::new(4, 7), Side::Light, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn king_on_edge_has_five_steps() {
        let mut out = Vec::new();
        generate_king_moves(&Board::empty(), Square::new(0, 4), Side::Dark, &mut out);
        assert_eq!(out.len(), 5);
    }
}
