use crate::game_state::chess_types::*;
use crate::moves::rook_moves::slide_targets;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub fn generate_bishop_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    slide_targets(board, from, side, &BISHOP_DIRECTIONS, out);
}
