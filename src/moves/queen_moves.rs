use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::generate_bishop_moves;
use crate::moves::rook_moves::generate_rook_moves;

/// Queen moves are the union of the rook and bishop rays.
pub fn generate_queen_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    generate_bishop_moves(board, from, side, out);
    generate_rook_moves(board, from, side, out);
}
