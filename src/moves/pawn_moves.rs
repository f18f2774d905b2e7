//! Pawn pushes, captures and en passant.
//!
//! Light pawns move toward row 0 (rank 8), Dark pawns toward row 7 (rank 1).
//! Promotion is not decided here: a push or capture onto the last rank is an
//! ordinary target square and the commit pipeline asks for the piece.

use crate::game_state::chess_types::*;

pub fn generate_pawn_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    let dir = side.pawn_direction();

    if let Some(one_step) = from.offset(0, dir) {
        if board.is_empty(one_step) {
            out.push(one_step);

            if from.y == side.pawn_start_rank() {
                if let Some(two_step) = from.offset(0, 2 * dir) {
                    if board.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for target in pawn_attack_squares(from, side) {
        match board.piece(target) {
            Some(occupant) if occupant.side != side => out.push(target),
            None if is_en_passant_capture(board, from, target, side) => out.push(target),
            _ => {}
        }
    }
}

/// The two diagonal squares a pawn on `from` attacks (fewer on the edge).
pub fn pawn_attack_squares(from: Square, side: Side) -> impl Iterator<Item = Square> {
    let dir = side.pawn_direction();
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |dx| from.offset(dx, dir))
}

/// True when a pawn of `side` on `from` moving diagonally to the empty
/// `target` captures en passant: `target` is the recorded en passant square
/// and an enemy pawn sits beside `from` on the target's file.
pub fn is_en_passant_capture(board: &Board, from: Square, target: Square, side: Side) -> bool {
    if board.en_passant_target != Some(target) || from.x == target.x {
        return false;
    }
    if from.offset(0, side.pawn_direction()).map(|s| s.y) != Some(target.y) {
        return false;
    }
    board.piece(Square::new(target.x, from.y)) == Some(Piece::new(PieceKind::Pawn, side.opposite()))
}
