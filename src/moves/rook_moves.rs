//! Rook rays and the shared ray caster used by every sliding piece.

use crate::game_state::chess_types::*;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Push every square reachable along `directions` from `from`. A ray stops
/// at the first occupied square, which is included only when it holds an
/// enemy piece.
pub fn slide_targets(
    board: &Board,
    from: Square,
    side: Side,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(dx, dy) in directions {
        let mut cursor = from.offset(dx, dy);
        while let Some(target) = cursor {
            match board.piece(target) {
                None => out.push(target),
                Some(blocker) => {
                    if blocker.side != side {
                        out.push(target);
                    }
                    break;
                }
            }
            cursor = target.offset(dx, dy);
        }
    }
}

/// First occupied square along one ray, if any.
pub fn first_piece_along(board: &Board, from: Square, direction: (i8, i8)) -> Option<(Square, Piece)> {
    let (dx, dy) = direction;
    let mut cursor = from.offset(dx, dy);
    while let Some(target) = cursor {
        if let Some(piece) = board.piece(target) {
            return Some((target, piece));
        }
        cursor = target.offset(dx, dy);
    }
    None
}

pub fn generate_rook_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    slide_targets(board, from, side, &ROOK_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_empty_board_reaches_fourteen_squares() {
        let board = Board::empty();
        let mut out = Vec::new();
        generate_rook_moves(&board, Square::new(3, 4), Side::Light, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn ray_includes_enemy_blocker_but_not_friendly_one() {
        let mut board = Board::empty();
        let rook = Square::new(0, 7);
        board.set_piece(Square::new(0, 4), Some(Piece::new(PieceKind::Pawn, Side::Dark)));
        board.set_piece(Square::new(2, 7), Some(Piece::new(PieceKind::Bishop, Side::Light)));

        let mut out = Vec::new();
        generate_rook_moves(&board, rook, Side::Light, &mut out);

        assert!(out.contains(&Square::new(0, 4)));
        assert!(!out.contains(&Square::new(0, 3)));
        assert!(out.contains(&Square::new(1, 7)));
        assert!(!out.contains(&Square::new(2, 7)));
        assert_eq!(out.len(), 4);
    }
}
