//! Attack detection and check / checkmate / stalemate predicates.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::has_any_legal_move;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::rook_moves::{first_piece_along, ROOK_DIRECTIONS};

/// True if any piece of `attacker` attacks `square`.
///
/// Pawns attack their two forward diagonals whether or not the square is
/// occupied, so empty castling transit squares are covered too.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Side) -> bool {
    let enemy = |kind| Some(Piece::new(kind, attacker));

    // A pawn attacking `square` sits one step behind it from the attacker's view.
    let behind = -attacker.pawn_direction();
    for dx in [-1i8, 1i8] {
        if let Some(sq) = square.offset(dx, behind) {
            if board.piece(sq) == enemy(PieceKind::Pawn) {
                return true;
            }
        }
    }

    for &(dx, dy) in &KNIGHT_OFFSETS {
        if let Some(sq) = square.offset(dx, dy) {
            if board.piece(sq) == enemy(PieceKind::Knight) {
                return true;
            }
        }
    }

    for &(dx, dy) in &KING_OFFSETS {
        if let Some(sq) = square.offset(dx, dy) {
            if board.piece(sq) == enemy(PieceKind::King) {
                return true;
            }
        }
    }

    for &direction in &ROOK_DIRECTIONS {
        if let Some((_, piece)) = first_piece_along(board, square, direction) {
            if piece.side == attacker && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen) {
                return true;
            }
        }
    }

    for &direction in &BISHOP_DIRECTIONS {
        if let Some((_, piece)) = first_piece_along(board, square, direction) {
            if piece.side == attacker && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen) {
                return true;
            }
        }
    }

    false
}

/// True if `side`'s king is attacked.
#[inline]
pub fn is_check(board: &Board, side: Side) -> bool {
    is_square_attacked(board, board.king_position(side), side.opposite())
}

/// `side` is in check and none of its pieces has a legal move.
pub fn is_checkmate(board: &Board, side: Side) -> bool {
    is_check(board, side) && !has_any_legal_move(board, side)
}

/// `side` is not in check but has no legal move.
pub fn is_stalemate(board: &Board, side: Side) -> bool {
    !is_check(board, side) && !has_any_legal_move(board, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_attack_map() {
        let board = Board::new_game();
        // e3 is covered by the d2/f2 pawns.
        assert!(is_square_attacked(&board, Square::new(4, 5), Side::Light));
        // f3 by the g1 knight.
        assert!(is_square_attacked(&board, Square::new(5, 5), Side::Light));
        assert!(!is_square_attacked(&board, Square::new(4, 4), Side::Light));
        assert!(is_square_attacked(&board, Square::new(4, 2), Side::Dark));
        assert!(!is_check(&board, Side::Light));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert!(is_check(&board, Side::Light));
        assert!(is_checkmate(&board, Side::Light));
        assert!(!is_checkmate(&board, Side::Dark));
    }

    #[test]
    fn check_with_an_escape_is_not_checkmate() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_check(&board, Side::Light));
        assert!(!is_checkmate(&board, Side::Light));
    }

    #[test]
    fn back_rank_mate_with_zero_legal_moves() {
        let board = Board::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(is_checkmate(&board, Side::Dark));
    }

    #[test]
    fn cornered_king_without_check_is_stalemate() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(!is_check(&board, Side::Dark));
        assert!(is_stalemate(&board, Side::Dark));
        assert!(!is_checkmate(&board, Side::Dark));
    }

    #[test]
    fn sliding_attack_is_blocked_by_any_piece() {
        let mut board = Board::empty();
        board.set_piece(Square::new(0, 0), Some(Piece::new(PieceKind::Rook, Side::Dark)));
        board.set_piece(Square::new(0, 3), Some(Piece::new(PieceKind::Knight, Side::Dark)));
        assert!(is_square_attacked(&board, Square::new(0, 2), Side::Dark));
        assert!(!is_square_attacked(&board, Square::new(0, 5), Side::Dark));
    }
}
