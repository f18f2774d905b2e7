//! Piece-kind dispatch shared by the legality filter, perft and search.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::generate_bishop_moves;
use crate::moves::king_moves::generate_king_moves;
use crate::moves::knight_moves::generate_knight_moves;
use crate::moves::pawn_moves::generate_pawn_moves;
use crate::moves::queen_moves::generate_queen_moves;
use crate::moves::rook_moves::generate_rook_moves;

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Promotion choices offered when expanding pawn moves to the last rank.
pub const PROMOTION_PIECE_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Pseudo-legal targets of the piece on `from`, ignoring check safety and
/// castling. Empty when the square is empty.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    pseudo_legal_moves_into(board, from, &mut out);
    out
}

pub fn pseudo_legal_moves_into(board: &Board, from: Square, out: &mut Vec<Square>) {
    let Some(piece) = board.piece(from) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece.side, out),
        PieceKind::Knight => generate_knight_moves(board, from, piece.side, out),
        PieceKind::Bishop => generate_bishop_moves(board, from, piece.side, out),
        PieceKind::Rook => generate_rook_moves(board, from, piece.side, out),
        PieceKind::Queen => generate_queen_moves(board, from, piece.side, out),
        PieceKind::King => generate_king_moves(board, from, piece.side, out),
    }
}

/// True when moving the piece on `from` to `to` is a pawn reaching its last
/// rank.
#[inline]
pub fn is_promotion_move(board: &Board, from: Square, to: Square) -> bool {
    matches!(
        board.piece(from),
        Some(Piece { kind: PieceKind::Pawn, side }) if to.y == side.promotion_rank()
    )
}
