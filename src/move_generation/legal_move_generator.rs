//! Full legal move generation pipeline.
//!
//! Produces pseudo-legal targets per piece, appends castling for kings,
//! simulates each candidate with a rollback guard and drops the ones that
//! leave the mover's own king attacked.

use crate::game_state::chess_rules::KING_START_FILE;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::ScratchMove;
use crate::move_generation::legal_move_checks::{is_check, is_square_attacked};
use crate::move_generation::legal_move_shared::{
    is_promotion_move, pseudo_legal_moves, PROMOTION_PIECE_KINDS,
};
use crate::moves::move_descriptions::Move;

/// How pawn moves onto the last rank are expanded into [`Move`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionChoices {
    /// One move per promotion square, always to a queen (the bot's rule).
    QueenOnly,
    /// One move per promotion piece (perft).
    All,
}

impl PromotionChoices {
    fn kinds(self) -> &'static [PieceKind] {
        match self {
            PromotionChoices::QueenOnly => &PROMOTION_PIECE_KINDS[..1],
            PromotionChoices::All => &PROMOTION_PIECE_KINDS,
        }
    }
}

/// Legal destinations of the piece on `from`, including castling for kings.
/// The board itself is never modified; probing happens on a scratch copy.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let mut scratch = board.scratch_copy();
    legal_moves_in_place(&mut scratch, from)
}

/// Same as [`legal_moves`] but probes directly on `board`; every probe is
/// rolled back before returning.
pub fn legal_moves_in_place(board: &mut Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece(from) else {
        return Vec::new();
    };

    let mut targets = pseudo_legal_moves(board, from);
    if piece.kind == PieceKind::King {
        targets.extend(castling_moves(board, from));
    }

    targets
        .into_iter()
        .filter(|to| leaves_king_safe(board, Move::new(from, *to), piece.side))
        .collect()
}

#[inline]
pub fn is_legal_move(board: &Board, from: Square, to: Square) -> bool {
    legal_moves(board, from).contains(&to)
}

fn leaves_king_safe(board: &mut Board, mv: Move, side: Side) -> bool {
    match ScratchMove::apply(board, mv) {
        Ok(scratch) => !is_check(&scratch, side),
        Err(_) => false,
    }
}

/// Two-square king moves available to the king on `king_square`.
///
/// Requires the king and the chosen rook to be unmoved, the rook to still
/// stand on its corner, every square between them to be empty, and the
/// king's start, transit and destination squares to be unattacked.
pub fn castling_moves(board: &Board, king_square: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(2);
    let Some(Piece {
        kind: PieceKind::King,
        side,
    }) = board.piece(king_square)
    else {
        return out;
    };

    let rights = board.castling_rights(side);
    let home = Square::new(KING_START_FILE, side.back_rank());
    if rights.king_moved || king_square != home {
        return out;
    }

    let enemy = side.opposite();
    for wing in [Wing::QueenSide, Wing::KingSide] {
        let rook_moved = match wing {
            Wing::KingSide => rights.right_rook_moved,
            Wing::QueenSide => rights.left_rook_moved,
        };
        if rook_moved {
            continue;
        }

        let rook_square = Square::new(wing.rook_file(), home.y);
        if board.piece(rook_square) != Some(Piece::new(PieceKind::Rook, side)) {
            continue;
        }

        let (low, high) = if rook_square.x < home.x {
            (rook_square.x, home.x)
        } else {
            (home.x, rook_square.x)
        };
        let path_clear = (low + 1..high).all(|x| board.is_empty(Square::new(x, home.y)));
        if !path_clear {
            continue;
        }

        let step = wing.king_step();
        let king_path = [0i8, step, 2 * step];
        let crosses_attack = king_path.iter().any(|dx| {
            home.offset(*dx, 0)
                .map_or(true, |sq| is_square_attacked(board, sq, enemy))
        });
        if crosses_attack {
            continue;
        }

        if let Some(destination) = home.offset(2 * step, 0) {
            out.push(destination);
        }
    }

    out
}

/// Every legal move for `side`, probing on `board` in place.
pub fn generate_legal_moves_in_place(
    board: &mut Board,
    side: Side,
    promotions: PromotionChoices,
) -> Vec<Move> {
    let mut out = Vec::with_capacity(48);
    for (from, _) in board.pieces_of(side) {
        for to in legal_moves_in_place(board, from) {
            if is_promotion_move(board, from, to) {
                for kind in promotions.kinds() {
                    out.push(Move::with_promotion(from, to, *kind));
                }
            } else {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}

/// Every legal move for `side` on a scratch copy of `board`.
pub fn all_legal_moves(board: &Board, side: Side, promotions: PromotionChoices) -> Vec<Move> {
    let mut scratch = board.scratch_copy();
    generate_legal_moves_in_place(&mut scratch, side, promotions)
}

/// True as soon as any piece of `side` has a legal move.
pub fn has_any_legal_move(board: &Board, side: Side) -> bool {
    let mut scratch = board.scratch_copy();
    board
        .pieces_of(side)
        .into_iter()
        .any(|(from, _)| !legal_moves_in_place(&mut scratch, from).is_empty())
}
