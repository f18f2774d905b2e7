//! Standard Algebraic Notation output.
//!
//! `san_body` must be computed on the position *before* the move so that
//! disambiguation and capture markers see the pre-move occupants.

use crate::chess_errors::MoveError;
use crate::game_state::chess_rules::{KING_SIDE_CASTLING_TOKENS, QUEEN_SIDE_CASTLING_TOKENS};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::ScratchMove;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves};
use crate::move_generation::legal_move_shared::is_promotion_move;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::is_en_passant_capture;

/// Suffix appended to a SAN body after the move is played.
#[inline]
pub fn check_suffix(gives_check: bool, gives_checkmate: bool) -> &'static str {
    if gives_checkmate {
        "#"
    } else if gives_check {
        "+"
    } else {
        ""
    }
}

/// SAN for `mv` without the check suffix.
pub fn san_body(board: &Board, mv: Move) -> Result<String, MoveError> {
    let piece = board
        .piece(mv.from)
        .ok_or_else(|| MoveError::IllegalMove(format!("no piece on {}", mv.from)))?;

    if piece.kind == PieceKind::King && mv.from.y == mv.to.y && mv.from.x.abs_diff(mv.to.x) == 2 {
        let token = if mv.to.x > mv.from.x {
            KING_SIDE_CASTLING_TOKENS[0]
        } else {
            QUEEN_SIDE_CASTLING_TOKENS[0]
        };
        return Ok(token.to_owned());
    }

    let mut out = String::with_capacity(8);

    if piece.kind == PieceKind::Pawn {
        let en_passant = board.is_empty(mv.to)
            && is_en_passant_capture(board, mv.from, mv.to, piece.side);
        if mv.from.x != mv.to.x {
            out.push(mv.from.file_char());
            out.push('x');
        }
        out.push_str(&mv.to.to_string());
        if en_passant {
            out.push_str("ep");
        }
        if is_promotion_move(board, mv.from, mv.to) {
            out.push('=');
            out.push(mv.promotion.unwrap_or(PieceKind::Queen).letter());
        }
        return Ok(out);
    }

    out.push(piece.kind.letter());
    out.push_str(&disambiguation(board, mv, piece));
    if board.piece(mv.to).is_some() {
        out.push('x');
    }
    out.push_str(&mv.to.to_string());
    Ok(out)
}

/// File, rank or both, whichever is the shortest that singles out the mover
/// among same-kind pieces that can also legally reach the destination.
fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Square> = board
        .find_all(piece.kind, piece.side)
        .into_iter()
        .filter(|sq| *sq != mv.from && legal_moves(board, *sq).contains(&mv.to))
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.x != mv.from.x) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.y != mv.from.y) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

/// Full SAN for `mv` including `+` or `#`. The board is left untouched.
pub fn move_to_san(board: &Board, mv: Move) -> Result<String, MoveError> {
    let mut san = san_body(board, mv)?;
    let mover = board
        .piece(mv.from)
        .map(|p| p.side)
        .ok_or_else(|| MoveError::IllegalMove(format!("no piece on {}", mv.from)))?;
    let opponent = mover.opposite();

    let mut scratch = board.scratch_copy();
    let played = ScratchMove::apply(&mut scratch, mv)?;
    let gives_check = is_check(&played, opponent);
    let gives_checkmate = gives_check && !has_any_legal_move(&played, opponent);
    drop(played);

    san.push_str(check_suffix(gives_check, gives_checkmate));
    Ok(san)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn pawn_and_piece_moves_from_start() {
        let board = Board::new_game();
        assert_eq!(move_to_san(&board, Move::new(sq("e2"), sq("e4"))).as_deref(), Ok("e4"));
        assert_eq!(move_to_san(&board, Move::new(sq("g1"), sq("f3"))).as_deref(), Ok("Nf3"));
    }

    #[test]
    fn file_then_rank_disambiguation() {
        let by_file = Board::from_fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(san_body(&by_file, Move::new(sq("b1"), sq("d2"))).as_deref(), Ok("Nbd2"));
        assert_eq!(san_body(&by_file, Move::new(sq("f3"), sq("d2"))).as_deref(), Ok("Nfd2"));

        let by_rank = Board::from_fen("4k3/8/8/8/8/1N6/8/1N2K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(san_body(&by_rank, Move::new(sq("b1"), sq("d2"))).as_deref(), Ok("N1d2"));
        assert_eq!(san_body(&by_rank, Move::new(sq("b3"), sq("d2"))).as_deref(), Ok("N3d2"));
    }

    #[test]
    fn pinned_rival_does_not_force_disambiguation() {
        // The e2 knight also eyes c3 but is pinned by the e8 rook.
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/1N2K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(san_body(&board, Move::new(sq("b1"), sq("c3"))).as_deref(), Ok("Nc3"));
    }

    #[test]
    fn captures_promotions_and_checks() {
        let board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = Move::with_promotion(sq("a7"), sq("b8"), PieceKind::Queen);
        assert_eq!(move_to_san(&board, mv).as_deref(), Ok("axb8=Q+"));

        let rook_capture = Board::from_fen("4k2r/8/8/8/8/8/8/4K2R w - - 0 1").expect("FEN should parse");
        assert_eq!(
            move_to_san(&rook_capture, Move::new(sq("h1"), sq("h8"))).as_deref(),
            Ok("Rxh8+")
        );
    }

    #[test]
    fn checkmate_gets_hash_suffix() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        assert_eq!(move_to_san(&board, Move::new(sq("d1"), sq("d8"))).as_deref(), Ok("Rd8#"));
    }

    #[test]
    fn castling_tokens() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        assert_eq!(san_body(&board, Move::new(sq("e1"), sq("g1"))).as_deref(), Ok("O-O"));
        assert_eq!(san_body(&board, Move::new(sq("e1"), sq("c1"))).as_deref(), Ok("O-O-O"));
    }
}
