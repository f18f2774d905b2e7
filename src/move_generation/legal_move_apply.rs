//! Move execution: raw make/unmake mechanics, special-move resolution and the
//! validated commit pipeline used by every caller (human, relay or bot).

use tracing::debug;

use crate::chess_errors::{MoveError, TurnOrderViolation};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_checks::{is_check, is_checkmate, is_stalemate};
use crate::move_generation::legal_move_generator::{has_any_legal_move, is_legal_move};
use crate::move_generation::legal_move_shared::is_promotion_move;
use crate::moves::move_descriptions::{Move, MoveRecord, SpecialMove};
use crate::moves::pawn_moves::is_en_passant_capture;
use crate::notation::san_writer::{check_suffix, san_body};

/// What happened when the active side handed the turn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Play continues and the new side to move is not in check.
    Continue,
    /// The new side to move is in check but has a legal reply.
    Check { side: Side },
    /// The new side to move is checkmated; the game is over.
    Checkmate { winner: Side },
    /// The new side to move has no legal move and is not in check.
    Stalemate,
}

impl TurnOutcome {
    #[inline]
    pub fn is_game_over(self) -> bool {
        matches!(self, TurnOutcome::Checkmate { .. } | TurnOutcome::Stalemate)
    }
}

/// Decide which special move, if any, `mv` performs for `piece`.
pub fn classify_special_move(board: &Board, mv: Move, piece: Piece) -> Option<SpecialMove> {
    match piece.kind {
        PieceKind::King if mv.from.y == mv.to.y && mv.from.x.abs_diff(mv.to.x) == 2 => {
            let wing = if mv.to.x > mv.from.x {
                Wing::KingSide
            } else {
                Wing::QueenSide
            };
            Some(SpecialMove::Castling {
                rook_from: Square::new(wing.rook_file(), mv.from.y),
                rook_to: Square::new((mv.from.x + mv.to.x) / 2, mv.from.y),
            })
        }
        PieceKind::Pawn
            if board.is_empty(mv.to) && is_en_passant_capture(board, mv.from, mv.to, piece.side) =>
        {
            Some(SpecialMove::EnPassant {
                captured_square: Square::new(mv.to.x, mv.from.y),
            })
        }
        PieceKind::Pawn if mv.to.y == piece.side.promotion_rank() => Some(SpecialMove::Promotion {
            kind: mv.promotion.unwrap_or(PieceKind::Queen),
        }),
        _ => None,
    }
}

/// Execute `mv` without any legality checks and return what is needed to
/// take it back. The active side is left untouched; callers that simulate
/// play flip it themselves (the undo record restores it).
///
/// A promotion without a chosen piece promotes to a queen.
pub fn make_move(board: &mut Board, mv: Move) -> Result<UndoState, MoveError> {
    let moved_piece = board
        .piece(mv.from)
        .ok_or_else(|| MoveError::IllegalMove(format!("no piece on {}", mv.from)))?;
    let side = moved_piece.side;
    let special = classify_special_move(board, mv, moved_piece);

    let mut undo = UndoState {
        mv,
        moved_piece,
        captured: board.piece(mv.to).map(|p| (mv.to, p)),
        special,
        prev_active_side: board.active_side,
        prev_castling_rights: board.castling_rights,
        prev_en_passant_square: board.en_passant_target,
        prev_halfmove_clock: board.halfmove_clock,
        prev_fullmove_number: board.fullmove_number,
    };

    board.set_piece(mv.from, None);
    match special {
        Some(SpecialMove::EnPassant { captured_square }) => {
            undo.captured = board.piece(captured_square).map(|p| (captured_square, p));
            board.set_piece(captured_square, None);
        }
        Some(SpecialMove::Castling { rook_from, rook_to }) => {
            let rook = board.piece(rook_from);
            board.set_piece(rook_from, None);
            board.set_piece(rook_to, rook);
        }
        _ => {}
    }

    let placed = match special {
        Some(SpecialMove::Promotion { kind }) => Piece::new(kind, side),
        _ => moved_piece,
    };
    board.set_piece(mv.to, Some(placed));

    update_castling_rights(board, moved_piece, mv.from);
    if let Some((square, captured)) = undo.captured {
        // A rook taken on its corner can no longer castle either.
        update_castling_rights(board, captured, square);
    }

    board.en_passant_target =
        if moved_piece.kind == PieceKind::Pawn && mv.from.y.abs_diff(mv.to.y) == 2 {
            Some(Square::new(mv.from.x, (mv.from.y + mv.to.y) / 2))
        } else {
            None
        };

    if moved_piece.kind == PieceKind::Pawn || undo.captured.is_some() {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock = board.halfmove_clock.saturating_add(1);
    }
    if side == Side::Dark {
        board.fullmove_number = board.fullmove_number.saturating_add(1);
    }

    Ok(undo)
}

/// Reverse a [`make_move`], restoring every cell and flag it touched.
pub fn unmake_move(board: &mut Board, undo: UndoState) {
    let mv = undo.mv;

    if let Some(SpecialMove::Castling { rook_from, rook_to }) = undo.special {
        let rook = board.piece(rook_to);
        board.set_piece(rook_to, None);
        board.set_piece(rook_from, rook);
    }

    board.set_piece(mv.to, None);
    board.set_piece(mv.from, Some(undo.moved_piece));
    if let Some((square, piece)) = undo.captured {
        board.set_piece(square, Some(piece));
    }

    board.active_side = undo.prev_active_side;
    board.castling_rights = undo.prev_castling_rights;
    board.en_passant_target = undo.prev_en_passant_square;
    board.halfmove_clock = undo.prev_halfmove_clock;
    board.fullmove_number = undo.prev_fullmove_number;
}

// Flags only ever go from "unmoved" to "moved".
fn update_castling_rights(board: &mut Board, piece: Piece, from: Square) {
    let side = piece.side;
    match piece.kind {
        PieceKind::King => board.castling_rights_mut(side).king_moved = true,
        PieceKind::Rook if from.y == side.back_rank() => {
            if from.x == Wing::QueenSide.rook_file() {
                board.castling_rights_mut(side).left_rook_moved = true;
            } else if from.x == Wing::KingSide.rook_file() {
                board.castling_rights_mut(side).right_rook_moved = true;
            }
        }
        _ => {}
    }
}

/// Validate and commit `mv` for the active side.
///
/// On success the grid, castling flags, en passant target and history are
/// updated, the turn is marked as played and a [`MoveRecord`] is returned.
/// A pawn move onto the last rank without a promotion piece is parked in
/// `board.pending_promotion` and reported as
/// [`MoveError::PromotionRequired`]; the grid is left unchanged.
pub fn apply_move(board: &mut Board, mv: Move) -> Result<MoveRecord, MoveError> {
    if board.player_moved {
        return Err(MoveError::TurnOrder(TurnOrderViolation::AlreadyMoved));
    }

    let piece = board
        .piece(mv.from)
        .ok_or_else(|| MoveError::IllegalMove(format!("no piece on {}", mv.from)))?;
    if piece.side != board.active_side {
        return Err(MoveError::IllegalMove(format!(
            "the {} on {} belongs to {}",
            piece.kind, mv.from, piece.side
        )));
    }

    if !is_legal_move(board, mv.from, mv.to) {
        if piece.kind == PieceKind::King
            && mv.from.y == mv.to.y
            && mv.from.x.abs_diff(mv.to.x) == 2
        {
            let wing = if mv.to.x > mv.from.x {
                Wing::KingSide
            } else {
                Wing::QueenSide
            };
            return Err(MoveError::CastlingUnavailable {
                side: piece.side,
                wing,
            });
        }
        return Err(MoveError::IllegalMove(mv.to_string()));
    }

    match (is_promotion_move(board, mv.from, mv.to), mv.promotion) {
        (true, None) => {
            board.pending_promotion = Some(mv);
            return Err(MoveError::PromotionRequired {
                from: mv.from,
                to: mv.to,
            });
        }
        (false, Some(_)) => return Err(MoveError::PromotionNotAllowed { to: mv.to }),
        (true, Some(kind)) if !kind.is_promotion_target() => {
            return Err(MoveError::InvalidPromotionPiece(kind))
        }
        _ => {}
    }

    // Disambiguation and capture markers depend on the position before the move.
    let mut san = san_body(board, mv)?;
    let undo = make_move(board, mv)?;

    let opponent = piece.side.opposite();
    let gives_check = is_check(board, opponent);
    let gives_checkmate = gives_check && !has_any_legal_move(board, opponent);
    san.push_str(check_suffix(gives_check, gives_checkmate));

    board.castling_performed = match undo.special {
        Some(SpecialMove::Castling { rook_from, rook_to }) => Some((rook_from, rook_to)),
        _ => None,
    };
    board.en_passant_performed = match undo.special {
        Some(SpecialMove::EnPassant { captured_square }) => Some(captured_square),
        _ => None,
    };
    board.pending_promotion = None;
    board.player_moved = true;
    board.move_history.push(san.clone());

    let record = MoveRecord {
        mv,
        piece,
        captured: undo.captured.map(|(_, p)| p),
        special: undo.special,
        san,
        gives_check,
        gives_checkmate,
    };
    board.last_move = Some(record.clone());

    debug!(side = %piece.side, san = %record.san, "move committed");
    Ok(record)
}

/// Resupply the move parked by [`MoveError::PromotionRequired`] with the
/// chosen piece.
pub fn complete_promotion(board: &mut Board, kind: PieceKind) -> Result<MoveRecord, MoveError> {
    let pending = board.pending_promotion.ok_or(MoveError::NoPendingPromotion)?;
    apply_move(
        board,
        Move {
            promotion: Some(kind),
            ..pending
        },
    )
}

/// Finish the active side's turn: hand the move to the opponent and report
/// whether the opponent is in check, checkmated or stalemated.
pub fn end_turn(board: &mut Board) -> Result<TurnOutcome, MoveError> {
    if !board.player_moved {
        return Err(MoveError::TurnOrder(TurnOrderViolation::NoMoveMade));
    }

    board.player_moved = false;
    board.switch_active_side();

    let side = board.active_side;
    let outcome = if is_checkmate(board, side) {
        TurnOutcome::Checkmate {
            winner: side.opposite(),
        }
    } else if is_stalemate(board, side) {
        TurnOutcome::Stalemate
    } else if is_check(board, side) {
        TurnOutcome::Check { side }
    } else {
        TurnOutcome::Continue
    };

    debug!(to_move = %side, ?outcome, "turn ended");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::san_parser::parse_move;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("square should parse")
    }

    fn play(board: &mut Board, san: &str) -> MoveRecord {
        let mv = parse_move(board, san).unwrap_or_else(|e| panic!("{san} should parse: {e}"));
        let record = apply_move(board, mv).unwrap_or_else(|e| panic!("{san} should apply: {e}"));
        end_turn(board).expect("turn should end");
        record
    }

    fn assert_board_invariants(board: &Board) {
        for side in [Side::Light, Side::Dark] {
            assert_eq!(board.find_all(PieceKind::King, side).len(), 1);
        }
    }

    #[test]
    fn e4_moves_the_pawn_and_records_skipped_square() {
        let mut board = Board::new_game();
        let record = play(&mut board, "e4");
        assert_eq!(record.san, "e4");
        assert!(board.is_empty(sq("e2")));
        assert_eq!(
            board.piece(sq("e4")),
            Some(Piece::new(PieceKind::Pawn, Side::Light))
        );
        assert_eq!(board.en_passant_target, Some(sq("e3")));
        assert_eq!(board.move_history, vec!["e4".to_owned()]);
        assert_eq!(board.active_side, Side::Dark);
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let mut board = Board::new_game();
        for san in ["e4", "a6", "e5", "d5"] {
            play(&mut board, san);
        }
        assert_eq!(board.en_passant_target, Some(sq("d6")));

        let record = play(&mut board, "exd6");
        assert_eq!(
            record.special,
            Some(SpecialMove::EnPassant {
                captured_square: sq("d5")
            })
        );
        assert_eq!(record.captured, Some(Piece::new(PieceKind::Pawn, Side::Dark)));
        assert!(board.is_empty(sq("d5")));
        assert_eq!(
            board.piece(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Side::Light))
        );
        assert_eq!(board.en_passant_target, None);
        assert_eq!(record.san, "exd6ep");
        assert_board_invariants(&board);
    }

    #[test]
    fn en_passant_window_closes_after_one_ply() {
        let mut board = Board::new_game();
        for san in ["e4", "a6", "e5", "d5", "Nf3", "h6"] {
            play(&mut board, san);
        }
        assert_eq!(board.en_passant_target, None);
        let mv = Move::new(sq("e5"), sq("d6"));
        assert!(matches!(apply_move(&mut board, mv), Err(MoveError::IllegalMove(_))));
        assert!(parse_move(&board, "exd6").is_err());
    }

    #[test]
    fn castling_moves_rook_and_is_reported_once() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let record = play(&mut board, "O-O");
        assert_eq!(record.san, "O-O");
        assert_eq!(
            board.piece(sq("g1")),
            Some(Piece::new(PieceKind::King, Side::Light))
        );
        assert_eq!(
            board.piece(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Side::Light))
        );
        assert!(board.is_empty(sq("h1")));
        assert!(board.castling_rights(Side::Light).king_moved);
        assert!(board.castling_rights(Side::Light).right_rook_moved);

        assert_eq!(board.take_castling(), Some((sq("h1"), sq("f1"))));
        assert_eq!(board.take_castling(), None);
        assert_eq!(board.take_en_passant(), None);

        let record = play(&mut board, "O-O-O");
        assert_eq!(
            record.special,
            Some(SpecialMove::Castling {
                rook_from: sq("a8"),
                rook_to: sq("d8")
            })
        );
        assert_eq!(
            board.piece(sq("c8")),
            Some(Piece::new(PieceKind::King, Side::Dark))
        );
    }

    #[test]
    fn king_round_trip_loses_castling_permanently() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        for san in ["Kf1", "Kf8", "Ke1", "Ke8"] {
            play(&mut board, san);
        }
        let err = apply_move(&mut board, Move::new(sq("e1"), sq("g1"))).expect_err("castling is gone");
        assert_eq!(
            err,
            MoveError::CastlingUnavailable {
                side: Side::Light,
                wing: Wing::KingSide
            }
        );
    }

    #[test]
    fn rook_round_trip_loses_only_its_wing() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        for san in ["Rb1", "Rb8", "Ra1", "Ra8"] {
            play(&mut board, san);
        }
        assert!(board.castling_rights(Side::Light).left_rook_moved);
        assert!(!board.castling_rights(Side::Light).right_rook_moved);
        assert!(apply_move(&mut board, Move::new(sq("e1"), sq("c1"))).is_err());
        assert!(apply_move(&mut board, Move::new(sq("e1"), sq("g1"))).is_ok());
    }

    #[test]
    fn promotion_requires_a_piece_and_then_completes() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let before = board.get_fen();
        let err = apply_move(&mut board, Move::new(sq("a7"), sq("a8"))).expect_err("needs a piece");
        assert_eq!(
            err,
            MoveError::PromotionRequired {
                from: sq("a7"),
                to: sq("a8")
            }
        );
        assert_eq!(board.get_fen(), before);
        assert!(board.pending_promotion.is_some());

        let record = complete_promotion(&mut board, PieceKind::Queen).expect("promotion completes");
        assert_eq!(record.san, "a8=Q");
        assert_eq!(
            board.piece(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Side::Light))
        );
        assert_eq!(board.pending_promotion, None);
    }

    #[test]
    fn dark_promotion_gets_dark_piece() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").expect("FEN should parse");
        let mv = parse_move(&board, "a1=n").expect("lowercase promotion letter parses");
        let record = apply_move(&mut board, mv).expect("promotion applies");
        assert_eq!(
            board.piece(sq("a1")),
            Some(Piece::new(PieceKind::Knight, Side::Dark))
        );
        assert_eq!(record.coordinate_code(), "0607n");
    }

    #[test]
    fn promotion_piece_rejected_off_the_last_rank() {
        let mut board = Board::new_game();
        let mv = Move::with_promotion(sq("e2"), sq("e4"), PieceKind::Queen);
        assert_eq!(
            apply_move(&mut board, mv),
            Err(MoveError::PromotionNotAllowed { to: sq("e4") })
        );
    }

    #[test]
    fn promotion_to_king_is_rejected() {
        let mut board = Board::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = Move::with_promotion(sq("a7"), sq("a8"), PieceKind::King);
        assert_eq!(
            apply_move(&mut board, mv),
            Err(MoveError::InvalidPromotionPiece(PieceKind::King))
        );
    }

    #[test]
    fn turn_order_is_enforced() {
        let mut board = Board::new_game();
        assert_eq!(
            end_turn(&mut board),
            Err(MoveError::TurnOrder(TurnOrderViolation::NoMoveMade))
        );
        apply_move(&mut board, Move::new(sq("e2"), sq("e4"))).expect("e4 applies");
        assert_eq!(
            apply_move(&mut board, Move::new(sq("d2"), sq("d4"))),
            Err(MoveError::TurnOrder(TurnOrderViolation::AlreadyMoved))
        );
        end_turn(&mut board).expect("turn ends");
        assert!(matches!(
            apply_move(&mut board, Move::new(sq("d2"), sq("d4"))),
            Err(MoveError::IllegalMove(_))
        ));
    }

    #[test]
    fn checkmate_is_reported_by_end_turn_and_san() {
        let mut board = Board::new_game();
        for san in ["f3", "e5", "g4"] {
            play(&mut board, san);
        }
        let mv = parse_move(&board, "Qh4").expect("Qh4 parses");
        let record = apply_move(&mut board, mv).expect("Qh4 applies");
        assert!(record.gives_checkmate);
        assert_eq!(record.san, "Qh4#");
        assert_eq!(
            end_turn(&mut board),
            Ok(TurnOutcome::Checkmate {
                winner: Side::Dark
            })
        );
    }

    #[test]
    fn make_and_unmake_restore_position_for_every_legal_move() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut board = Board::from_fen(fen).expect("FEN should parse");
        let moves = crate::move_generation::legal_move_generator::all_legal_moves(
            &board,
            Side::Light,
            crate::move_generation::legal_move_generator::PromotionChoices::All,
        );
        for mv in moves {
            let undo = make_move(&mut board, mv).expect("legal move applies");
            assert_board_invariants(&board);
            unmake_move(&mut board, undo);
            assert_eq!(board.get_fen(), fen, "unmake of {mv} diverged");
        }
    }
}
