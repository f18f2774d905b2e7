//! Standard Algebraic Notation input.
//!
//! Accepts `[piece][file][rank][x]<square>[=promotion]` with optional `+`,
//! `#` or `ep` decorations, plus the castling tokens. The text is resolved
//! against the legal moves of the side to move.

use crate::chess_errors::MoveError;
use crate::game_state::chess_rules::{
    KING_SIDE_CASTLING_TOKENS, KING_START_FILE, QUEEN_SIDE_CASTLING_TOKENS,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{castling_moves, legal_moves};
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::is_en_passant_capture;
use crate::utils::algebraic::{file_to_x, rank_to_y};

/// Syntactic pieces of a SAN move before it is matched against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanParts {
    pub kind: PieceKind,
    pub from_file: Option<u8>,
    pub from_rank: Option<u8>,
    pub capture: bool,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Remove check, mate and en passant decorations.
pub fn strip_annotations(text: &str) -> &str {
    let text = text.trim().trim_end_matches(['+', '#', '!', '?']);
    text.strip_suffix("e.p.")
        .or_else(|| text.strip_suffix("ep"))
        .unwrap_or(text)
        .trim_end()
}

/// Split SAN text into its components. Castling tokens are not handled here.
pub fn split_san(text: &str) -> Result<SanParts, MoveError> {
    let bad = || MoveError::ParseFormat(text.to_owned());
    let mut chars: Vec<char> = strip_annotations(text).chars().collect();

    // Promotion suffix: a piece letter right after the destination rank,
    // optionally preceded by '='.
    let mut promotion = None;
    if let Some(&last) = chars.last() {
        if "qrbnQRBN".contains(last) && chars.len() >= 3 {
            let before = chars[chars.len() - 2];
            if before == '=' || before.is_ascii_digit() {
                promotion = PieceKind::from_letter(last);
                chars.pop();
            }
        }
    }
    if chars.last() == Some(&'=') {
        chars.pop();
    }

    if chars.len() < 2 {
        return Err(bad());
    }
    let rank = chars.pop().and_then(rank_to_y).ok_or_else(bad)?;
    let file = chars.pop().and_then(file_to_x).ok_or_else(bad)?;
    let to = Square::new(file, rank);

    let mut rest = chars.into_iter().peekable();
    let kind = match rest.peek() {
        Some(&c) if "RNBQK".contains(c) => {
            rest.next();
            PieceKind::from_letter(c).ok_or_else(bad)?
        }
        _ => PieceKind::Pawn,
    };
    let from_file = rest.next_if(|c| file_to_x(*c).is_some()).and_then(file_to_x);
    let from_rank = rest.next_if(|c| rank_to_y(*c).is_some()).and_then(rank_to_y);
    let capture = rest.next_if_eq(&'x').is_some();

    if rest.next().is_some() {
        return Err(bad());
    }

    Ok(SanParts {
        kind,
        from_file,
        from_rank,
        capture,
        to,
        promotion,
    })
}

/// Resolve SAN `text` into a move for the side to move.
///
/// Returns [`MoveError::AmbiguousMove`] when the file and rank hints still
/// leave several pieces, and [`MoveError::IllegalMove`] when none remain.
/// A promotion letter on anything but a pawn reaching the last rank is
/// [`MoveError::PromotionNotAllowed`].
/// A pawn reaching the last rank without a promotion letter still resolves;
/// the commit step reports that the promotion piece is missing.
pub fn parse_move(board: &Board, text: &str) -> Result<Move, MoveError> {
    let side = board.active_side;
    let stripped = strip_annotations(text);

    if let Some(wing) = castling_wing(stripped) {
        return parse_castling(board, side, wing);
    }

    let parts = split_san(text)?;

    if parts.capture && parts.kind == PieceKind::Pawn && parts.from_file.is_none() {
        return Err(MoveError::ParseFormat(text.to_owned()));
    }
    if parts.promotion.is_some()
        && (parts.kind != PieceKind::Pawn || parts.to.y != side.promotion_rank())
    {
        return Err(MoveError::PromotionNotAllowed { to: parts.to });
    }

    let target = board.piece(parts.to);
    if parts.capture {
        let ep = parts.kind == PieceKind::Pawn
            && target.is_none()
            && board.en_passant_target == Some(parts.to);
        if target.is_none() && !ep {
            return Err(MoveError::NoCaptureAvailable { to: parts.to });
        }
    }

    let candidates: Vec<Square> = board
        .find_all(parts.kind, side)
        .into_iter()
        .filter(|sq| parts.from_file.map_or(true, |x| sq.x == x))
        .filter(|sq| parts.from_rank.map_or(true, |y| sq.y == y))
        .filter(|sq| parts.kind != PieceKind::Pawn || pawn_shape_matches(board, *sq, &parts))
        .filter(|sq| legal_moves(board, *sq).contains(&parts.to))
        .collect();

    match candidates.as_slice() {
        [] => Err(MoveError::IllegalMove(text.trim().to_owned())),
        [from] => Ok(Move {
            from: *from,
            to: parts.to,
            promotion: parts.promotion,
        }),
        many => Err(MoveError::AmbiguousMove {
            text: text.trim().to_owned(),
            candidates: many.len(),
            to: parts.to,
        }),
    }
}

// Pawns only capture with an 'x' and only push without one.
fn pawn_shape_matches(board: &Board, from: Square, parts: &SanParts) -> bool {
    let diagonal = from.x != parts.to.x;
    if !parts.capture {
        return !diagonal;
    }
    diagonal
        && (board.piece(parts.to).is_some()
            || is_en_passant_capture(board, from, parts.to, board.active_side))
}

fn castling_wing(text: &str) -> Option<Wing> {
    if KING_SIDE_CASTLING_TOKENS.contains(&text) {
        Some(Wing::KingSide)
    } else if QUEEN_SIDE_CASTLING_TOKENS.contains(&text) {
        Some(Wing::QueenSide)
    } else {
        None
    }
}

fn parse_castling(board: &Board, side: Side, wing: Wing) -> Result<Move, MoveError> {
    let home = Square::new(KING_START_FILE, side.back_rank());
    let unavailable = || MoveError::CastlingUnavailable { side, wing };

    let destination = home.offset(2 * wing.king_step(), 0).ok_or_else(unavailable)?;
    if !castling_moves(board, home).contains(&destination) {
        return Err(unavailable());
    }
    Ok(Move::new(home, destination))
}
