//! FEN-to-Board parser.
//!
//! Builds a fully-populated board from a Forsyth-Edwards Notation string,
//! including the grid, castling flags, en passant target and clocks.

use crate::chess_errors::FenError;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = Board::empty();

    parse_board(board_part, &mut board)?;
    board.active_side = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_target = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    board.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    for side in [Side::Light, Side::Dark] {
        if board.find_all(PieceKind::King, side).len() != 1 {
            return Err(FenError::KingCount(side));
        }
    }

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    // FEN lists rank 8 first, which is grid row 0.
    for (y, rank_str) in ranks.iter().enumerate() {
        let rank = 8 - y;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::RankWidth { rank });
                }
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_symbol(ch).ok_or(FenError::InvalidPiece(ch))?;
            if file >= 8 {
                return Err(FenError::RankWidth { rank });
            }

            board.set_piece(Square::new(file as u8, y as u8), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Side, FenError> {
    match side_part {
        "w" => Ok(Side::Light),
        "b" => Ok(Side::Dark),
        _ => Err(FenError::InvalidSide(side_part.to_owned())),
    }
}

/// A right missing from the field marks that wing's rook as moved.
fn parse_castling_rights(castling_part: &str) -> Result<[CastlingRights; 2], FenError> {
    let mut rights = [CastlingRights::none(); 2];
    for side in [Side::Light, Side::Dark] {
        rights[side.index()].king_moved = false;
    }

    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights[Side::Light.index()].right_rook_moved = false,
            'Q' => rights[Side::Light.index()].left_rook_moved = false,
            'k' => rights[Side::Dark.index()].right_rook_moved = false,
            'q' => rights[Side::Dark.index()].left_rook_moved = false,
            _ => return Err(FenError::InvalidCastling(castling_part.to_owned())),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| FenError::InvalidSquare(en_passant_part.to_owned()))?;
    // The skipped square always sits on rank 3 or rank 6.
    if square.y != 2 && square.y != 5 {
        return Err(FenError::InvalidSquare(en_passant_part.to_owned()));
    }
    Ok(Some(square))
}

fn parse_counter(field: &'static str, value: &str) -> Result<u16, FenError> {
    value.parse::<u16>().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}
