//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the text front end, tests and
//! diagnostics. Rank 8 is printed first, matching grid row 0.

use crate::game_state::chess_types::*;

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for y in 0..8u8 {
        let rank = char::from(b'8' - y);
        out.push(rank);
        out.push(' ');

        for x in 0..8u8 {
            match board.piece(Square::new(x, y)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if x < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.side, piece.kind) {
        (Side::Light, PieceKind::Pawn) => '♙',
        (Side::Light, PieceKind::Knight) => '♘',
        (Side::Light, PieceKind::Bishop) => '♗',
        (Side::Light, PieceKind::Rook) => '♖',
        (Side::Light, PieceKind::Queen) => '♕',
        (Side::Light, PieceKind::King) => '♔',
        (Side::Dark, PieceKind::Pawn) => '♟',
        (Side::Dark, PieceKind::Knight) => '♞',
        (Side::Dark, PieceKind::Bishop) => '♝',
        (Side::Dark, PieceKind::Rook) => '♜',
        (Side::Dark, PieceKind::Queen) => '♛',
        (Side::Dark, PieceKind::King) => '♚',
    }
}
