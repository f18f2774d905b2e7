use crate::game_state::chess_types::*;

pub fn generate_fen(board: &Board) -> String {
    let layout = generate_board_field(board);
    let side_to_move = match board.active_side {
        Side::Light => "w",
        Side::Dark => "b",
    };
    let castling = generate_castling_field(board);
    let en_passant = board
        .en_passant_target
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        layout, side_to_move, castling, en_passant, board.halfmove_clock, board.fullmove_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for y in 0..8u8 {
        let mut empty_count = 0u8;

        for x in 0..8u8 {
            match board.piece(Square::new(x, y)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.symbol());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if y < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for side in [Side::Light, Side::Dark] {
        let rights = board.castling_rights(side);
        if rights.king_moved {
            continue;
        }
        let letters = match side {
            Side::Light => ['K', 'Q'],
            Side::Dark => ['k', 'q'],
        };
        if !rights.right_rook_moved {
            out.push(letters[0]);
        }
        if !rights.left_rook_moved {
            out.push(letters[1]);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(generate_fen(&parsed), STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, fen);
        assert_eq!(parsed.active_side, Side::Dark);
        assert!(parsed.castling_rights(Side::Light).right_rook_moved);
        assert!(parsed.castling_rights(Side::Light).left_rook_moved);
    }

    #[test]
    fn moved_king_drops_both_letters() {
        let mut board = Board::new_game();
        board.castling_rights_mut(Side::Dark).king_moved = true;
        assert!(generate_fen(&board).contains(" w KQ - "));
    }
}
