//! Narrow interface for front ends.
//!
//! Thin free functions over the board, notation and search modules so a UI
//! can drive a game without knowing the module layout.

use std::sync::Arc;

use crate::chess_errors::MoveError;
use crate::game_state::chess_types::*;
use crate::move_generation::{legal_move_apply, legal_move_checks, legal_move_generator};
use crate::moves::move_descriptions::{Move, MoveRecord};
use crate::notation::{san_parser, san_writer};
use crate::search::board_scoring::MaterialScorer;
use crate::search::minimax::SearchConfig;
use crate::search::threading::{spawn_bot_search, BotHandle};

pub use crate::move_generation::legal_move_apply::TurnOutcome;

#[inline]
pub fn new_game() -> Board {
    Board::new_game()
}

/// Legal destinations of the piece on `from` (empty for an empty square).
#[inline]
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    legal_move_generator::legal_moves(board, from)
}

#[inline]
pub fn apply_move(board: &mut Board, mv: Move) -> Result<MoveRecord, MoveError> {
    legal_move_apply::apply_move(board, mv)
}

#[inline]
pub fn complete_promotion(board: &mut Board, kind: PieceKind) -> Result<MoveRecord, MoveError> {
    legal_move_apply::complete_promotion(board, kind)
}

#[inline]
pub fn end_turn(board: &mut Board) -> Result<TurnOutcome, MoveError> {
    legal_move_apply::end_turn(board)
}

#[inline]
pub fn parse_move(board: &Board, text: &str) -> Result<Move, MoveError> {
    san_parser::parse_move(board, text)
}

#[inline]
pub fn to_san(board: &Board, mv: Move) -> Result<String, MoveError> {
    san_writer::move_to_san(board, mv)
}

#[inline]
pub fn is_check(board: &Board, side: Side) -> bool {
    legal_move_checks::is_check(board, side)
}

#[inline]
pub fn is_checkmate(board: &Board, side: Side) -> bool {
    legal_move_checks::is_checkmate(board, side)
}

/// Start a material-scored minimax search for the side to move on a worker
/// thread.
pub fn request_bot_move(board: &Board, depth: u8) -> BotHandle {
    spawn_bot_search(board, SearchConfig { depth }, Arc::new(MaterialScorer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_a_short_game() {
        let mut board = new_game();
        assert_eq!(legal_moves(&board, Square::new(6, 7)).len(), 2);

        let mv = parse_move(&board, "e4").expect("e4 parses");
        assert_eq!(to_san(&board, mv).as_deref(), Ok("e4"));
        apply_move(&mut board, mv).expect("e4 applies");
        assert_eq!(end_turn(&mut board), Ok(TurnOutcome::Continue));
        assert!(!is_check(&board, Side::Dark));
        assert!(!is_checkmate(&board, Side::Dark));

        let reply = request_bot_move(&board, 2).wait().expect("bot replies");
        let san = to_san(&board, reply.best_move).expect("bot move has SAN");
        let parsed = parse_move(&board, &san).expect("bot SAN parses");
        let record = apply_move(&mut board, parsed).expect("bot move applies");
        assert_eq!(record.piece.side, Side::Dark);
    }
}
