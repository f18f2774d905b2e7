//! Replay of recorded SAN move lists.
//!
//! History entries carry `+`, `#` and `ep` decorations; the parser ignores
//! them, so a history written by the engine can be fed straight back in.

use crate::chess_errors::PlaybackError;
use crate::game_state::chess_types::Board;
use crate::move_generation::legal_move_apply::{apply_move, end_turn};
use crate::notation::san_parser::parse_move;

/// Replay `history` from the standard starting position.
pub fn replay_history<S: AsRef<str>>(history: &[S]) -> Result<Board, PlaybackError> {
    let mut board = Board::new_game();
    for (ply, san) in history.iter().enumerate() {
        play_one(&mut board, ply, san.as_ref())?;
    }
    Ok(board)
}

/// Every position of the replay, starting with the initial one, for
/// stepping back and forth through a game.
pub fn replay_positions<S: AsRef<str>>(history: &[S]) -> Result<Vec<Board>, PlaybackError> {
    let mut board = Board::new_game();
    let mut positions = Vec::with_capacity(history.len() + 1);
    positions.push(board.clone());
    for (ply, san) in history.iter().enumerate() {
        play_one(&mut board, ply, san.as_ref())?;
        positions.push(board.clone());
    }
    Ok(positions)
}

fn play_one(board: &mut Board, ply: usize, san: &str) -> Result<(), PlaybackError> {
    let wrap = |source| PlaybackError {
        ply,
        san: san.to_owned(),
        source,
    };
    let mv = parse_move(board, san).map_err(wrap)?;
    apply_move(board, mv).map_err(wrap)?;
    end_turn(board).map_err(wrap)?;
    Ok(())
}
