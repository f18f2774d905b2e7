use std::ops::{Deref, DerefMut};

use crate::chess_errors::MoveError;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::moves::move_descriptions::{Move, SpecialMove};

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured: Option<(Square, Piece)>,
    pub special: Option<SpecialMove>,

    pub prev_active_side: Side,
    pub prev_castling_rights: [CastlingRights; 2],
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}

/// A move applied to a borrowed board that is rolled back when the guard is
/// dropped, on every exit path including unwinding.
///
/// The guard derefs to the board so callers can inspect (or further mutate)
/// the position while the move is in effect.
pub struct ScratchMove<'a> {
    board: &'a mut Board,
    undo: Option<UndoState>,
}

impl<'a> ScratchMove<'a> {
    pub fn apply(board: &'a mut Board, mv: Move) -> Result<Self, MoveError> {
        let undo = make_move(board, mv)?;
        Ok(Self {
            board,
            undo: Some(undo),
        })
    }

    /// What the applied move did.
    pub fn undo_state(&self) -> Option<&UndoState> {
        self.undo.as_ref()
    }
}

impl Deref for ScratchMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScratchMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScratchMove<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            unmake_move(self.board, undo);
        }
    }
}
