use std::panic;
use std::thread;

use crate::chess_errors::MoveError;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::ScratchMove;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves_in_place, has_any_legal_move, PromotionChoices,
};
use crate::moves::move_descriptions::{Move, SpecialMove};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf positions `depth` plies below `board` with every promotion
/// piece expanded. The board is probed on a scratch copy.
pub fn perft(board: &Board, depth: u8) -> Result<PerftCounts, MoveError> {
    let mut scratch = board.scratch_copy();
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }
    perft_recurse(&mut scratch, depth, &mut total)?;
    Ok(total)
}

/// Same as [`perft`] but splits the root moves across worker threads.
///
/// A panic in a worker is re-raised on the calling thread.
pub fn perft_multi_threaded(board: &Board, depth: u8) -> Result<PerftCounts, MoveError> {
    if depth <= 1 {
        return perft(board, depth);
    }

    let mut root = board.scratch_copy();
    let side = root.active_side;
    let root_moves = generate_legal_moves_in_place(&mut root, side, PromotionChoices::All);

    let mut handles = Vec::with_capacity(root_moves.len());
    for mv in root_moves {
        let mut local_board = root.scratch_copy();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = descend(&mut local_board, mv, depth, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = match handle.join() {
            Ok(joined) => joined,
            Err(payload) => panic::resume_unwind(payload),
        };
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) -> Result<(), MoveError> {
    let side = board.active_side;
    for mv in generate_legal_moves_in_place(board, side, PromotionChoices::All) {
        descend(board, mv, depth, counts)?;
    }
    Ok(())
}

// Plays `mv` (the first of `depth` remaining plies) and either tallies the
// leaf or keeps recursing.
fn descend(board: &mut Board, mv: Move, depth: u8, counts: &mut PerftCounts) -> Result<(), MoveError> {
    let mover = board.active_side;
    let mut scratch = ScratchMove::apply(board, mv)?;
    scratch.switch_active_side();

    if depth > 1 {
        return perft_recurse(&mut scratch, depth - 1, counts);
    }

    counts.nodes += 1;
    if let Some(undo) = scratch.undo_state() {
        if undo.captured.is_some() {
            counts.captures += 1;
        }
        match undo.special {
            Some(SpecialMove::EnPassant { .. }) => counts.en_passant += 1,
            Some(SpecialMove::Castling { .. }) => counts.castles += 1,
            Some(SpecialMove::Promotion { .. }) => counts.promotions += 1,
            None => {}
        }
    }

    let opponent = mover.opposite();
    if is_check(&scratch, opponent) {
        counts.checks += 1;
        if !has_any_legal_move(&scratch, opponent) {
            counts.checkmates += 1;
        }
    }

    Ok(())
}
