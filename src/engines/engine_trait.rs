//! Engine abstraction layer used by game sessions and the self-play binary.
//!
//! Defines common input parameters and output payloads so different bot
//! strategies can be selected at runtime behind a single trait interface.

use crate::chess_errors::EngineError;
use crate::game_state::chess_types::Board;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured depth when set.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Choose a move for the side to move. `best_move` is `None` only when
    /// the side to move has no legal move.
    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError>;
}
