//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! self-play smoke tests, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::EngineError;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::Board;
use crate::move_generation::legal_move_generator::{all_legal_moves, PromotionChoices};

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move choices for tests and scripted self-play.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Slate Random"
    }

    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError> {
        let legal_moves = all_legal_moves(board, board.active_side, PromotionChoices::All);

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("random_engine ignores requested_depth {depth}"));
        }

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}
