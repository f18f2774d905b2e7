//! Minimax bot engine.

use std::sync::Arc;

use crate::chess_errors::EngineError;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::Board;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::minimax::{search_best_move_with, SearchConfig};
use crate::search::threading::SearchControl;

pub struct MinimaxEngine {
    config: SearchConfig,
    scorer: Arc<dyn BoardScorer>,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, Arc::new(MaterialScorer))
    }

    pub fn with_scorer(config: SearchConfig, scorer: Arc<dyn BoardScorer>) -> Self {
        Self { config, scorer }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Scorer shared with background searches started for this engine.
    #[inline]
    pub fn scorer(&self) -> Arc<dyn BoardScorer> {
        Arc::clone(&self.scorer)
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Slate Minimax"
    }

    fn choose_move(&mut self, board: &Board, params: &GoParams) -> Result<EngineOutput, EngineError> {
        let config = SearchConfig {
            depth: params.depth.unwrap_or(self.config.depth),
        };

        let mut out = EngineOutput::default();
        match search_best_move_with(board, &config, self.scorer.as_ref(), &SearchControl::default()) {
            Ok(result) => {
                out.best_move = Some(result.best_move);
                out.score = Some(result.score);
                out.info_lines.push(format!(
                    "depth {} score {} nodes {}",
                    config.depth, result.score, result.nodes
                ));
            }
            Err(EngineError::NoLegalMoves(_)) => {}
            Err(e) => return Err(e),
        }
        Ok(out)
    }
}
