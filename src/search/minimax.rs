//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Light maximizes and Dark minimizes the absolute score produced by a
//! [`BoardScorer`]. The tree is walked on a single scratch board with
//! [`ScratchMove`] guards instead of cloning the position at every node.
//! Promotions are only considered to a queen.

use tracing::debug;

use crate::chess_errors::EngineError;
use crate::game_state::chess_rules::DEFAULT_SEARCH_DEPTH;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::ScratchMove;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves_in_place, PromotionChoices,
};
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::threading::SearchControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root. Values below 1 are treated as 1.
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Absolute score of the principal line (positive favours Light).
    pub score: i32,
    pub nodes: u64,
}

/// Search with the material scorer and no external cancellation.
pub fn search_best_move(board: &Board, config: &SearchConfig) -> Result<SearchResult, EngineError> {
    search_best_move_with(board, config, &MaterialScorer, &SearchControl::default())
}

/// Pick the best move for the side to move.
///
/// Ties keep the first move in generation order, so results are
/// deterministic for a given position.
pub fn search_best_move_with<S: BoardScorer + ?Sized>(
    board: &Board,
    config: &SearchConfig,
    scorer: &S,
    control: &SearchControl,
) -> Result<SearchResult, EngineError> {
    let depth = config.depth.max(1);
    let mut scratch = board.scratch_copy();
    let side = scratch.active_side;
    let maximizing = side == Side::Light;

    let mut moves = generate_legal_moves_in_place(&mut scratch, side, PromotionChoices::QueenOnly);
    if moves.is_empty() {
        return Err(EngineError::NoLegalMoves(side));
    }
    order_moves(&scratch, &mut moves);

    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(Move, i32)> = None;
    let mut nodes = 1u64;

    for mv in moves {
        let value = {
            let mut child = ScratchMove::apply(&mut scratch, mv)?;
            child.switch_active_side();
            alphabeta(&mut child, depth - 1, alpha, beta, scorer, control, &mut nodes)?
        };

        let improves = match best {
            None => true,
            Some((_, best_value)) if maximizing => value > best_value,
            Some((_, best_value)) => value < best_value,
        };
        if improves {
            best = Some((mv, value));
        }
        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
    }

    control.add_nodes(nodes);
    let (best_move, score) = best.ok_or(EngineError::NoLegalMoves(side))?;
    debug!(%side, depth, best = %best_move, score, nodes, "search finished");
    Ok(SearchResult {
        best_move,
        score,
        nodes,
    })
}

fn alphabeta<S: BoardScorer + ?Sized>(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    scorer: &S,
    control: &SearchControl,
    nodes: &mut u64,
) -> Result<i32, EngineError> {
    *nodes += 1;
    if control.should_stop() {
        return Err(EngineError::Cancelled);
    }

    if depth == 0 {
        return Ok(scorer.score(board));
    }

    // Checkmate and stalemate are both leaves scored by material alone.
    let side = board.active_side;
    let mut moves = generate_legal_moves_in_place(board, side, PromotionChoices::QueenOnly);
    if moves.is_empty() {
        return Ok(scorer.score(board));
    }
    order_moves(board, &mut moves);

    if side == Side::Light {
        let mut best = i32::MIN;
        for mv in moves {
            let mut child = ScratchMove::apply(board, mv)?;
            child.switch_active_side();
            let value = alphabeta(&mut child, depth - 1, alpha, beta, scorer, control, nodes)?;
            best = best.max(value);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let mut child = ScratchMove::apply(board, mv)?;
            child.switch_active_side();
            let value = alphabeta(&mut child, depth - 1, alpha, beta, scorer, control, nodes)?;
            best = best.min(value);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    }
}

// Captures of valuable pieces first; a stable sort keeps generation order
// among equals.
fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|mv| {
        let victim = board
            .piece(mv.to)
            .map_or(0, |p| MaterialScorer::piece_value(p.kind));
        let promotion = mv.promotion.map_or(0, MaterialScorer::piece_value);
        -(victim + promotion)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn checkmated_leaf_scores_material() {
        // Rd8 mates, but the mated leaf is worth only the material on board.
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        let result = search_best_move(&board, &SearchConfig { depth: 2 }).expect("search runs");
        assert_eq!(result.score, 200);

        let mated = {
            let mut scratch = board.scratch_copy();
            let mut child = ScratchMove::apply(&mut scratch, Move::new(sq("d1"), sq("d8")))
                .expect("Rd8 applies");
            child.switch_active_side();
            let mut nodes = 0;
            alphabeta(
                &mut child,
                3,
                i32::MIN,
                i32::MAX,
                &MaterialScorer,
                &SearchControl::default(),
                &mut nodes,
            )
            .expect("search runs")
        };
        assert_eq!(mated, 200);
    }

    #[test]
    fn prefers_a_free_queen_to_a_mate_that_wins_nothing() {
        // Rd8# leaves the material at -700; Rxa1 wins the queen.
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/q2R2K1 w - - 0 1").expect("FEN should parse");
        let result = search_best_move(&board, &SearchConfig { depth: 2 }).expect("search runs");
        assert_eq!(result.best_move, Move::new(sq("d1"), sq("a1")));
        assert_eq!(result.score, 200);
    }

    #[test]
    fn grabs_a_hanging_queen() {
        let board = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let result = search_best_move(&board, &SearchConfig { depth: 2 }).expect("search runs");
        assert_eq!(result.best_move, Move::new(sq("d2"), sq("d5")));
    }

    #[test]
    fn avoids_a_defended_pawn_with_the_queen() {
        // Qxd5 loses the queen to the e6 pawn.
        let board = Board::from_fen("4k3/8/4p3/3p4/8/8/3Q4/4K3 w - - 0 1").expect("FEN should parse");
        let result = search_best_move(&board, &SearchConfig { depth: 2 }).expect("search runs");
        assert_ne!(result.best_move, Move::new(sq("d2"), sq("d5")));
    }

    #[test]
    fn promotes_to_a_queen() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let result = search_best_move(&board, &SearchConfig { depth: 1 }).expect("search runs");
        assert_eq!(
            result.best_move,
            Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Queen)
        );
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let before = board.get_fen();
        let result = search_best_move(&board, &SearchConfig { depth: 2 }).expect("search runs");
        assert_eq!(board.get_fen(), before);
        assert!(result.nodes > 1);
    }

    #[test]
    fn no_legal_moves_is_an_error() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(
            search_best_move(&board, &SearchConfig::default()),
            Err(EngineError::NoLegalMoves(Side::Dark))
        );
    }

    #[test]
    fn stopped_control_cancels_the_search() {
        let control = SearchControl::default();
        control.request_stop();
        let result = search_best_move_with(
            &Board::new_game(),
            &SearchConfig::default(),
            &MaterialScorer,
            &control,
        );
        assert_eq!(result, Err(EngineError::Cancelled));
    }
}
