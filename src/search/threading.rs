//! Background bot search.
//!
//! The bot searches on its own copy of the board in a worker thread and
//! reports back over a channel, so an interactive caller can keep polling
//! (or cancel) without blocking.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    mpsc, Arc,
};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::chess_errors::EngineError;
use crate::game_state::chess_types::Board;
use crate::search::board_scoring::BoardScorer;
use crate::search::minimax::{search_best_move_with, SearchConfig, SearchResult};

/// Shared cancellation and node accounting for a running search.
#[derive(Debug, Default)]
pub struct SearchControl {
    stop: AtomicBool,
    nodes_visited: AtomicU64,
}

impl SearchControl {
    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }
}

/// Handle to a bot search running in a worker thread.
pub struct BotHandle {
    receiver: mpsc::Receiver<Result<SearchResult, EngineError>>,
    control: Arc<SearchControl>,
    worker: Option<JoinHandle<()>>,
}

impl BotHandle {
    /// Non-blocking poll. `None` while the search is still running.
    pub fn try_result(&mut self) -> Option<Result<SearchResult, EngineError>> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.join_worker();
                Some(result)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.join_worker();
                Some(Err(EngineError::WorkerDisconnected))
            }
        }
    }

    /// Block until the search finishes.
    pub fn wait(mut self) -> Result<SearchResult, EngineError> {
        let result = self
            .receiver
            .recv()
            .unwrap_or(Err(EngineError::WorkerDisconnected));
        self.join_worker();
        result
    }

    /// Ask the worker to abandon the search. The handle then yields
    /// [`EngineError::Cancelled`].
    pub fn cancel(&self) {
        self.control.request_stop();
    }

    pub fn nodes_visited(&self) -> u64 {
        self.control.nodes_visited()
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("bot worker panicked");
            }
        }
    }
}

impl Drop for BotHandle {
    fn drop(&mut self) {
        // Do not leave a detached search running after the caller lost interest.
        self.control.request_stop();
    }
}

/// Start searching `board` in a worker thread.
pub fn spawn_bot_search(
    board: &Board,
    config: SearchConfig,
    scorer: Arc<dyn BoardScorer>,
) -> BotHandle {
    let position = board.scratch_copy();
    let control = Arc::new(SearchControl::default());
    let worker_control = Arc::clone(&control);
    let (sender, receiver) = mpsc::channel();

    let worker = thread::spawn(move || {
        let result = search_best_move_with(&position, &config, scorer.as_ref(), &worker_control);
        if sender.send(result).is_err() {
            debug!("bot result dropped; handle already gone");
        }
    });

    BotHandle {
        receiver,
        control,
        worker: Some(worker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;

    #[test]
    fn worker_returns_same_move_as_inline_search() {
        let board = Board::new_game();
        let config = SearchConfig { depth: 2 };
        let inline = crate::search::minimax::search_best_move(&board, &config).expect("search runs");
        let handle = spawn_bot_search(&board, config, Arc::new(MaterialScorer));
        let threaded = handle.wait().expect("worker replies");
        assert_eq!(threaded.best_move, inline.best_move);
        assert_eq!(threaded.score, inline.score);
    }

    #[test]
    fn polling_eventually_yields_a_result() {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        let mut handle = spawn_bot_search(&board, SearchConfig { depth: 2 }, Arc::new(MaterialScorer));
        let result = loop {
            if let Some(result) = handle.try_result() {
                break result;
            }
            thread::yield_now();
        };
        assert!(result.is_ok());
        assert!(handle.nodes_visited() > 0);
    }

    #[test]
    fn no_legal_moves_is_reported_through_the_channel() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let handle = spawn_bot_search(&board, SearchConfig::default(), Arc::new(MaterialScorer));
        assert!(matches!(handle.wait(), Err(EngineError::NoLegalMoves(_))));
    }
}
