//! Game session: turn flow, bot dispatch and UI notifications.
//!
//! A `GameSession` owns the board and routes every move (typed SAN, grid
//! clicks, relayed codes and bot choices) through the same validated commit
//! pipeline. Presentation layers subscribe to [`GameEvent`]s over a channel.

use std::sync::mpsc::Sender;

use tracing::{debug, info, warn};

use crate::chess_errors::{EngineError, MoveError, TurnOrderViolation};
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{self, TurnOutcome};
use crate::moves::move_descriptions::{Move, MoveRecord};
use crate::notation::san_parser::parse_move;
use crate::notation::san_writer::move_to_san;
use crate::search::minimax::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Both sides are entered by people at the same board (or over a relay).
    #[default]
    TwoPlayer,
    /// The bot plays `bot_side`; moves submitted for that side are refused.
    VersusBot { bot_side: Side },
}

/// Which engine plays the bot side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotKind {
    #[default]
    Minimax,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub bot: BotKind,
    pub search: SearchConfig,
}

/// Notifications for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    MoveCommitted(MoveRecord),
    /// A pawn reached the last rank; answer with
    /// [`GameSession::choose_promotion`].
    PromotionChoiceNeeded { from: Square, to: Square },
    TurnEnded(TurnOutcome),
    GameOver(TurnOutcome),
}

pub struct GameSession {
    board: Board,
    config: SessionConfig,
    engine: Box<dyn Engine>,
    events: Option<Sender<GameEvent>>,
    outcome: Option<TurnOutcome>,
}

fn build_engine(config: &SessionConfig) -> Box<dyn Engine> {
    match config.bot {
        BotKind::Minimax => Box::new(MinimaxEngine::new(config.search)),
        BotKind::Random => Box::new(RandomEngine::new()),
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_board(Board::new_game(), config)
    }

    /// Session starting from an arbitrary position (for example a FEN setup).
    pub fn with_board(board: Board, config: SessionConfig) -> Self {
        Self::with_engine(board, config, build_engine(&config))
    }

    pub fn with_engine(board: Board, config: SessionConfig, engine: Box<dyn Engine>) -> Self {
        Self {
            board,
            config,
            engine,
            events: None,
            outcome: None,
        }
    }

    pub fn set_event_sender(&mut self, sender: Sender<GameEvent>) {
        self.events = Some(sender);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn outcome(&self) -> Option<TurnOutcome> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some_and(TurnOutcome::is_game_over)
    }

    /// Discard the current game and set up the standard position.
    pub fn restart(&mut self) {
        self.board = Board::new_game();
        self.outcome = None;
        self.engine.new_game();
        info!(mode = ?self.config.mode, "new game");
    }

    /// True when the side to move is played by the bot.
    pub fn is_bot_turn(&self) -> bool {
        matches!(self.config.mode, GameMode::VersusBot { bot_side } if bot_side == self.board.active_side)
    }

    /// Commit a typed SAN move for the human side to move.
    pub fn submit_san(&mut self, text: &str) -> Result<MoveRecord, MoveError> {
        self.guard_human_turn()?;
        let mv = parse_move(&self.board, text)?;
        self.commit(mv)
    }

    /// Commit a move picked on the grid (source and destination squares).
    pub fn submit_move(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        self.guard_human_turn()?;
        self.commit(mv)
    }

    /// Answer a [`GameEvent::PromotionChoiceNeeded`].
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<MoveRecord, MoveError> {
        self.guard_human_turn()?;
        let record = legal_move_apply::complete_promotion(&mut self.board, kind)?;
        self.emit(GameEvent::MoveCommitted(record.clone()));
        Ok(record)
    }

    /// Hand the move to the other side and report what they face.
    pub fn end_turn(&mut self) -> Result<TurnOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::TurnOrder(TurnOrderViolation::GameOver));
        }

        let outcome = legal_move_apply::end_turn(&mut self.board)?;
        self.outcome = Some(outcome);
        self.emit(GameEvent::TurnEnded(outcome));

        if outcome.is_game_over() {
            info!(?outcome, moves = self.board.move_history.len(), "game over");
            self.emit(GameEvent::GameOver(outcome));
        }
        Ok(outcome)
    }

    /// Let the bot play its whole turn if it is to move.
    ///
    /// Returns `Ok(None)` when it is not the bot's turn or the game is over.
    pub fn play_bot_turn(&mut self) -> Result<Option<MoveRecord>, EngineError> {
        if self.is_over() || !self.is_bot_turn() {
            return Ok(None);
        }

        let output = self.engine.choose_move(&self.board, &GoParams::default())?;
        for line in &output.info_lines {
            debug!(engine = self.engine.name(), "{line}");
        }
        let Some(mv) = output.best_move else {
            return Ok(None);
        };

        let record = self.apply_bot_move(mv)?;
        self.end_turn()?;
        Ok(Some(record))
    }

    /// Feed a move chosen by the bot (possibly computed on a worker thread)
    /// through the same notation and validation path a typed move takes.
    pub fn apply_bot_move(&mut self, mv: Move) -> Result<MoveRecord, EngineError> {
        if self.is_over() {
            return Err(MoveError::TurnOrder(TurnOrderViolation::GameOver).into());
        }

        let san = move_to_san(&self.board, mv)?;
        let result = parse_move(&self.board, &san).and_then(|parsed| self.commit(parsed));
        match result {
            Ok(record) => {
                debug!(side = %record.piece.side, san = %record.san, "bot moved");
                Ok(record)
            }
            Err(e) => {
                warn!(%mv, %san, error = %e, "bot move rejected");
                Err(e.into())
            }
        }
    }

    /// Grid code of the last committed move for a remote peer.
    pub fn last_move_code(&self) -> Option<String> {
        self.board.last_move.as_ref().map(MoveRecord::coordinate_code)
    }

    /// Apply a move received from a remote peer and end that peer's turn.
    pub fn apply_relay_code(&mut self, code: &str) -> Result<TurnOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::TurnOrder(TurnOrderViolation::GameOver));
        }
        let mv = Move::from_coordinate_code(code)?;
        self.commit(mv)?;
        self.end_turn()
    }

    fn guard_human_turn(&self) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::TurnOrder(TurnOrderViolation::GameOver));
        }
        if self.is_bot_turn() {
            return Err(MoveError::TurnOrder(TurnOrderViolation::NotYourTurn(
                self.board.active_side,
            )));
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) -> Result<MoveRecord, MoveError> {
        match legal_move_apply::apply_move(&mut self.board, mv) {
            Ok(record) => {
                self.emit(GameEvent::MoveCommitted(record.clone()));
                Ok(record)
            }
            Err(MoveError::PromotionRequired { from, to }) => {
                self.emit(GameEvent::PromotionChoiceNeeded { from, to });
                Err(MoveError::PromotionRequired { from, to })
            }
            Err(e) => Err(e),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        let Some(sender) = self.events.take() else {
            return;
        };
        if sender.send(event).is_ok() {
            self.events = Some(sender);
        } else {
            debug!("event receiver dropped; notifications disabled");
        }
    }
}
