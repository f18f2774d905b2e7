//! Errors used throughout the chess engine.
//!
//! `MoveError` is the single caller-visible result type of the move pipeline
//! (parsing, legality, special moves and turn order). Every variant is
//! recoverable: the presentation layer decides whether to prompt the user,
//! resend, or abort. A missing king is not represented here because it is a
//! violated board invariant and panics instead.
//!
//! `FenError` covers position setup, `EngineError` bot failures and
//! `PlaybackError` replays of recorded games.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Side, Square, Wing};

/// Why a move was rejected by the turn-order rules of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnOrderViolation {
    /// The active side already committed a move and must end its turn first.
    #[error("a move was already made this turn; end the turn first")]
    AlreadyMoved,
    /// The turn cannot end because no move was committed.
    #[error("make a move before ending the turn")]
    NoMoveMade,
    /// The piece or request belongs to a side that is not allowed to act now
    /// (for example the human moving while the bot is to move).
    #[error("it is not {0}'s turn")]
    NotYourTurn(Side),
    /// The game already ended.
    #[error("the game is over")]
    GameOver,
}

/// Tagged result of a rejected move request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The text does not match the SAN grammar.
    #[error("could not parse move `{0}`")]
    ParseFormat(String),

    /// More than one piece can reach the destination.
    #[error("ambiguous move `{text}`: {candidates} pieces can reach {to}; add a file and/or rank")]
    AmbiguousMove {
        text: String,
        candidates: usize,
        to: Square,
    },

    /// No piece can legally make the requested move.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Capture notation on an empty square that is not an en passant target.
    #[error("nothing to capture on {to}")]
    NoCaptureAvailable { to: Square },

    /// A pawn reaches the last rank but no replacement piece was supplied.
    #[error("pawn move {from}{to} needs a promotion piece")]
    PromotionRequired { from: Square, to: Square },

    /// A promotion piece was supplied for a move that does not promote.
    #[error("no promotion is possible on {to}")]
    PromotionNotAllowed { to: Square },

    /// Pawns may not promote to a pawn or a king.
    #[error("cannot promote to a {0}")]
    InvalidPromotionPiece(PieceKind),

    /// Castling rights are lost or the path is blocked or attacked.
    #[error("{side} cannot castle {wing}")]
    CastlingUnavailable { side: Side, wing: Wing },

    #[error("turn order: {0}")]
    TurnOrder(TurnOrderViolation),

    /// A promotion piece was chosen while no move was waiting for one.
    #[error("no promotion is pending")]
    NoPendingPromotion,
}

/// Errors raised while reading a FEN position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not sum to 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),

    #[error("invalid side to move `{0}`")]
    InvalidSide(String),

    #[error("invalid castling rights `{0}`")]
    InvalidCastling(String),

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid {field} `{value}`")]
    InvalidCounter { field: &'static str, value: String },

    #[error("position must contain exactly one {0} king")]
    KingCount(Side),
}

/// Errors raised by bot engines and the bot worker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no legal move available for {0}")]
    NoLegalMoves(Side),

    #[error("bot worker disconnected before replying")]
    WorkerDisconnected,

    #[error("search was cancelled")]
    Cancelled,

    #[error("bot move rejected: {0}")]
    Rejected(#[from] MoveError),
}

/// A recorded game could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("replay stopped at ply {ply} (`{san}`): {source}")]
pub struct PlaybackError {
    pub ply: usize,
    pub san: String,
    #[source]
    pub source: MoveError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_order_messages() {
        assert_eq!(
            TurnOrderViolation::NotYourTurn(Side::Dark).to_string(),
            "it is not dark's turn"
        );
        assert_eq!(
            MoveError::TurnOrder(TurnOrderViolation::NoMoveMade).to_string(),
            "turn order: make a move before ending the turn"
        );
    }
}
