//! Crate root module declarations for the Slate Chess rules engine.
//!
//! This file exposes the board model, pseudo-legal and legal move generation,
//! SAN notation, the minimax bot and its worker thread, the turn-based game
//! session, and utility helpers so binaries, tests, and presentation layers
//! can import stable module paths.

pub mod api;
pub mod chess_errors;
pub mod session;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
}

pub mod notation {
    pub mod san_parser;
    pub mod san_writer;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod threading;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod playback;
    pub mod render_game_state;
}
