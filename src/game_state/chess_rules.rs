//! Canonical chess-rule constants.
//!
//! Static rule-related literals such as the standard starting position and
//! the castling token spellings accepted by the SAN parser.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// File the king starts on in the standard setup (the e-file).
pub const KING_START_FILE: u8 = 4;

/// Accepted spellings for king-side castling.
pub const KING_SIDE_CASTLING_TOKENS: [&str; 2] = ["O-O", "0-0"];

/// Accepted spellings for queen-side castling.
pub const QUEEN_SIDE_CASTLING_TOKENS: [&str; 2] = ["O-O-O", "0-0-0"];

/// Default search depth of the minimax bot, in plies.
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
