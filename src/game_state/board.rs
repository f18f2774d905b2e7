//! Mailbox board state.
//!
//! `Board` is the central model for the engine: an 8x8 grid of cells plus the
//! turn, castling, en passant, promotion and history flags. The accessors in
//! this file are a flat mutable store and perform no validation; rules live
//! in `move_generation`.

use crate::chess_errors::FenError;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, MoveRecord};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone)]
pub struct Board {
    // grid[y][x], row 0 is rank 8.
    grid: [[Cell; 8]; 8],

    // --- Turn flags ---
    pub active_side: Side,
    /// The active side committed its move and the turn has not ended yet.
    pub player_moved: bool,

    // --- Special-move state ---
    pub en_passant_target: Option<Square>,
    pub castling_rights: [CastlingRights; 2],
    /// Move waiting for the caller to choose a promotion piece.
    pub pending_promotion: Option<Move>,

    // --- Clocks (kept for FEN round trips) ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- History ---
    pub move_history: Vec<String>,
    pub last_move: Option<MoveRecord>,

    // Read-once flags describing the last committed move.
    pub(crate) castling_performed: Option<(Square, Square)>,
    pub(crate) en_passant_performed: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            grid: [[None; 8]; 8],
            active_side: Side::Light,
            player_moved: false,
            en_passant_target: None,
            castling_rights: [CastlingRights::default(); 2],
            pending_promotion: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            move_history: Vec::new(),
            last_move: None,
            castling_performed: None,
            en_passant_performed: None,
        }
    }
}

impl Board {
    /// Board with no pieces, Light to move and full castling flags.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting position, Light to move.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        for (x, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
            let x = x as u8;
            for side in [Side::Light, Side::Dark] {
                board.set_piece(
                    Square::new(x, side.back_rank()),
                    Some(Piece::new(*kind, side)),
                );
                board.set_piece(
                    Square::new(x, side.pawn_start_rank()),
                    Some(Piece::new(PieceKind::Pawn, side)),
                );
            }
        }
        board
    }

    /// Copy of the position without history, for speculative move probing.
    pub fn scratch_copy(&self) -> Self {
        Self {
            grid: self.grid,
            active_side: self.active_side,
            player_moved: self.player_moved,
            en_passant_target: self.en_passant_target,
            castling_rights: self.castling_rights,
            pending_promotion: None,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            move_history: Vec::new(),
            last_move: None,
            castling_performed: None,
            en_passant_performed: None,
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece(&self, square: Square) -> Cell {
        self.grid[square.y as usize][square.x as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, cell: Cell) {
        self.grid[square.y as usize][square.x as usize] = cell;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece(square).is_none()
    }

    /// Squares holding the given piece, in row-major order from a8.
    pub fn find_all(&self, kind: PieceKind, side: Side) -> Vec<Square> {
        let wanted = Some(Piece::new(kind, side));
        Square::all().filter(|sq| self.piece(*sq) == wanted).collect()
    }

    /// Every piece of `side` with its square.
    pub fn pieces_of(&self, side: Side) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|sq| match self.piece(sq) {
                Some(piece) if piece.side == side => Some((sq, piece)),
                _ => None,
            })
            .collect()
    }

    pub fn find_king(&self, side: Side) -> Option<Square> {
        let king = Some(Piece::new(PieceKind::King, side));
        Square::all().find(|sq| self.piece(*sq) == king)
    }

    /// Square of `side`'s king.
    ///
    /// # Panics
    /// If the king is missing, which breaks the one-king-per-side invariant.
    pub fn king_position(&self, side: Side) -> Square {
        match self.find_king(side) {
            Some(square) => square,
            None => panic!("board invariant violated: no {side} king on the board"),
        }
    }

    #[inline]
    pub fn castling_rights(&self, side: Side) -> CastlingRights {
        self.castling_rights[side.index()]
    }

    #[inline]
    pub fn castling_rights_mut(&mut self, side: Side) -> &mut CastlingRights {
        &mut self.castling_rights[side.index()]
    }

    #[inline]
    pub fn switch_active_side(&mut self) {
        self.active_side = self.active_side.opposite();
    }

    /// Rook relocation `(from, to)` of the last committed move if it castled.
    /// Reading clears the flag, so a second read before the next move
    /// returns `None`.
    pub fn take_castling(&mut self) -> Option<(Square, Square)> {
        self.castling_performed.take()
    }

    /// Square of the pawn removed by the last committed move if it was an
    /// en passant capture. Read-once like [`Board::take_castling`].
    pub fn take_en_passant(&mut self) -> Option<Square> {
        self.en_passant_performed.take()
    }
}
