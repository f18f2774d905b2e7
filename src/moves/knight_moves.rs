use crate::game_state::chess_types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Push each on-board square at one of `offsets` from `from` that is empty
/// or holds an enemy piece.
pub fn leap_targets(
    board: &Board,
    from: Square,
    side: Side,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(dx, dy) in offsets {
        let Some(target) = from.offset(dx, dy) else {
            continue;
        };
        match board.piece(target) {
            Some(occupant) if occupant.side == side => {}
            _ => out.push(target),
        }
    }
}

pub fn generate_knight_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    leap_targets(board, from, side, &KNIGHT_OFFSETS, out);
}
