//! Helpers shared by the per-piece generators.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Walk each direction until the edge, an own piece (excluded) or an enemy
/// piece (included as a capture).
pub fn push_ray_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<ChessMove>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(d_row, d_col) {
            match board.color_at(to) {
                None => out.push(ChessMove::new(from, to)),
                Some(occupant) => {
                    if occupant != color {
                        out.push(ChessMove::new(from, to));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

/// Single-step offsets (knight, king): any target not held by an own piece.
pub fn push_step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<ChessMove>,
) {
    for &(d_row, d_col) in offsets {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        if board.color_at(to) != Some(color) {
            out.push(ChessMove::new(from, to));
        }
    }
}
