use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_step_moves;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn generate_knight_moves(board: &Board, from: Square, color: Color, out: &mut Vec<ChessMove>) {
    push_step_moves(board, from, color, &KNIGHT_OFFSETS, out);
}
