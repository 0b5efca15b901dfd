//! Queen move generation: the union of rook and bishop rays.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    push_ray_moves, BISHOP_DIRECTIONS, ROOK_DIRECTIONS,
};

pub fn generate_queen_moves(board: &Board, from: Square, color: Color, out: &mut Vec<ChessMove>) {
    push_ray_moves(board, from, color, &ROOK_DIRECTIONS, out);
    push_ray_moves(board, from, color, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_queen_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn central_queen_on_empty_board() {
        let mut board = Board::empty();
        let d4 = Square::new(4, 3).expect("d4");
        board.put(d4, Piece::new(PieceKind::Queen, Color::Light));
        let mut out = Vec::new();
        generate_queen_moves(&board, d4, Color::Light, &mut out);
        assert_eq!(out.len(), 27);
    }
}
