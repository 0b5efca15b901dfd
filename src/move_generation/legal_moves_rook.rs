//! Rook move generation.
//!
//! Emits rank and file ray moves for a rook, including captures of the first
//! enemy piece on each ray.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_ray_moves, ROOK_DIRECTIONS};

pub fn generate_rook_moves(board: &Board, from: Square, color: Color, out: &mut Vec<ChessMove>) {
    push_ray_moves(board, from, color, &ROOK_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_rook_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn rook_on_empty_board_has_fourteen_moves() {
        let mut board = Board::empty();
        let d4 = Square::new(4, 3).expect("d4");
        board.put(d4, Piece::new(PieceKind::Rook, Color::Dark));
        let mut out = Vec::new();
        generate_rook_moves(&board, d4, Color::Dark, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn rook_excludes_own_blocker() {
        let board = Board::starting();
        let a1 = Square::new(7, 0).expect("a1");
        let mut out = Vec::new();
        generate_rook_moves(&board, a1, Color::Light, &mut out);
        assert!(out.is_empty());
    }
}
