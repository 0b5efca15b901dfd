//! Bishop move generation.
//!
//! Emits diagonal ray moves for a bishop, including captures of the first
//! enemy piece on each ray.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_ray_moves, BISHOP_DIRECTIONS};

pub fn generate_bishop_moves(board: &Board, from: Square, color: Color, out: &mut Vec<ChessMove>) {
    push_ray_moves(board, from, color, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn bishop_stops_at_first_enemy_and_includes_it() {
        let mut board = Board::empty();
        let d4 = Square::new(4, 3).expect("d4");
        let f6 = Square::new(2, 5).expect("f6");
        board.put(d4, Piece::new(PieceKind::Bishop, Color::Light));
        board.put(f6, Piece::new(PieceKind::Pawn, Color::Dark));
        let mut out = Vec::new();
        generate_bishop_moves(&board, d4, Color::Light, &mut out);
        assert!(out.iter().any(|m| m.to == f6));
        assert!(!out.iter().any(|m| Some(m.to) == Square::new(1, 6)));
        // 13 on an empty board minus g7 and h8 behind the pawn.
        assert_eq!(out.len(), 11);
    }
}
