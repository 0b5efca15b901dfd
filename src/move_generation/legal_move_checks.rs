//! King-safety probes.
//!
//! A king is attacked when any pseudo-legal move of the opponent, generated
//! with the king-safety filter disabled and without castling, lands on its
//! square. Callers probing a square other than the king's current one first
//! simulate the king onto it, so pawn pushes never count as attacks.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_pseudo_legal_moves;

pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    let Some(king_sq) = board.king_square(king_color) else {
        return false;
    };
    let mut replies = Vec::with_capacity(64);
    generate_pseudo_legal_moves(board, king_color.opposite(), None, false, &mut replies);
    replies.iter().any(|mv| mv.to == king_sq)
}

#[cfg(test)]
mod tests {
    use super::is_king_attacked;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    #[test]
    fn starting_kings_are_safe() {
        let board = Board::starting();
        assert!(!is_king_attacked(&board, Color::Light));
        assert!(!is_king_attacked(&board, Color::Dark));
    }

    #[test]
    fn pawn_attacks_diagonally_not_forward() {
        let mut board = Board::empty();
        board.put(sq(4, 4), Piece::new(PieceKind::King, Color::Light));
        board.put(sq(0, 0), Piece::new(PieceKind::King, Color::Dark));
        board.put(sq(3, 4), Piece::new(PieceKind::Pawn, Color::Dark).moved());
        assert!(!is_king_attacked(&board, Color::Light));

        board.take(sq(3, 4));
        board.put(sq(3, 3), Piece::new(PieceKind::Pawn, Color::Dark).moved());
        assert!(is_king_attacked(&board, Color::Light));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let mut board = Board::empty();
        board.put(sq(7, 4), Piece::new(PieceKind::King, Color::Light));
        board.put(sq(0, 4), Piece::new(PieceKind::Rook, Color::Dark));
        board.put(sq(0, 0), Piece::new(PieceKind::King, Color::Dark));
        assert!(is_king_attacked(&board, Color::Light));

        board.put(sq(4, 4), Piece::new(PieceKind::Knight, Color::Light));
        assert!(!is_king_attacked(&board, Color::Light));
    }
}
