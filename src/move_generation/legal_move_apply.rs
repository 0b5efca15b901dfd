//! Board transformation for a validated move.
//!
//! Relocates the moving piece and handles the side effects of en passant,
//! castling and promotion. No legality checks happen here.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_king::is_castling_move;

pub fn apply_move_to_board(board: &Board, mv: ChessMove) -> Board {
    let mut next = *board;

    let Some(moving) = next.take(mv.from) else {
        return next;
    };

    if is_en_passant_capture(board, mv) {
        next.take(Square {
            row: mv.from.row,
            col: mv.to.col,
        });
    }

    if is_castling_move(board, mv) {
        move_castling_rook(&mut next, mv);
    }

    let placed = if moving.kind == PieceKind::Pawn && mv.to.row == moving.color.promotion_row() {
        let kind = mv
            .promotion
            .unwrap_or(Promotion::Queen)
            .piece_kind();
        Piece { kind, ..moving }
    } else {
        moving
    };

    next.put(mv.to, placed.moved());
    next
}

/// A pawn moving diagonally onto an empty square.
#[inline]
pub fn is_en_passant_capture(board: &Board, mv: ChessMove) -> bool {
    matches!(
        board.get(mv.from),
        Some(Piece {
            kind: PieceKind::Pawn,
            ..
        })
    ) && mv.from.col != mv.to.col
        && board.is_empty(mv.to)
}

fn move_castling_rook(board: &mut Board, mv: ChessMove) {
    let row = mv.from.row;
    let (rook_from, rook_to) = if mv.to.col > mv.from.col {
        (7, mv.to.col - 1)
    } else {
        (0, mv.to.col + 1)
    };
    if let Some(rook) = board.take(Square { row, col: rook_from }) {
        board.put(Square { row, col: rook_to }, rook.moved());
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move_to_board, is_en_passant_capture};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    #[test]
    fn quiet_move_marks_piece_moved() {
        let board = Board::starting();
        let next = apply_move_to_board(&board, ChessMove::new(sq(7, 6), sq(5, 5)));
        let knight = next.get(sq(5, 5)).expect("knight on f3");
        assert_eq!(knight.kind, PieceKind::Knight);
        assert!(knight.has_moved);
        assert!(next.is_empty(sq(7, 6)));
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut board = Board::empty();
        board.put(sq(3, 4), Piece::new(PieceKind::Pawn, Color::Light).moved());
        board.put(sq(3, 3), Piece::new(PieceKind::Pawn, Color::Dark).moved());
        let mv = ChessMove::new(sq(3, 4), sq(2, 3));
        assert!(is_en_passant_capture(&board, mv));
        let next = apply_move_to_board(&board, mv);
        assert!(next.is_empty(sq(3, 3)));
        assert!(next.get(sq(2, 3)).is_some());
    }

    #[test]
    fn black_castles_queenside() {
        let mut board = Board::empty();
        board.put(sq(0, 4), Piece::new(PieceKind::King, Color::Dark));
        board.put(sq(0, 0), Piece::new(PieceKind::Rook, Color::Dark));
        let next = apply_move_to_board(&board, ChessMove::new(sq(0, 4), sq(0, 2)));
        assert_eq!(next.get(sq(0, 2)).map(|p| p.kind), Some(PieceKind::King));
        let rook = next.get(sq(0, 3)).expect("rook on d8");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(rook.has_moved);
        assert!(next.is_empty(sq(0, 0)));
    }

    #[test]
    fn dark_pawn_promotes_on_row_seven() {
        let mut board = Board::empty();
        board.put(sq(6, 0), Piece::new(PieceKind::Pawn, Color::Dark).moved());
        let next = apply_move_to_board(
            &board,
            ChessMove::with_promotion(sq(6, 0), sq(7, 0), Promotion::Rook),
        );
        let piece = next.get(sq(7, 0)).expect("promoted piece");
        assert_eq!(piece.kind, PieceKind::Rook);
        assert_eq!(piece.color, Color::Dark);
    }
}
