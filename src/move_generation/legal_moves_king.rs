//! King move generation.
//!
//! Adjacent steps plus castling candidates. Castling is only emitted here
//! when the king and rook are unmoved and the squares between them are
//! empty; attack conditions on the king's path are checked by the legal
//! move filter, which simulates the transit step.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_step_moves;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn generate_king_moves(
    board: &Board,
    from: Square,
    king: Piece,
    include_castling: bool,
    out: &mut Vec<ChessMove>,
) {
    push_step_moves(board, from, king.color, &KING_OFFSETS, out);

    if include_castling {
        generate_castling_candidates(board, from, king, out);
    }
}

fn generate_castling_candidates(board: &Board, from: Square, king: Piece, out: &mut Vec<ChessMove>) {
    let row = king.color.back_row();
    if king.has_moved || from != (Square { row, col: 4 }) {
        return;
    }

    // (rook column, king destination column, columns that must be empty)
    let wings: [(u8, u8, &[u8]); 2] = [(7, 6, &[5, 6]), (0, 2, &[1, 2, 3])];
    for (rook_col, king_to_col, between) in wings {
        if !board.unmoved_rook_at(Square { row, col: rook_col }, king.color) {
            continue;
        }
        if between
            .iter()
            .all(|&col| board.is_empty(Square { row, col }))
        {
            out.push(ChessMove::new(from, Square { row, col: king_to_col }));
        }
    }
}

/// A king move spanning more than one file is a castling move.
#[inline]
pub fn is_castling_move(board: &Board, mv: ChessMove) -> bool {
    matches!(
        board.get(mv.from),
        Some(Piece {
            kind: PieceKind::King,
            ..
        })
    ) && mv.from.col.abs_diff(mv.to.col) > 1
}

#[cfg(test)]
mod tests {
    use super::{generate_king_moves, is_castling_move};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square on board")
    }

    fn back_rank_with_rooks() -> Board {
        let mut board = Board::empty();
        board.put(sq(7, 4), Piece::new(PieceKind::King, Color::Light));
        board.put(sq(7, 0), Piece::new(PieceKind::Rook, Color::Light));
        board.put(sq(7, 7), Piece::new(PieceKind::Rook, Color::Light));
        board
    }

    #[test]
    fn castling_candidates_need_empty_path() {
        let mut board = back_rank_with_rooks();
        let king = board.get(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        generate_king_moves(&board, sq(7, 4), king, true, &mut out);
        assert!(out.contains(&ChessMove::new(sq(7, 4), sq(7, 6))));
        assert!(out.contains(&ChessMove::new(sq(7, 4), sq(7, 2))));

        board.put(sq(7, 1), Piece::new(PieceKind::Knight, Color::Light));
        let mut out = Vec::new();
        generate_king_moves(&board, sq(7, 4), king, true, &mut out);
        assert!(!out.contains(&ChessMove::new(sq(7, 4), sq(7, 2))));
    }

    #[test]
    fn moved_rook_or_king_cannot_castle() {
        let mut board = back_rank_with_rooks();
        let rook = board.take(sq(7, 7)).expect("rook");
        board.put(sq(7, 7), rook.moved());
        let king = board.get(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        generate_king_moves(&board, sq(7, 4), king, true, &mut out);
        assert!(!out.contains(&ChessMove::new(sq(7, 4), sq(7, 6))));

        let mut out = Vec::new();
        generate_king_moves(&board, sq(7, 4), king.moved(), true, &mut out);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn castling_is_recognised_by_span() {
        let board = back_rank_with_rooks();
        assert!(is_castling_move(&board, ChessMove::new(sq(7, 4), sq(7, 6))));
        assert!(!is_castling_move(&board, ChessMove::new(sq(7, 4), sq(7, 5))));
    }
}
