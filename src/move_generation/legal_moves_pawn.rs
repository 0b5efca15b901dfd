//! Pawn move generation.
//!
//! Single and double pushes, diagonal captures, en passant and promotion.
//! Promotions are emitted once per promotion piece.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn generate_pawn_moves(
    board: &Board,
    from: Square,
    pawn: Piece,
    last_move: Option<ChessMove>,
    out: &mut Vec<ChessMove>,
) {
    let color = pawn.color;
    let dir = color.pawn_direction();

    if let Some(one_step) = from.offset(dir, 0) {
        if board.is_empty(one_step) {
            push_pawn_move(from, one_step, color, out);

            if !pawn.has_moved && from.row == color.pawn_start_row() {
                if let Some(two_step) = one_step.offset(dir, 0) {
                    if board.is_empty(two_step) {
                        out.push(ChessMove::new(from, two_step));
                    }
                }
            }
        }
    }

    for d_col in [-1i8, 1i8] {
        let Some(to) = from.offset(dir, d_col) else {
            continue;
        };
        match board.color_at(to) {
            Some(occupant) if occupant != color => push_pawn_move(from, to, color, out),
            Some(_) => {}
            None => {
                if en_passant_available(board, from, to, color, last_move) {
                    out.push(ChessMove::new(from, to));
                }
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, color: Color, out: &mut Vec<ChessMove>) {
    if to.row == color.promotion_row() {
        for promotion in Promotion::ALL {
            out.push(ChessMove::with_promotion(from, to, promotion));
        }
    } else {
        out.push(ChessMove::new(from, to));
    }
}

/// The previous move must be an enemy pawn's double step that landed beside
/// `from` on the same row, and `to` must be the square it skipped.
fn en_passant_available(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    last_move: Option<ChessMove>,
) -> bool {
    let Some(last) = last_move else {
        return false;
    };
    let double_step = last.from.col == last.to.col && last.from.row.abs_diff(last.to.row) == 2;
    let enemy_pawn = matches!(
        board.get(last.to),
        Some(Piece { kind: PieceKind::Pawn, color: c, .. }) if c != color
    );
    double_step && enemy_pawn && last.to.row == from.row && last.to.col == to.col
}
