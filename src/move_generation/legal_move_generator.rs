//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal candidates per occupied square of the side to move,
//! then drops every candidate that leaves the mover's king attacked. The
//! self-check probe builds a throwaway child position (no move cache) and
//! scans the opponent's pseudo-legal replies. Castling additionally requires
//! the king to start outside check and to survive the one-square transit
//! step, probed the same way.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_king_moves, is_castling_move};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Moves that obey each piece's movement pattern for `side`, ignoring
/// whether they expose that side's king.
pub fn generate_pseudo_legal_moves(
    board: &Board,
    side: Color,
    last_move: Option<ChessMove>,
    include_castling: bool,
    out: &mut Vec<ChessMove>,
) {
    for (from, piece) in board.pieces_of(side) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(board, from, piece, last_move, out),
            PieceKind::Knight => generate_knight_moves(board, from, side, out),
            PieceKind::Bishop => generate_bishop_moves(board, from, side, out),
            PieceKind::Rook => generate_rook_moves(board, from, side, out),
            PieceKind::Queen => generate_queen_moves(board, from, side, out),
            PieceKind::King => generate_king_moves(board, from, piece, include_castling, out),
        }
    }
}

pub fn generate_legal_moves(position: &Position) -> Vec<ChessMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(64);
    generate_pseudo_legal_moves(
        position.board(),
        position.side_to_move(),
        position.last_move(),
        true,
        &mut pseudo,
    );

    let mut legal = Vec::<ChessMove>::with_capacity(pseudo.len());
    for mv in pseudo {
        if is_castling_move(position.board(), mv) && !castling_path_is_safe(position, mv) {
            trace!(?mv, "castling rejected: king path attacked");
            continue;
        }
        if !leaves_king_safe(position, mv) {
            trace!(?mv, "candidate rejected: own king left attacked");
            continue;
        }
        legal.push(mv);
    }

    legal
}

fn leaves_king_safe(position: &Position, mv: ChessMove) -> bool {
    let probe = position.simulate(mv);
    !is_king_attacked(probe.board(), position.side_to_move())
}

/// The start square must not be in check and the transit square must not be
/// attacked; the destination is covered by the regular self-check probe.
fn castling_path_is_safe(position: &Position, mv: ChessMove) -> bool {
    if position.is_in_check() {
        return false;
    }
    let step = if mv.to.col > mv.from.col { 1 } else { -1 };
    let Some(transit) = mv.from.offset(0, step) else {
        return false;
    };
    leaves_king_safe(position, ChessMove::new(mv.from, transit))
}
