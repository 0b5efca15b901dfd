//! Canonical chess-rule constants.
//!
//! Starting layout, draw thresholds and the engine protocol's null move.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank order from the a-file to the h-file.
pub const STARTING_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Occurrences of one position that end the game in a draw.
pub const REPETITION_LIMIT: u8 = 3;

/// Plies without a pawn move or capture that end the game in a draw
/// (fifty moves by each side).
pub const FIFTY_MOVE_PLY_LIMIT: u32 = 100;

/// Long algebraic sentinel an engine sends when it has no move.
pub const NULL_MOVE: &str = "0000";
