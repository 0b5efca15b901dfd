//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board
//! squares. Rank 8 is row 0, the a-file is column 0.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

const FILES: &[u8; 8] = b"abcdefgh";

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let mut chars = square.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    };
    Ok(Square {
        row: rank_to_row(rank)?,
        col: file_to_col(file)?,
    })
}

/// Convert a square to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(FILES[square.col as usize & 7]);
    let rank_char = char::from(b'8' - (square.row & 7));
    format!("{file_char}{rank_char}")
}

#[inline]
pub fn file_to_col(file: char) -> Result<u8, ChessErrors> {
    if ('a'..='h').contains(&file) {
        Ok(file as u8 - b'a')
    } else {
        Err(ChessErrors::InvalidFile(file))
    }
}

#[inline]
pub fn rank_to_row(rank: char) -> Result<u8, ChessErrors> {
    if ('1'..='8').contains(&rank) {
        Ok(b'8' - rank as u8)
    } else {
        Err(ChessErrors::InvalidRank(rank))
    }
}
