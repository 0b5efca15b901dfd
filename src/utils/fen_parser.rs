//! FEN-to-Position parser.
//!
//! The mailbox board has no explicit rights fields, so the parser folds FEN
//! metadata back into piece flags:
//! - pawns off their start row are marked as moved;
//! - kings and corner rooks are unmoved only when a castling right needs them;
//! - other pieces are unmoved only on their initial squares;
//! - an en-passant square becomes the double step that produced it.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_BACK_RANK;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

/// A parsed FEN: the position plus the move clocks.
#[derive(Debug, Clone)]
pub struct FenSetup {
    pub position: Position,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

pub fn parse_fen(fen: &str) -> Result<Position, ChessErrors> {
    Ok(parse_fen_setup(fen)?.position)
}

pub fn parse_fen_setup(fen: &str) -> Result<FenSetup, ChessErrors> {
    let malformed = || ChessErrors::InvalidFENstringForm(fen.to_owned());
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(malformed)?;
    let side_part = parts.next().ok_or_else(malformed)?;
    let castling_part = parts.next().ok_or_else(malformed)?;
    let en_passant_part = parts.next().ok_or_else(malformed)?;
    // Clocks are optional so EPD-style strings are accepted too.
    let halfmove_clock = match parts.next() {
        Some(field) => field.parse::<u32>().map_err(|_| malformed())?,
        None => 0,
    };
    let fullmove_number = match parts.next() {
        Some(field) => field.parse::<u32>().map_err(|_| malformed())?.max(1),
        None => 1,
    };
    if parts.next().is_some() {
        return Err(malformed());
    }

    let mut board = parse_board(board_part, fen)?;
    let side_to_move = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        _ => return Err(malformed()),
    };
    let rights = parse_castling_rights(castling_part)?;
    mark_moved_pieces(&mut board, rights);
    let last_move = parse_en_passant(en_passant_part, fen)?;

    Ok(FenSetup {
        position: Position::from_parts(board, side_to_move, last_move)?,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str, fen: &str) -> Result<Board, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFENstringForm(fen.to_owned()));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFENtoken(ch));
                }
                col += empty_count as usize;
                continue;
            }

            let (kind, color) = PieceKind::from_fen_letter(ch).ok_or(ChessErrors::InvalidFENtoken(ch))?;
            let square = Square::new(row as u8, col as u8)
                .ok_or_else(|| ChessErrors::InvalidFENstringForm(fen.to_owned()))?;
            board.put(square, Piece::new(kind, color));
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFENstringForm(fen.to_owned()));
        }
    }

    Ok(board)
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(ChessErrors::InvalidFENtoken(ch)),
        }
    }

    Ok(rights)
}

fn mark_moved_pieces(board: &mut Board, rights: CastlingRights) {
    for square in Square::all() {
        let Some(piece) = board.get(square) else {
            continue;
        };
        if !is_unmoved(piece, square, rights) {
            board.put(square, piece.moved());
        }
    }
}

fn is_unmoved(piece: Piece, square: Square, rights: CastlingRights) -> bool {
    let (kingside, queenside) = match piece.color {
        Color::Light => (CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
        Color::Dark => (CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
    };
    let back_row = piece.color.back_row();

    match piece.kind {
        PieceKind::Pawn => square.row == piece.color.pawn_start_row(),
        PieceKind::King => {
            square == (Square { row: back_row, col: 4 }) && rights & (kingside | queenside) != 0
        }
        PieceKind::Rook => {
            (square == (Square { row: back_row, col: 7 }) && rights & kingside != 0)
                || (square == (Square { row: back_row, col: 0 }) && rights & queenside != 0)
        }
        kind => square.row == back_row && STARTING_BACK_RANK[square.col as usize] == kind,
    }
}

/// The double step implied by an en-passant target square.
fn parse_en_passant(en_passant_part: &str, fen: &str) -> Result<Option<ChessMove>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(en_passant_part)?;
    let (from_row, to_row) = match target.row {
        // Rank 3: Light just pushed from rank 2 to rank 4.
        5 => (6, 4),
        // Rank 6: Dark just pushed from rank 7 to rank 5.
        2 => (1, 3),
        _ => return Err(ChessErrors::InvalidFENstringForm(fen.to_owned())),
    };

    Ok(Some(ChessMove::new(
        Square {
            row: from_row,
            col: target.col,
        },
        Square {
            row: to_row,
            col: target.col,
        },
    )))
}
