//! Long algebraic move notation (`e2e4`, `e7e8q`).
//!
//! Four characters name the source and destination squares; an optional
//! fifth character (`q`, `r`, `b`, `n`) selects the promotion piece.
//! Decoding is purely syntactic: whether the move is legal is up to the
//! position it is played in.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::{file_to_col, rank_to_row, square_to_algebraic};

pub fn encode_move(mv: ChessMove) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from));
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(promotion) = mv.promotion {
        out.push(promotion_to_char(promotion));
    }
    out
}

pub fn decode_move(text: &str) -> Result<ChessMove, ChessErrors> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    }

    let from = Square {
        col: file_to_col(chars[0])?,
        row: rank_to_row(chars[1])?,
    };
    let to = Square {
        col: file_to_col(chars[2])?,
        row: rank_to_row(chars[3])?,
    };
    let promotion = match chars.get(4) {
        Some(ch) => Some(char_to_promotion(*ch)?),
        None => None,
    };

    Ok(ChessMove {
        from,
        to,
        promotion,
    })
}

fn promotion_to_char(promotion: Promotion) -> char {
    match promotion {
        Promotion::Queen => 'q',
        Promotion::Rook => 'r',
        Promotion::Bishop => 'b',
        Promotion::Knight => 'n',
    }
}

fn char_to_promotion(ch: char) -> Result<Promotion, ChessErrors> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(Promotion::Queen),
        'r' => Ok(Promotion::Rook),
        'b' => Ok(Promotion::Bishop),
        'n' => Ok(Promotion::Knight),
        _ => Err(ChessErrors::InvalidPromotionChar(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_move, encode_move};
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;

    #[test]
    fn decodes_rank_eight_as_row_zero() {
        let mv = decode_move("a2a4").expect("move should parse");
        assert_eq!(mv.from, Square { row: 6, col: 0 });
        assert_eq!(mv.to, Square { row: 4, col: 0 });
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn round_trip_with_and_without_promotion() {
        for text in ["e2e4", "g8f6", "h7h8q", "a2a1n", "b7c8r", "d2e1b"] {
            let mv = decode_move(text).expect("move should parse");
            assert_eq!(encode_move(mv), text);
            assert_eq!(decode_move(&encode_move(mv)), Ok(mv));
        }
    }

    #[test]
    fn every_square_pair_round_trips() {
        for from in Square::all() {
            for to in Square::all().step_by(7) {
                let mv = ChessMove::new(from, to);
                assert_eq!(decode_move(&encode_move(mv)), Ok(mv));
            }
        }
    }

    #[test]
    fn uppercase_promotion_is_accepted() {
        let mv = decode_move("e7e8N").expect("move should parse");
        assert_eq!(mv.promotion, Some(Promotion::Knight));
        assert_eq!(encode_move(mv), "e7e8n");
    }

    #[test]
    fn malformed_text_is_a_parse_failure() {
        assert_eq!(decode_move("z2e4"), Err(ChessErrors::InvalidFile('z')));
        assert_eq!(decode_move("e2ex"), Err(ChessErrors::InvalidRank('x')));
        assert_eq!(decode_move("e7e8k"), Err(ChessErrors::InvalidPromotionChar('k')));
        assert!(matches!(
            decode_move("e2"),
            Err(ChessErrors::InvalidAlgebraicString(_))
        ));
        assert!(matches!(
            decode_move("e2e4qq"),
            Err(ChessErrors::InvalidAlgebraicString(_))
        ));
    }
}
