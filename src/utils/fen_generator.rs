use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

/// Serialize a position with the given move clocks.
///
/// Castling rights come from unmoved kings and corner rooks. The en-passant
/// field is only filled when a capture on it is actually legal.
pub fn generate_fen(position: &Position, halfmove_clock: u32, fullmove_number: u32) -> String {
    let board = generate_board_field(position.board());
    let side_to_move = match position.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(position.board().castling_rights());
    let en_passant = position
        .en_passant_target()
        .map(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned());

    format!("{board} {side_to_move} {castling} {en_passant} {halfmove_clock} {fullmove_number}")
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match board.get(Square { row, col }) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.kind.fen_letter(piece.color));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    for (flag, ch) in [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ] {
        if rights & flag != 0 {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::position::Position;
    use crate::utils::fen_parser::{parse_fen, parse_fen_setup};
    use crate::utils::long_algebraic::decode_move;

    #[test]
    fn starting_position_round_trips() {
        assert_eq!(generate_fen(&Position::new(), 0, 1), STARTING_POSITION_FEN);
    }

    #[test]
    fn custom_position_round_trips() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let setup = parse_fen_setup(fen).expect("custom FEN should parse");
        let generated = generate_fen(&setup.position, setup.halfmove_clock, setup.fullmove_number);
        assert_eq!(generated, fen);

        let reparsed = parse_fen(&generated).expect("generated FEN should parse");
        assert_eq!(reparsed, setup.position);
    }

    #[test]
    fn en_passant_field_only_when_capturable() {
        let position = Position::new().apply(decode_move("e2e4").expect("move"));
        assert!(generate_fen(&position, 0, 1).contains(" b KQkq - "));

        let fen = "4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1";
        let position = parse_fen(fen)
            .expect("FEN should parse")
            .apply(decode_move("d2d4").expect("move"));
        assert_eq!(generate_fen(&position, 0, 1), "4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1");
    }
}
