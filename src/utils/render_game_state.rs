//! Unicode text board for the terminal front-end and test diagnostics.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;

const FILES: &str = "  a b c d e f g h";

/// Glyphs indexed by color, then by `PieceKind::index`.
const GLYPHS: [[char; 6]; 2] = [
    ['♙', '♘', '♗', '♖', '♕', '♔'],
    ['♟', '♞', '♝', '♜', '♛', '♚'],
];

/// Render the board to a Unicode string, rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    let mut lines = Vec::with_capacity(10);
    lines.push(FILES.to_owned());

    for row in 0..8u8 {
        let rank = char::from(b'8' - row);
        let cells: Vec<String> = (0..8u8)
            .map(|col| match board.get(Square { row, col }) {
                Some(piece) => GLYPHS[piece.color.index()][piece.kind.index()].to_string(),
                None => "·".to_owned(),
            })
            .collect();
        lines.push(format!("{rank} {} {rank}", cells.join(" ")));
    }

    lines.push(FILES.to_owned());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn starting_board_renders_black_on_top() {
        let rendered = render_board(&Board::starting());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[4], "5 · · · · · · · · 5");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}
