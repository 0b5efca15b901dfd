//! Fixed 8x8 mailbox board.
//!
//! The board is a plain `Copy` value: deriving a child position copies the
//! whole array, so a child never aliases its parent.

use crate::game_state::chess_rules::STARTING_BACK_RANK;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (col, kind) in STARTING_BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.put(Square { row: 0, col }, Piece::new(*kind, Color::Dark));
            board.put(Square { row: 1, col }, Piece::new(PieceKind::Pawn, Color::Dark));
            board.put(Square { row: 6, col }, Piece::new(PieceKind::Pawn, Color::Light));
            board.put(Square { row: 7, col }, Piece::new(*kind, Color::Light));
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn put(&mut self, square: Square, piece: Piece) {
        self.cells[square.index()] = Some(piece);
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    /// Color of the occupant, if any.
    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.get(square).map(|piece| piece.color)
    }

    /// Occupied squares of one side, in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| match cell {
                Some(piece) if piece.color == color => Some((Square::from_index(index), *piece)),
                _ => None,
            })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Castling availability implied by unmoved kings and corner rooks.
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = 0;
        for (color, kingside, queenside) in [
            (Color::Light, CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
            (Color::Dark, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
        ] {
            let row = color.back_row();
            let king_ready = matches!(
                self.get(Square { row, col: 4 }),
                Some(Piece { kind: PieceKind::King, color: c, has_moved: false }) if c == color
            );
            if !king_ready {
                continue;
            }
            if self.unmoved_rook_at(Square { row, col: 7 }, color) {
                rights |= kingside;
            }
            if self.unmoved_rook_at(Square { row, col: 0 }, color) {
                rights |= queenside;
            }
        }
        rights
    }

    pub(crate) fn unmoved_rook_at(&self, square: Square, color: Color) -> bool {
        matches!(
            self.get(square),
            Some(Piece { kind: PieceKind::Rook, color: c, has_moved: false }) if c == color
        )
    }

    /// Piece kind and color per square, ignoring `has_moved`.
    pub fn layout(&self) -> [Option<(PieceKind, Color)>; 64] {
        let mut layout = [None; 64];
        for (slot, cell) in layout.iter_mut().zip(self.cells.iter()) {
            *slot = cell.map(|piece| (piece.kind, piece.color));
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_board_has_thirty_two_pieces() {
        let board = Board::starting();
        assert_eq!(board.pieces_of(Color::Light).count(), 16);
        assert_eq!(board.pieces_of(Color::Dark).count(), 16);
        assert_eq!(board.king_square(Color::Light), Square::new(7, 4));
        assert_eq!(board.king_square(Color::Dark), Square::new(0, 4));
    }

    #[test]
    fn starting_board_grants_all_castling_rights() {
        let board = Board::starting();
        assert_eq!(
            board.castling_rights(),
            CASTLE_LIGHT_KINGSIDE
                | CASTLE_LIGHT_QUEENSIDE
                | CASTLE_DARK_KINGSIDE
                | CASTLE_DARK_QUEENSIDE
        );
    }

    #[test]
    fn moved_rook_drops_one_wing() {
        let mut board = Board::starting();
        let h1 = Square::new(7, 7).expect("h1");
        let rook = board.take(h1).expect("rook on h1");
        board.put(h1, rook.moved());
        assert_eq!(
            board.castling_rights() & (CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            CASTLE_LIGHT_QUEENSIDE
        );
    }

    #[test]
    fn copies_do_not_alias() {
        let parent = Board::starting();
        let mut child = parent;
        child.take(Square::new(6, 4).expect("e2"));
        assert!(parent.get(Square::new(6, 4).expect("e2")).is_some());
        assert_ne!(parent, child);
    }
}
