//! Value types shared by the board, the move generator and the game.
//!
//! Squares are addressed as `(row, col)` with row 0 being Black's back rank
//! (rank 8) and column 0 the a-file.

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row that holds this side's pawns before they move.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    /// Row where this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// Row holding this side's king and rooks at the start.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    const LETTERS: [(PieceKind, char); 6] = [
        (PieceKind::Pawn, 'p'),
        (PieceKind::Knight, 'n'),
        (PieceKind::Bishop, 'b'),
        (PieceKind::Rook, 'r'),
        (PieceKind::Queen, 'q'),
        (PieceKind::King, 'k'),
    ];

    /// Position in `Pawn..=King` order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// FEN letter for a piece of this kind and `color` (uppercase for Light).
    pub fn fen_letter(self, color: Color) -> char {
        let letter = Self::LETTERS[self.index()].1;
        match color {
            Color::Light => letter.to_ascii_uppercase(),
            Color::Dark => letter,
        }
    }

    pub fn from_fen_letter(ch: char) -> Option<(PieceKind, Color)> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else {
            Color::Dark
        };
        let lower = ch.to_ascii_lowercase();
        Self::LETTERS
            .iter()
            .find(|(_, letter)| *letter == lower)
            .map(|(kind, _)| (*kind, color))
    }
}

/// A piece on the board. `has_moved` gates the pawn double step and castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Returns `None` when either coordinate is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        }
    }

    /// Step by `(d_row, d_col)`, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

/// Pieces a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Packed castling availability, one bit per side and wing.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
