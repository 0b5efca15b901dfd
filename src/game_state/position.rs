//! Immutable board snapshot with its legal-move set.
//!
//! A `Position` is built either as the standard starting layout or by
//! applying one move to a parent. Canonical positions compute the full legal
//! move set and the check flag on construction; throwaway positions built
//! while testing a candidate for self-check skip that work.
//!
//! Equality and hashing only look at the repetition identity (`PositionKey`):
//! piece layout, side to move, castling rights and a live en-passant target.
//! The cached move list and `has_moved` flags of non-castling pieces do not
//! take part.

use std::hash::{Hash, Hasher};

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move_to_board, is_en_passant_capture};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::move_generation::legal_move_generator::generate_legal_moves;

#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    last_move: Option<ChessMove>,
    legal_moves: Vec<ChessMove>,
    in_check: bool,
}

/// What makes two positions "the same" for repetition counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    layout: [Option<(PieceKind, Color)>; 64],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The standard starting position, Light to move.
    pub fn new() -> Self {
        Self::build(Board::starting(), Color::Light, None, true)
    }

    /// A canonical position from an arbitrary setup.
    ///
    /// `last_move` only matters when it was a double pawn step, which makes
    /// an en-passant reply available. Both kings must be present, and the
    /// side that just moved may not be left in check.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        last_move: Option<ChessMove>,
    ) -> Result<Self, ChessErrors> {
        for color in [Color::Light, Color::Dark] {
            if board.king_square(color).is_none() {
                return Err(ChessErrors::MissingKing(color));
            }
        }
        let waiting = side_to_move.opposite();
        if is_king_attacked(&board, waiting) {
            return Err(ChessErrors::KingCapturable(waiting));
        }
        Ok(Self::build(board, side_to_move, last_move, true))
    }

    fn build(
        board: Board,
        side_to_move: Color,
        last_move: Option<ChessMove>,
        compute_moves: bool,
    ) -> Self {
        let mut position = Self {
            board,
            side_to_move,
            last_move,
            legal_moves: Vec::new(),
            in_check: false,
        };
        if compute_moves {
            // Castling generation reads the check flag, so it goes first.
            position.in_check = is_king_attacked(&position.board, side_to_move);
            position.legal_moves = generate_legal_moves(&position);
        }
        position
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn last_move(&self) -> Option<ChessMove> {
        self.last_move
    }

    #[inline]
    pub fn legal_moves(&self) -> &[ChessMove] {
        &self.legal_moves
    }

    /// Membership test against the legal-move set.
    #[inline]
    pub fn is_legal(&self, mv: ChessMove) -> bool {
        self.legal_moves.contains(&mv)
    }

    /// Match a submitted move against the legal-move set.
    ///
    /// A pawn reaching its last rank without a promotion piece promotes to a
    /// queen; a promotion piece on any other move is ignored.
    pub fn resolve(&self, mv: ChessMove) -> Option<ChessMove> {
        let promotes = matches!(
            self.board.get(mv.from),
            Some(Piece { kind: PieceKind::Pawn, color, .. })
                if mv.to.row == color.promotion_row()
        );
        let normalized = ChessMove {
            promotion: if promotes {
                Some(mv.promotion.unwrap_or(Promotion::Queen))
            } else {
                None
            },
            ..mv
        };
        self.is_legal(normalized).then_some(normalized)
    }

    /// Derive the child position. The move must come from `legal_moves`;
    /// it is not validated again here.
    pub fn apply(&self, mv: ChessMove) -> Position {
        self.child(mv, true)
    }

    /// Child without a legal-move cache, used for self-check probing.
    pub(crate) fn simulate(&self, mv: ChessMove) -> Position {
        self.child(mv, false)
    }

    fn child(&self, mv: ChessMove, compute_moves: bool) -> Position {
        let board = apply_move_to_board(&self.board, mv);
        Self::build(board, self.side_to_move.opposite(), Some(mv), compute_moves)
    }

    /// Whether the side to move has its king attacked.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn has_legal_moves(&self) -> bool {
        !self.legal_moves.is_empty()
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.in_check && !self.has_legal_moves()
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check && !self.has_legal_moves()
    }

    pub fn is_pawn_move(&self, mv: ChessMove) -> bool {
        matches!(
            self.board.get(mv.from),
            Some(Piece {
                kind: PieceKind::Pawn,
                ..
            })
        )
    }

    pub fn is_capture(&self, mv: ChessMove) -> bool {
        !self.board.is_empty(mv.to) || is_en_passant_capture(&self.board, mv)
    }

    /// Destination of a legal en-passant capture, if one exists.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.legal_moves
            .iter()
            .find(|mv| is_en_passant_capture(&self.board, **mv))
            .map(|mv| mv.to)
    }

    pub fn key(&self) -> PositionKey {
        PositionKey {
            layout: self.board.layout(),
            side_to_move: self.side_to_move,
            castling_rights: self.board.castling_rights(),
            en_passant: self.en_passant_target(),
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
