//! Errors used throughout the arbiter.
//!
//! `ChessErrors` covers every failure that comes from user-provided text:
//! long algebraic moves, single squares and FEN setups. Illegal but
//! well-formed moves are not errors; the game reports them as rejected
//! submissions instead (see `game::chess_game::SubmitOutcome`).
//!
//! Engine failures live in `engines::engine_trait::EngineError` because they
//! are recovered from by skipping the engine's turn rather than surfaced to
//! the player.

use thiserror::Error;

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A file character outside `a..=h`.
    #[error("invalid algebraic file '{0}'")]
    InvalidFile(char),

    /// A rank character outside `1..=8`.
    #[error("invalid algebraic rank '{0}'")]
    InvalidRank(char),

    /// A promotion suffix other than `q`, `r`, `b` or `n`.
    #[error("invalid promotion piece '{0}'")]
    InvalidPromotionChar(char),

    /// A move or square string of the wrong shape (length, encoding).
    ///
    /// Payload: the original text for diagnostics.
    #[error("invalid long algebraic string \"{0}\"")]
    InvalidAlgebraicString(String),

    /// Unexpected character in the placement field of a FEN string.
    #[error("invalid FEN token '{0}'")]
    InvalidFENtoken(char),

    /// FEN string with missing fields or ranks of the wrong width.
    #[error("malformed FEN string \"{0}\"")]
    InvalidFENstringForm(String),

    /// A recorded move that the replayed position does not allow.
    #[error("move {0} is not legal in the replayed position")]
    IllegalMoveInHistory(String),

    /// PGN text that cannot be split into headers and movetext.
    #[error("malformed PGN: {0}")]
    InvalidPgn(String),

    /// A setup that lacks a king for one side cannot be played.
    #[error("position has no {0:?} king")]
    MissingKing(Color),

    /// A setup where the side not on move is in check, so its king could be
    /// taken.
    #[error("{0:?} is in check but not on move")]
    KingCapturable(Color),
}
