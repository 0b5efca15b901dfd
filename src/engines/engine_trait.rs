//! Engine abstraction used by the game when a side is engine-controlled.
//!
//! An engine receives the space-separated long algebraic history of the game
//! so far (from the standard start) and answers with one move or with no
//! move. Every failure is reported as an `EngineError`; the game treats those
//! as "no move available" and keeps running.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::ChessMove;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch engine `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("no engine is configured")]
    NotConfigured,

    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),

    #[error("engine closed its output stream")]
    Disconnected,

    #[error("unexpected engine reply: {0}")]
    Protocol(String),

    #[error("move history could not be replayed: {0}")]
    History(#[from] ChessErrors),
}

pub trait EngineClient: Send {
    /// Prepare for a fresh game. `rating` caps playing strength when set.
    fn new_game(&mut self, _rating: Option<u16>) -> Result<(), EngineError> {
        Ok(())
    }

    /// Suggest a move for the side to move after `history`, or `None` when
    /// the engine has nothing to play (its null move).
    fn request_move(&mut self, history: &str) -> Result<Option<ChessMove>, EngineError>;
}

/// Launches a fresh engine whenever a game that needs one starts.
pub type EngineFactory = Box<dyn FnMut() -> Result<Box<dyn EngineClient>, EngineError> + Send>;
