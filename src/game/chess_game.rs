//! Game-level state machine.
//!
//! `ChessGame` owns the current position and everything derived from the
//! sequence of moves: turn order, the move counter, the repetition table, the
//! fifty-move indices and the recorded history. Moves come either from
//! `submit_move` (a human) or from the attached engine; both go through the
//! same accept path, so engine turns chain until it is a human's turn again
//! or the game ends.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{EngineClient, EngineError, EngineFactory};
use crate::game::game_mode::GameMode;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{FIFTY_MOVE_PLY_LIMIT, REPETITION_LIMIT};
use crate::game_state::chess_types::{ChessMove, Color};
use crate::game_state::position::{Position, PositionKey};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen_setup;
use crate::utils::long_algebraic::{decode_move, encode_move};
use crate::utils::pgn::write_pgn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Running
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::Running => "*",
            GameStatus::WhiteWins => "1-0",
            GameStatus::BlackWins => "0-1",
            GameStatus::Draw => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    FiftyMoveRule,
}

/// Why a well-formed submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    GameOver,
    /// The side to move is engine-controlled.
    NotYourTurn,
    IllegalMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(Rejection),
}

impl SubmitOutcome {
    pub fn is_accepted(self) -> bool {
        self == SubmitOutcome::Accepted
    }
}

pub struct ChessGame {
    position: Position,
    /// Full-move number, starts at 1 and advances after Dark's move.
    move_counter: u32,
    status: GameStatus,
    reason: Option<GameOverReason>,
    repetitions: HashMap<PositionKey, u8>,
    /// Plies played; seeded from the FEN half-move clock for custom setups.
    ply: u32,
    last_pawn_move_ply: u32,
    last_capture_ply: u32,
    history: Vec<String>,
    setup_fen: Option<String>,
    mode: GameMode,
    engine: Option<Box<dyn EngineClient>>,
    engine_factory: Option<EngineFactory>,
    engine_degraded: bool,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// Human-vs-human game from the standard start, with no engine available.
    pub fn new() -> Self {
        let position = Position::new();
        let mut repetitions = HashMap::new();
        repetitions.insert(position.key(), 1);
        Self {
            position,
            move_counter: 1,
            status: GameStatus::Running,
            reason: None,
            repetitions,
            ply: 0,
            last_pawn_move_ply: 0,
            last_capture_ply: 0,
            history: Vec::new(),
            setup_fen: None,
            mode: GameMode::HumanVsHuman,
            engine: None,
            engine_factory: None,
            engine_degraded: false,
        }
    }

    /// A game that can launch engines through `factory` when a mode needs one.
    pub fn with_engine_factory(factory: EngineFactory) -> Self {
        Self {
            engine_factory: Some(factory),
            ..Self::new()
        }
    }

    /// Human-vs-human game from a FEN setup.
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        let mut game = Self::new();
        game.set_up_fen(fen)?;
        Ok(game)
    }

    /// Reset every field together and start a game in `mode`.
    ///
    /// An engine left over from the previous game is reused; otherwise one is
    /// launched through the factory. Launch failures leave the game playable
    /// with the degraded flag set. In engine-vs-engine mode the whole game is
    /// played out before this returns.
    pub fn new_game(&mut self, mode: GameMode) {
        let previous = self.engine.take();
        let (engine, degraded) = if mode.uses_engine() {
            match self.prepare_engine(previous, mode.rating()) {
                Ok(engine) => (Some(engine), false),
                Err(err) => {
                    warn!(%err, "engine unavailable for new game");
                    (None, true)
                }
            }
        } else {
            (None, false)
        };

        self.install(Position::new(), 1, 0, None, mode, engine, degraded);
        info!(?mode, "new game");
        self.run_engine_turns();
    }

    /// Replace the game with a human-vs-human game from a FEN setup.
    ///
    /// On a parse error the current game is left untouched.
    pub fn set_up_fen(&mut self, fen: &str) -> Result<(), ChessErrors> {
        let setup = parse_fen_setup(fen)?;
        self.install(
            setup.position,
            setup.fullmove_number,
            setup.halfmove_clock,
            Some(fen.trim().to_owned()),
            GameMode::HumanVsHuman,
            None,
            false,
        );
        info!(fen = fen.trim(), "new game from setup");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn install(
        &mut self,
        position: Position,
        move_counter: u32,
        halfmove_clock: u32,
        setup_fen: Option<String>,
        mode: GameMode,
        engine: Option<Box<dyn EngineClient>>,
        engine_degraded: bool,
    ) {
        let mut repetitions = HashMap::new();
        repetitions.insert(position.key(), 1);

        self.position = position;
        self.move_counter = move_counter;
        self.status = GameStatus::Running;
        self.reason = None;
        self.repetitions = repetitions;
        self.ply = halfmove_clock;
        self.last_pawn_move_ply = 0;
        self.last_capture_ply = 0;
        self.history.clear();
        self.setup_fen = setup_fen;
        self.mode = mode;
        self.engine = engine;
        self.engine_degraded = engine_degraded;

        // A setup may already be decided.
        self.evaluate(1);
    }

    fn prepare_engine(
        &mut self,
        previous: Option<Box<dyn EngineClient>>,
        rating: Option<u16>,
    ) -> Result<Box<dyn EngineClient>, EngineError> {
        let mut engine = match previous {
            Some(engine) => engine,
            None => {
                let factory = self
                    .engine_factory
                    .as_mut()
                    .ok_or(EngineError::NotConfigured)?;
                factory()?
            }
        };
        engine.new_game(rating)?;
        Ok(engine)
    }

    /// Submit a move in long algebraic notation for the side to move.
    ///
    /// Malformed notation is an error. Well-formed moves that cannot be
    /// played are rejected without touching any state.
    pub fn submit_move(&mut self, text: &str) -> Result<SubmitOutcome, ChessErrors> {
        let mv = decode_move(text.trim())?;

        if self.status.is_over() {
            return Ok(self.reject(text, Rejection::GameOver));
        }
        if self.mode.engine_plays(self.position.side_to_move()) {
            return Ok(self.reject(text, Rejection::NotYourTurn));
        }
        let Some(mv) = self.position.resolve(mv) else {
            return Ok(self.reject(text, Rejection::IllegalMove));
        };

        self.accept(mv);
        self.run_engine_turns();
        Ok(SubmitOutcome::Accepted)
    }

    fn reject(&self, text: &str, rejection: Rejection) -> SubmitOutcome {
        debug!(mv = text.trim(), ?rejection, "move rejected");
        SubmitOutcome::Rejected(rejection)
    }

    /// Ask the engine again after a turn it skipped.
    ///
    /// Relaunches the engine if none is attached. Returns whether at least one
    /// engine move was played.
    pub fn request_engine_move(&mut self) -> bool {
        if self.status.is_over() || !self.mode.engine_plays(self.position.side_to_move()) {
            return false;
        }
        if self.engine.is_none() {
            match self.prepare_engine(None, self.mode.rating()) {
                Ok(engine) => self.engine = Some(engine),
                Err(err) => {
                    warn!(%err, "engine relaunch failed");
                    self.engine_degraded = true;
                    return false;
                }
            }
        }
        let before = self.history.len();
        self.run_engine_turns();
        self.history.len() > before
    }

    fn run_engine_turns(&mut self) {
        while !self.status.is_over() && self.mode.engine_plays(self.position.side_to_move()) {
            if !self.play_engine_move() {
                break;
            }
        }
    }

    /// One engine turn. Returns false when the engine did not move.
    fn play_engine_move(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            self.engine_degraded = true;
            return false;
        };

        let history = self.history.join(" ");
        match engine.request_move(&history) {
            Ok(None) => {
                info!(side = ?self.position.side_to_move(), "engine has no move");
                false
            }
            Ok(Some(suggested)) => match self.position.resolve(suggested) {
                Some(mv) => {
                    self.engine_degraded = false;
                    self.accept(mv);
                    true
                }
                None => {
                    warn!(mv = encode_move(suggested), "engine suggested an illegal move");
                    self.engine_degraded = true;
                    false
                }
            },
            Err(err) => {
                warn!(%err, "engine request failed");
                self.engine_degraded = true;
                false
            }
        }
    }

    /// The single path every legal move takes.
    fn accept(&mut self, mv: ChessMove) {
        let mover = self.position.side_to_move();

        // Clocks come from FEN text and may start anywhere in `u32`.
        self.ply = self.ply.saturating_add(1);
        if self.position.is_pawn_move(mv) {
            self.last_pawn_move_ply = self.ply;
        }
        if self.position.is_capture(mv) {
            self.last_capture_ply = self.ply;
        }

        self.position = self.position.apply(mv);
        self.history.push(encode_move(mv));
        if mover == Color::Dark {
            self.move_counter = self.move_counter.saturating_add(1);
        }

        let count = self.repetitions.entry(self.position.key()).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;
        debug!(
            mv = encode_move(mv),
            ?mover,
            move_counter = self.move_counter,
            repetitions = count,
            "move accepted"
        );

        self.evaluate(count);
    }

    /// Classify the current position. Mate and stalemate take precedence over
    /// the draw counters.
    fn evaluate(&mut self, repetition_count: u8) {
        let just_moved = self.position.side_to_move().opposite();
        let outcome = if self.position.is_checkmate() {
            let winner = match just_moved {
                Color::Light => GameStatus::WhiteWins,
                Color::Dark => GameStatus::BlackWins,
            };
            Some((winner, GameOverReason::Checkmate))
        } else if self.position.is_stalemate() {
            Some((GameStatus::Draw, GameOverReason::Stalemate))
        } else if repetition_count >= REPETITION_LIMIT {
            Some((GameStatus::Draw, GameOverReason::ThreefoldRepetition))
        } else if self.halfmove_clock() >= FIFTY_MOVE_PLY_LIMIT {
            Some((GameStatus::Draw, GameOverReason::FiftyMoveRule))
        } else {
            None
        };

        if let Some((status, reason)) = outcome {
            self.status = status;
            self.reason = Some(reason);
            info!(?status, ?reason, move_counter = self.move_counter, "game over");
        }
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn current_position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn reason(&self) -> Option<GameOverReason> {
        self.reason
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Accepted moves in long algebraic form, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Set when the last engine launch or request failed.
    pub fn is_engine_degraded(&self) -> bool {
        self.engine_degraded
    }

    /// Plies since the last pawn move or capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.ply - self.last_pawn_move_ply.max(self.last_capture_ply)
    }

    pub fn fen(&self) -> String {
        generate_fen(&self.position, self.halfmove_clock(), self.move_counter)
    }

    pub fn to_pgn(&self) -> String {
        write_pgn(
            &self.history,
            self.status.result_token(),
            self.setup_fen.as_deref(),
        )
    }
}
