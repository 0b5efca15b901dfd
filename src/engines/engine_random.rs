//! Random-move engine.
//!
//! Replays the history from the starting position and picks uniformly among
//! the legal moves. Used for engine-vs-engine smoke games and as an engine
//! that needs no external process.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessErrors;
use crate::engines::engine_trait::{EngineClient, EngineError};
use crate::game_state::chess_types::ChessMove;
use crate::game_state::position::Position;
use crate::utils::long_algebraic::decode_move;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Deterministic variant: the same seed and history give the same moves.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineClient for RandomEngine {
    fn request_move(&mut self, history: &str) -> Result<Option<ChessMove>, EngineError> {
        let position = replay_history(history)?;
        Ok(position.legal_moves().choose(&mut self.rng).copied())
    }
}

/// Rebuild the position reached by a space-separated move list.
pub fn replay_history(history: &str) -> Result<Position, ChessErrors> {
    let mut position = Position::new();
    for text in history.split_whitespace() {
        let mv = decode_move(text)?;
        let mv = position
            .resolve(mv)
            .ok_or_else(|| ChessErrors::IllegalMoveInHistory(text.to_owned()))?;
        position = position.apply(mv);
    }
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::{replay_history, RandomEngine};
    use crate::chess_errors::ChessErrors;
    use crate::engines::engine_trait::{EngineClient, EngineError};
    use crate::game_state::chess_types::Color;

    #[test]
    fn picks_a_legal_move() {
        let mut engine = RandomEngine::seeded(7);
        let history = "e2e4 e7e5";
        let position = replay_history(history).expect("history should replay");
        let mv = engine
            .request_move(history)
            .expect("engine should answer")
            .expect("there are legal moves");
        assert!(position.is_legal(mv));
    }

    #[test]
    fn same_seed_same_choice() {
        let mut a = RandomEngine::seeded(42);
        let mut b = RandomEngine::seeded(42);
        for _ in 0..5 {
            assert_eq!(
                a.request_move("d2d4").expect("answer"),
                b.request_move("d2d4").expect("answer")
            );
        }
    }

    #[test]
    fn mated_side_gets_no_move() {
        let mut engine = RandomEngine::seeded(1);
        let reply = engine
            .request_move("f2f3 e7e5 g2g4 d8h4")
            .expect("engine should answer");
        assert_eq!(reply, None);
    }

    #[test]
    fn illegal_history_is_reported() {
        let position = replay_history("e2e4 e2e4");
        assert_eq!(
            position.err(),
            Some(ChessErrors::IllegalMoveInHistory("e2e4".to_owned()))
        );

        let mut engine = RandomEngine::seeded(1);
        assert!(matches!(
            engine.request_move("e2e5"),
            Err(EngineError::History(_))
        ));
        assert_eq!(
            replay_history("").expect("empty history").side_to_move(),
            Color::Light
        );
    }
}
