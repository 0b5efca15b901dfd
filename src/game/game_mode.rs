use crate::game_state::chess_types::Color;

/// Who controls each side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    /// The human plays Light; the engine answers as Dark.
    HumanVsEngine { rating: u16 },
    EngineVsEngine { rating: u16 },
}

impl GameMode {
    pub fn engine_plays(self, color: Color) -> bool {
        match self {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsEngine { .. } => color == Color::Dark,
            GameMode::EngineVsEngine { .. } => true,
        }
    }

    pub fn uses_engine(self) -> bool {
        !matches!(self, GameMode::HumanVsHuman)
    }

    /// Strength cap passed to the engine at the start of a game.
    pub fn rating(self) -> Option<u16> {
        match self {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsEngine { rating } | GameMode::EngineVsEngine { rating } => {
                Some(rating)
            }
        }
    }
}
