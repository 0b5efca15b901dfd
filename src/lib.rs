//! Crate root module declarations for the chess arbiter.
//!
//! This file exposes the subsystems (position and move generation, the game
//! state machine, engine clients and notation helpers) so the binary, tests
//! and benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod game {
    pub mod chess_game;
    pub mod game_mode;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_uci;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}
