//! Perft: leaf-node counts of the legal move tree.
//!
//! Used to validate the generator against published reference counts.

use crate::game_state::position::Position;
use crate::utils::long_algebraic::encode_move;

pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return position.legal_moves().len() as u64;
    }

    position
        .legal_moves()
        .iter()
        .map(|mv| perft(&position.apply(*mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, sorted by move text. Handy for diffing
/// against another engine's `go perft` output.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = position
        .legal_moves()
        .iter()
        .map(|mv| {
            let nodes = perft(&position.apply(*mv), depth.saturating_sub(1));
            (encode_move(*mv), nodes)
        })
        .collect();
    out.sort();
    out
}
