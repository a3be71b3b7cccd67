//! Chess rules: positions, legal move generation, check and game-end
//! detection, and Standard Algebraic Notation in both directions.

pub mod board;
pub mod history;
pub mod move_gen;
pub mod perft;

#[cfg(test)]
mod test_utils;
