use std::fmt::Debug;

use pretty_assertions::assert_eq;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::board::{Castling, Color, State};

pub fn assert_in_any_order<T: Eq + Ord + Debug>(
    values: impl IntoIterator<Item = T>,
    expected: impl IntoIterator<Item = T>,
) {
    let mut values = values.into_iter().collect::<Vec<_>>();
    values.sort();

    let mut expected = expected.into_iter().collect::<Vec<_>>();
    expected.sort();

    assert_eq!(values, expected);
}

/// A position from a board diagram, with no castling rights and no en
/// passant.
pub fn state_from_diagram(diagram: &str, to_move: Color) -> State {
    let state = State::new(diagram.parse().unwrap(), to_move, Castling::empty(), None);
    state.validate().unwrap();
    state
}

/// Every position visited by playing uniformly random legal moves from the
/// starting position, until the game ends or `max_plies` moves are played.
pub fn random_playout(seed: u64, max_plies: usize) -> Vec<State> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let mut state = State::initial();
    let mut visited = vec![state.clone()];

    for _ in 0..max_plies {
        let moves = state.legal_moves();
        let Some(&the_move) = moves.choose(&mut rng) else {
            break;
        };

        state = state.apply_move(the_move);
        visited.push(state.clone());
    }

    visited
}
