use crate::board::{Move, State};

/// Counts the leaves of the legal move tree `depth` plies deep.
pub fn perft(state: &State, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| perft(&state.apply_move(m), depth - 1))
        .sum()
}

/// Runs perft under each legal move separately, returning each move with the
/// number of leaves found under it.
pub fn divide(state: &State, depth: usize) -> Vec<(Move, u64)> {
    assert!(depth >= 1);

    state
        .legal_moves()
        .into_iter()
        .map(|m| (m, perft(&state.apply_move(m), depth - 1)))
        .collect()
}
