//! Games recorded as text: semicolon-separated move pairs, each pair two
//! whitespace-separated SAN moves, e.g. `e4 e5; Nf3 Nc6; Bb5`. The last pair
//! may hold a single move.

use log::{debug, info};
use thiserror::Error;

use crate::{
    board::{Move, NotationError, State},
    move_gen::MoveOptionList,
};

/// The move history text is not shaped like a list of move pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryFormatError {
    #[error("invalid history: empty last move pair")]
    EmptyLastPair,
    #[error("invalid history: expected single space in move pair {pair}, got {spaces}")]
    WrongPairLength { pair: usize, spaces: usize },
    #[error("invalid history: empty move in pair {pair}")]
    EmptyMove { pair: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Format(#[from] HistoryFormatError),
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Splits history text into move pairs, and each pair into its moves.
///
/// Blank text has no pairs. Otherwise every `;`-separated part is one pair;
/// a blank part becomes a pair holding one empty move, which
/// [`check_text_move_history_format`] then rejects.
pub fn split_move_history(text: &str) -> Vec<Vec<&str>> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    text.split(';')
        .map(|pair| {
            let moves = pair.split_whitespace().collect::<Vec<_>>();
            if moves.is_empty() {
                vec![""]
            } else {
                moves
            }
        })
        .collect()
}

/// Checks that every pair holds exactly two non-blank moves, except the last
/// which may hold a single one.
pub fn check_text_move_history_format<S: AsRef<str>>(
    pairs: &[Vec<S>],
) -> Result<(), HistoryFormatError> {
    let is_blank = |half: &S| half.as_ref().trim().is_empty();

    let Some(last) = pairs.last() else {
        return Ok(());
    };

    let mut checked = pairs;
    if last.len() <= 1 {
        if last.first().map_or(true, is_blank) {
            return Err(HistoryFormatError::EmptyLastPair);
        }
        checked = &pairs[..pairs.len() - 1];
    }

    for (pair, halves) in checked.iter().enumerate() {
        if halves.len() != 2 {
            return Err(HistoryFormatError::WrongPairLength {
                pair,
                spaces: halves.len().saturating_sub(1),
            });
        }

        if halves.iter().any(is_blank) {
            return Err(HistoryFormatError::EmptyMove { pair });
        }
    }

    Ok(())
}

/// The moves played so far, grouped in pairs.
///
/// Pairs follow the order of play: the first move of each pair belongs to the
/// side that moved first in the game. From the standard starting position
/// that is always (white, black). A game replayed from a position with black
/// to move stores (black, white) pairs, and its `extra_move` is a black move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameHistory {
    pub move_pairs: Vec<(Move, Move)>,
    /// The first move of an unfinished pair.
    pub extra_move: Option<Move>,
}

impl GameHistory {
    /// Every move in the order it was played.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.move_pairs
            .iter()
            .flat_map(|&(first, second)| [first, second])
            .chain(self.extra_move)
    }

    /// Number of half-moves played.
    pub fn len(&self) -> usize {
        self.move_pairs.len() * 2 + usize::from(self.extra_move.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A game in progress: its history and the position it has reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub history: GameHistory,
    pub state: State,
}

impl Game {
    /// A game with no moves played yet from `start`.
    pub fn new(start: State) -> Self {
        Self {
            history: GameHistory::default(),
            state: start,
        }
    }

    /// Replays history text from `start`.
    ///
    /// The whole text is checked before any move is played. The first move
    /// that cannot be parsed aborts the replay.
    pub fn replay(start: State, text: &str) -> Result<Self, GameError> {
        let pairs = split_move_history(text);
        check_text_move_history_format(&pairs)?;

        let mut game = Self::new(start);
        for (index, pair) in pairs.iter().enumerate() {
            for &half in pair {
                let mover = game.state.to_move();
                let the_move = game.play(half)?;
                debug!("pair {index}: {mover} played {the_move}");
            }
        }

        info!(
            "replayed {} half-moves, {} to move{}",
            game.history.len(),
            game.state.to_move(),
            if game.is_over() { ", game over" } else { "" }
        );

        Ok(game)
    }

    /// Parses and plays one more move, completing the unfinished pair if
    /// there is one.
    pub fn play(&mut self, text: &str) -> Result<Move, NotationError> {
        let the_move = self.state.parse_notation(text)?;
        self.state = self.state.apply_move(the_move);

        match self.history.extra_move.take() {
            Some(first) => self.history.move_pairs.push((first, the_move)),
            None => self.history.extra_move = Some(the_move),
        }

        Ok(the_move)
    }

    /// Returns true if the side to move is checkmated or stalemated.
    pub fn is_over(&self) -> bool {
        self.state.available_move_list(false).is_terminal()
    }

    /// The legal moves in the current position, with notation.
    pub fn available_moves(&self) -> MoveOptionList {
        self.state.available_move_list(true)
    }

    /// Renders the history in the same format [`Game::replay`] reads.
    pub fn to_text(&self) -> String {
        let mut pairs = self
            .history
            .move_pairs
            .iter()
            .map(|(first, second)| format!("{first} {second}"))
            .collect::<Vec<_>>();

        if let Some(extra_move) = self.history.extra_move {
            pairs.push(extra_move.to_string());
        }

        pairs.join("; ")
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(State::initial())
    }
}

/// Replays history text from the standard starting position.
pub fn game_from_text(text: &str) -> Result<Game, GameError> {
    Game::replay(State::initial(), text)
}
