//! Legal move generation and terminal-state detection.

use arrayvec::ArrayVec;
use log::trace;

use crate::board::{BoardRepr, Castling, Color, Move, PieceType, Square, State};

pub mod movement;
mod pseudo_legal;

/// Maximum number of moves that could occur in a legal position, used for
/// stack-allocating a vector to hold moves.
///
/// The actual number appears to be 218 in this position:
///
/// R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1
///
/// But 256 is a nice number and a good buffer in case there could be more.
pub const MAX_MOVES: usize = 256;

/// Promotion targets, in the order promotion moves are generated.
pub const POSSIBLE_PROMOTIONS: &[PieceType] = &[
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

/// The outcome of generating moves for a position: either at least one legal
/// move, or the reason there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOptionList {
    Moves(MoveVec),
    Checkmate,
    Stalemate,
}

impl MoveOptionList {
    /// The legal moves, or an empty slice in a terminal position.
    pub fn moves(&self) -> &[Move] {
        match self {
            MoveOptionList::Moves(moves) => moves,
            MoveOptionList::Checkmate | MoveOptionList::Stalemate => &[],
        }
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self, MoveOptionList::Checkmate)
    }

    pub fn is_stalemate(&self) -> bool {
        matches!(self, MoveOptionList::Stalemate)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_stalemate()
    }
}

/// Generates moves for the side to move in one position, appending them to a
/// caller-supplied [`MoveVec`].
///
/// Moves come out in board scan order (a1 to h8), each piece's moves in
/// direction order, followed by en passant captures and then castling.
pub struct MoveGenerator<'state, 'moves> {
    state: &'state State,
    board: &'state BoardRepr,
    to_move: Color,
    out_moves: &'moves mut MoveVec,
}

impl<'state, 'moves> MoveGenerator<'state, 'moves> {
    pub fn new(state: &'state State, out_moves: &'moves mut MoveVec) -> Self {
        Self {
            state,
            board: state.board(),
            to_move: state.to_move(),
            out_moves,
        }
    }

    /// Generates every move that obeys piece movement and occupancy rules,
    /// without checking whether the mover's king is left in check.
    pub fn pseudo_legal_moves(&mut self) {
        self.pseudo_legal_piece_moves();
        self.pseudo_legal_en_passants();
        self.castling_moves();
    }

    /// Generates every legal move.
    pub fn legal_moves(&mut self) {
        let start = self.out_moves.len();
        self.pseudo_legal_moves();

        let state = self.state;
        let mut index = 0;
        self.out_moves.retain(|&mut m| {
            let keep = index < start || !leaves_king_in_check(state, m);
            if !keep {
                trace!("rejecting {m}: leaves the {} king in check", state.to_move());
            }
            index += 1;
            keep
        });
    }

    fn castling_moves(&mut self) {
        let rank = self.to_move.home_rank();
        let king_square = Square::new_unchecked(rank, 4);
        let king = PieceType::King.with_color(self.to_move);

        if self.board[king_square] != Some(king) {
            return;
        }

        let rights = self.state.castling() & Castling::for_color(self.to_move);
        if rights.is_empty() {
            return;
        }

        let opponent = self.to_move.flip();

        // Can't castle out of check
        if self.board.is_under_attack(king_square, opponent) {
            return;
        }

        let mut try_castle = |right: Castling,
                              rook_file: u8,
                              empty_files: &[u8],
                              safe_files: &[u8],
                              to_file: u8| {
            if !rights.contains(right) {
                return;
            }

            let rook = PieceType::Rook.with_color(self.to_move);
            // Check there actually is a rook to castle with
            if self.board[Square::new_unchecked(rank, rook_file)] != Some(rook) {
                return;
            }

            // Can't castle if there are pieces between the king and rook
            if empty_files
                .iter()
                .any(|&file| !self.board.is_empty_at(Square::new_unchecked(rank, file)))
            {
                return;
            }

            // Can't castle if the king moves through or ends in check
            if safe_files.iter().any(|&file| {
                self.board
                    .is_under_attack(Square::new_unchecked(rank, file), opponent)
            }) {
                return;
            }

            let builder = Move::builder(
                king_square,
                Square::new_unchecked(rank, to_file),
                PieceType::King,
            );
            self.out_moves.push(if to_file > 4 {
                builder.is_castle_short().build()
            } else {
                builder.is_castle_long().build()
            });
        };

        try_castle(Castling::kingside(self.to_move), 7, &[5, 6], &[5, 6], 6);
        try_castle(Castling::queenside(self.to_move), 0, &[1, 2, 3], &[2, 3], 2);
    }
}

/// Simulates `the_move` and reports whether the mover's own king is attacked
/// afterwards.
fn leaves_king_in_check(state: &State, the_move: Move) -> bool {
    state
        .apply_move(the_move)
        .with_to_move(state.to_move())
        .king_is_in_check()
}

impl State {
    /// Returns all legal moves for the side to move, without notation.
    pub fn legal_moves(&self) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new(self, &mut moves).legal_moves();
        moves
    }

    /// Returns the legal moves for the side to move, or
    /// [`MoveOptionList::Checkmate`] / [`MoveOptionList::Stalemate`] if there
    /// are none.
    ///
    /// If `with_notation` is set, every move carries its [`SAN`]
    /// (see [`State::get_san`]). Rendering checkmate suffixes calls back into
    /// this method with `with_notation` unset.
    ///
    /// [`SAN`]: crate::board::SAN
    pub fn available_move_list(&self, with_notation: bool) -> MoveOptionList {
        let mut moves = self.legal_moves();

        if moves.is_empty() {
            return if self.king_is_in_check() {
                MoveOptionList::Checkmate
            } else {
                MoveOptionList::Stalemate
            };
        }

        if with_notation {
            for m in moves.iter_mut() {
                *m = m.with_notation(self.get_san(*m));
            }
        }

        MoveOptionList::Moves(moves)
    }
}
