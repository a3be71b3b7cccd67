use thiserror::Error;

use super::{BoardRepr, Castling, Color, Move, PieceType, SpecialMove, Square};

/// The board does not hold exactly one king of some colour.
///
/// This never happens in a position reached by legal play from a valid
/// position, so the move generator treats it as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("found {count} {color} king(s) on board")]
pub struct KingCountError {
    pub color: Color,
    pub count: usize,
}

/// A complete chess position: the pieces, whose turn it is, and the rights
/// that depend on the game's history.
///
/// States are values: [`State::apply_move`] returns a new state and leaves the
/// original untouched, so trial positions never alias the real one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    board: BoardRepr,
    to_move: Color,
    castling: Castling,
    en_passant: Option<u8>,
}

impl State {
    /// Assembles a state from its parts. No validation is performed; see
    /// [`State::validate`].
    ///
    /// `en_passant` is the file (0-7) of a pawn that has just made a
    /// two-square advance.
    pub fn new(
        board: BoardRepr,
        to_move: Color,
        castling: Castling,
        en_passant: Option<u8>,
    ) -> Self {
        Self {
            board,
            to_move,
            castling,
            en_passant: en_passant.filter(|&file| file < 8),
        }
    }

    /// The standard starting position, white to move.
    pub fn initial() -> Self {
        Self::new(
            BoardRepr::starting_position(),
            Color::White,
            Castling::all(),
            None,
        )
    }

    pub fn board(&self) -> &BoardRepr {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    /// The file of a pawn that can currently be captured en passant.
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    /// The square a pawn capturing en passant would land on, i.e. the square
    /// the double-moved pawn skipped over.
    pub fn en_passant_target(&self) -> Option<Square> {
        let rank = match self.to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        self.en_passant.map(|file| Square::new_unchecked(rank, file))
    }

    /// A copy of this state with the side to move replaced.
    pub fn with_to_move(&self, to_move: Color) -> Self {
        Self {
            to_move,
            ..self.clone()
        }
    }

    /// Checks that each side has exactly one king.
    pub fn validate(&self) -> Result<(), KingCountError> {
        for color in Color::ALL {
            self.king_square(color)?;
        }
        Ok(())
    }

    /// Finds the king of the given colour.
    pub fn king_square(&self, color: Color) -> Result<Square, KingCountError> {
        let mut kings = self.board.squares_of(PieceType::King.with_color(color));

        match (kings.next(), kings.count()) {
            (Some(square), 0) => Ok(square),
            (None, _) => Err(KingCountError { color, count: 0 }),
            (Some(_), rest) => Err(KingCountError {
                color,
                count: rest + 1,
            }),
        }
    }

    /// Returns true if `square` is attacked by any piece of colour `by`.
    pub fn is_under_attack(&self, square: Square, by: Color) -> bool {
        self.board.is_under_attack(square, by)
    }

    /// Returns true if the king of the side to move is attacked.
    ///
    /// # Panics
    ///
    /// Panics if the side to move does not have exactly one king, as that
    /// means the position is corrupt.
    pub fn king_is_in_check(&self) -> bool {
        let king = self
            .king_square(self.to_move)
            .unwrap_or_else(|err| panic!("{err}"));
        self.is_under_attack(king, self.to_move.flip())
    }

    /// Produces the state after the side to move plays `the_move`.
    ///
    /// The move is not checked for legality. The destination square always
    /// receives the move's piece type in the mover's colour, which also covers
    /// promotion.
    pub fn apply_move(&self, the_move: Move) -> Self {
        let mover = self.to_move;
        let from = the_move.from_square();
        let to = the_move.to_square();

        let mut board = self.board.clone();
        board.remove(from);
        board.put(to, the_move.piece_type().with_color(mover));

        let mut castling = self.castling;

        match the_move.special() {
            SpecialMove::EnPassant => {
                board.remove(the_move.en_passant_square());
            }
            SpecialMove::CastleShort | SpecialMove::CastleLong => {
                let (rook_from, rook_to) = the_move.castling_rook_squares();
                if let Some(rook) = board.remove(rook_from) {
                    board.put(rook_to, rook);
                }
            }
            SpecialMove::None | SpecialMove::Promotion | SpecialMove::LongPawnMove => {}
        }

        if the_move.piece_type() == PieceType::King {
            castling.remove(Castling::for_color(mover));
        }
        castling.remove(Castling::lost_by_touching(from, to));

        let en_passant = if the_move.is_double_pawn_push() {
            Some(to.file())
        } else {
            None
        };

        Self {
            board,
            to_move: mover.flip(),
            castling,
            en_passant,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}
