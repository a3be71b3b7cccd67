use std::fmt::{Debug, Display};

use super::{PieceType, Square, SAN};

/// Special kinds of moves that need extra handling when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialMove {
    #[default]
    None,
    /// A pawn capturing a pawn that just made a two-square advance, landing
    /// behind it.
    EnPassant,
    /// Kingside castling. The move itself is the king's; the rook moves from
    /// the h-file to the f-file.
    CastleShort,
    /// Queenside castling. The rook moves from the a-file to the d-file.
    CastleLong,
    /// A pawn reaching the last rank. The move's piece type is the promoted-to
    /// kind.
    Promotion,
    /// The initial two-square advance of a pawn, which makes en passant
    /// available on the next ply.
    LongPawnMove,
}

/// A chess move.
///
/// Assuming the position is one that allows the move, this contains all the
/// data needed to perform it. `piece_type` is the *effective* piece type after
/// the move: for promotions this is the promoted-to kind, not
/// [`PieceType::Pawn`].
///
/// Moves may carry their rendered [`SAN`]. Use [`Move::same_move`] to compare
/// moves while ignoring notation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
    piece_type: PieceType,
    special: SpecialMove,
    notation: Option<SAN>,
}

impl Move {
    /// Constructs a new [`Move`].
    ///
    /// Note that this method will not check to see if the move performed is
    /// actually legal, i.e. making sure a bishop move actually moved on a
    /// diagonal, ensuring that [`SpecialMove::EnPassant`] is only used for an
    /// en passant capture, etc.
    pub const fn new(
        from: Square,
        to: Square,
        piece_type: PieceType,
        special: SpecialMove,
        notation: Option<SAN>,
    ) -> Self {
        Self {
            from,
            to,
            piece_type,
            special,
            notation,
        }
    }

    pub const fn from_square(self) -> Square {
        self.from
    }

    pub const fn to_square(self) -> Square {
        self.to
    }

    pub const fn piece_type(self) -> PieceType {
        self.piece_type
    }

    pub const fn special(self) -> SpecialMove {
        self.special
    }

    /// The rendered notation, if it was requested when this move was
    /// generated or parsed.
    pub const fn notation(self) -> Option<SAN> {
        self.notation
    }

    pub const fn with_notation(self, notation: SAN) -> Self {
        Self {
            notation: Some(notation),
            ..self
        }
    }

    pub const fn without_notation(self) -> Self {
        Self {
            notation: None,
            ..self
        }
    }

    /// Returns true if both moves have the same squares, piece type and special
    /// handling, regardless of notation.
    pub fn same_move(self, other: Move) -> bool {
        self.without_notation() == other.without_notation()
    }

    pub const fn is_double_pawn_push(self) -> bool {
        matches!(self.special, SpecialMove::LongPawnMove)
    }

    pub const fn is_castle(self) -> bool {
        matches!(
            self.special,
            SpecialMove::CastleShort | SpecialMove::CastleLong
        )
    }

    pub const fn is_en_passant(self) -> bool {
        matches!(self.special, SpecialMove::EnPassant)
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self.special, SpecialMove::Promotion)
    }

    /// If this move is an en passant capture, returns the square the captured
    /// pawn was on: the rank of the start square and the file of the end
    /// square.
    ///
    /// The result of this method called on a non-en passant move is defined
    /// but meaningless.
    pub const fn en_passant_square(self) -> Square {
        Square::new_unchecked(self.from.rank(), self.to.file())
    }

    /// If this move is a castling move, returns the source and destination
    /// squares of rook involved in the castle. (The `from_square` and
    /// `to_square` of this move are for the king.)
    ///
    /// The result of this method called on a non-castling move is defined but
    /// meaningless.
    pub const fn castling_rook_squares(self) -> (Square, Square) {
        let (from, to) = (self.from, self.to);

        let rook_from =
            Square::new_unchecked(from.rank(), if from.file() < to.file() { 7 } else { 0 });
        let rook_to = Square::new_unchecked(from.rank(), (from.file() + to.file()) / 2);

        (rook_from, rook_to)
    }

    /// Convenience alias for [`MoveBuilder::new`].
    pub const fn builder(from: Square, to: Square, piece_type: PieceType) -> MoveBuilder {
        MoveBuilder::new(from, to, piece_type)
    }

    /// Convert this move into a pre-populated [`MoveBuilder`]. Useful for
    /// editing just one aspect of the move.
    pub const fn into_builder(self) -> MoveBuilder {
        MoveBuilder {
            from: self.from,
            to: self.to,
            piece_type: self.piece_type,
            special: self.special,
            notation: self.notation,
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Move");
        s.field("from", &self.from)
            .field("to", &self.to)
            .field("piece_type", &self.piece_type)
            .field("special", &self.special);
        if let Some(notation) = self.notation {
            s.field("notation", &format_args!("{notation}"));
        }
        s.finish()
    }
}

/// Shows the notation if the move carries one, and the start and end squares
/// (`e2e4`, `e7e8q`) otherwise.
impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.notation {
            Some(notation) => write!(f, "{notation}"),
            None if self.is_promotion() => write!(
                f,
                "{}{}{}",
                self.from,
                self.to,
                self.piece_type.as_lowercase_char()
            ),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

/// Builder struct for convenient construction of a [`Move`].
///
/// Most moves don't need a special tag or notation, so this provides a
/// streaming interface to incrementally build a move before calling
/// [`MoveBuilder::build`] to finalise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveBuilder {
    pub from: Square,
    pub to: Square,
    pub piece_type: PieceType,
    pub special: SpecialMove,
    pub notation: Option<SAN>,
}

impl MoveBuilder {
    /// Create a new [`MoveBuilder`].
    ///
    /// Every move requires a source and destination square, as well as the
    /// kind of piece being moved, so these are required in this constructor.
    pub const fn new(from: Square, to: Square, piece_type: PieceType) -> Self {
        Self {
            from,
            to,
            piece_type,
            special: SpecialMove::None,
            notation: None,
        }
    }

    /// Marks this move as a promotion and sets the promoted-to kind.
    pub const fn promotes_to(self, piece_type: PieceType) -> Self {
        Self {
            piece_type,
            special: SpecialMove::Promotion,
            ..self
        }
    }

    pub const fn is_double_pawn_push(self) -> Self {
        Self {
            special: SpecialMove::LongPawnMove,
            ..self
        }
    }

    pub const fn is_en_passant(self) -> Self {
        Self {
            special: SpecialMove::EnPassant,
            ..self
        }
    }

    pub const fn is_castle_short(self) -> Self {
        Self {
            special: SpecialMove::CastleShort,
            ..self
        }
    }

    pub const fn is_castle_long(self) -> Self {
        Self {
            special: SpecialMove::CastleLong,
            ..self
        }
    }

    pub const fn notation(self, notation: SAN) -> Self {
        Self {
            notation: Some(notation),
            ..self
        }
    }

    /// Finalises and builds the [`Move`].
    pub const fn build(self) -> Move {
        Move::new(
            self.from,
            self.to,
            self.piece_type,
            self.special,
            self.notation,
        )
    }
}
