use std::{
    fmt::{Display, Write},
    ops::Index,
    str::FromStr,
};

use thiserror::Error;

use super::{Color, Piece, PieceType, Square};

/// The pieces on the board, stored as one optional [`Piece`] per square.
///
/// Squares are indexed by [`Square`]:
/// ```
/// # use chessey_core::board::{BoardRepr, Piece, Square};
/// let board = BoardRepr::starting_position();
/// assert_eq!(board[Square::E1], Some(Piece::WHITE_KING));
/// assert_eq!(board[Square::E4], None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardRepr {
    squares: [Option<Piece>; 64],
}

impl Default for BoardRepr {
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}

impl BoardRepr {
    /// Creates a new [`BoardRepr`] from the provided board state.
    ///
    /// The provided board state should be a slice of [`Option<Piece>`]s,
    /// ordered by increasing file and then rank (i.e. index 0 is a1, index 1 is
    /// b1, index 2 is c1... index 7 is h1, index 8 is a2, index 9 is b2, etc.).
    ///
    /// Pieces past index 63 are ignored, and if a shorter slice is passed the
    /// missing squares are assumed to be empty.
    pub fn new(board: &[Option<Piece>]) -> Self {
        let mut repr = Self::default();

        for (i, &piece) in board.iter().take(64).enumerate() {
            repr.squares[i] = piece;
        }

        repr
    }

    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut repr = Self::default();
        for color in Color::ALL {
            for (file, piece_type) in BACK_RANK.into_iter().enumerate() {
                let file = file as u8;
                repr.put(
                    Square::new_unchecked(color.home_rank(), file),
                    piece_type.with_color(color),
                );
                repr.put(
                    Square::new_unchecked(color.pawn_rank(), file),
                    PieceType::Pawn.with_color(color),
                );
            }
        }

        repr
    }

    /// Returns the piece, if any, on the provided square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns true if the square holds a piece that does not belong to
    /// `color`.
    pub fn is_enemy_at(&self, square: Square, color: Color) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.color() != color)
    }

    /// Returns true if the square holds a piece belonging to `color`.
    pub fn is_ally_at(&self, square: Square, color: Color) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.color() == color)
    }

    /// Iterates over every piece and its square, in board scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (piece, square)))
    }

    /// Iterates over the pieces of one colour, in board scan order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.pieces().filter(move |(piece, _)| piece.color() == color)
    }

    /// Returns every square holding exactly `piece`.
    pub fn squares_of(&self, piece: Piece) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |&(p, _)| p == piece)
            .map(|(_, square)| square)
    }

    /// Intended for internal use: places a piece without any consistency
    /// checks.
    pub(crate) fn put(&mut self, square: Square, piece: Piece) {
        self.squares[square.index()] = Some(piece);
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }
}

impl Index<Square> for BoardRepr {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("unknown piece letter {0:?}")]
    UnknownPiece(char),
    #[error("expected 64 squares, got {0}")]
    WrongSquareCount(usize),
}

/// Parses an 8x8 board diagram, rank 8 first. Whitespace is ignored, `.` or
/// `_` is an empty square, and pieces use the board letter convention (see
/// [`Piece::as_char`]).
///
/// ```
/// # use chessey_core::board::{BoardRepr, Piece, Square};
/// let board: BoardRepr = "
///     ....K...
///     ........
///     ........
///     ........
///     ........
///     ........
///     ...ppp..
///     R...k...
/// "
/// .parse()
/// .unwrap();
/// assert_eq!(board[Square::A1], Some(Piece::BLACK_ROOK));
/// assert_eq!(board[Square::E2], Some(Piece::WHITE_PAWN));
/// ```
impl FromStr for BoardRepr {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut repr = Self::default();
        let mut count = 0;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let piece = match c {
                '.' | '_' => None,
                c => Some(Piece::try_from_char(c).ok_or(ParseBoardError::UnknownPiece(c))?),
            };

            if count < 64 {
                let rank = 7 - (count / 8) as u8;
                let file = (count % 8) as u8;
                if let Some(piece) = piece {
                    repr.put(Square::new_unchecked(rank, file), piece);
                }
            }
            count += 1;
        }

        if count != 64 {
            return Err(ParseBoardError::WrongSquareCount(count));
        }

        Ok(repr)
    }
}

impl Display for BoardRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                match self.piece_at(Square::new_unchecked(rank, file)) {
                    Some(piece) => f.write_char(piece.as_char())?,
                    None => f.write_char('.')?,
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
