use std::{
    fmt::{Debug, Display, Write},
    num::NonZeroU8,
};

/// The kind of a piece, independent of its colour.
///
/// Piece types are assigned integers 1-6, so that they fit in 3-bits, and also
/// that 0 is unused -- this is so that Rust can optimise [`Option<PieceType>`]
/// to use the value 0 for [`None`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceType {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Convenience method for constructing a white [`Piece`].
    pub const fn white(self) -> Piece {
        Piece::white(self)
    }

    /// Convenience method for constructing a black [`Piece`].
    pub const fn black(self) -> Piece {
        Piece::black(self)
    }

    /// Convenience method for constructing a [`Piece`] with the supplied
    /// [`Color`].
    pub const fn with_color(self, color: Color) -> Piece {
        Piece::new(color, self)
    }

    /// The letter used for this piece type in algebraic notation.
    pub const fn as_uppercase_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub const fn as_lowercase_char(self) -> char {
        self.as_uppercase_char().to_ascii_lowercase()
    }

    /// Reads a piece letter in either case.
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A player in a chess game, which is also whose turn it is.
///
/// Uses 0 for white and 8 for black, such that the [`Piece`] representation
/// can simply be formed from a bitwise or of the [`Color`] and [`PieceType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    #[default]
    White = 0,
    Black = 8,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    pub const fn is_black(self) -> bool {
        !self.is_white()
    }

    /// Turn inversion: maps [`Color::White`] to [`Color::Black`] and vice
    /// versa.
    pub const fn flip(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Applies this colour's letter case to a piece letter. White pieces are
    /// lowercase and black pieces are uppercase.
    pub const fn apply_case(self, letter: char) -> char {
        match self {
            Color::White => letter.to_ascii_lowercase(),
            Color::Black => letter.to_ascii_uppercase(),
        }
    }

    /// Reads the colour of a piece letter from its case.
    pub const fn from_letter_case(letter: char) -> Self {
        if letter.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The rank offset of a single pawn step for this colour.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The back rank this colour's pieces start on.
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The rank this colour's pawns start on.
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The rank this colour's pawns promote on.
    pub const fn promotion_rank(self) -> u8 {
        self.flip().home_rank()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// A piece in a chess game.
///
/// Internal representation is a 4 bit integer, formed by a bitwise-or of the
/// [`Color`] and [`PieceType`]. Since [`PieceType`] can never be 0, Rust can
/// optimise the [`None`] of an [`Option<Piece>`] to be represented by 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece(NonZeroU8);

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const WHITE_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    pub const WHITE_BISHOP: Piece = Piece::new(Color::White, PieceType::Bishop);
    pub const WHITE_ROOK: Piece = Piece::new(Color::White, PieceType::Rook);
    pub const WHITE_QUEEN: Piece = Piece::new(Color::White, PieceType::Queen);
    pub const WHITE_KING: Piece = Piece::new(Color::White, PieceType::King);
    pub const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceType::Knight);
    pub const BLACK_BISHOP: Piece = Piece::new(Color::Black, PieceType::Bishop);
    pub const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceType::Rook);
    pub const BLACK_QUEEN: Piece = Piece::new(Color::Black, PieceType::Queen);
    pub const BLACK_KING: Piece = Piece::new(Color::Black, PieceType::King);

    /// Constructs a [`Piece`] from a [`Color`] and a [`PieceType`].
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        match NonZeroU8::new(color as u8 | piece_type as u8) {
            Some(value) => Self(value),
            None => unreachable!(),
        }
    }

    pub const fn white(piece_type: PieceType) -> Self {
        Self::new(Color::White, piece_type)
    }

    pub const fn black(piece_type: PieceType) -> Self {
        Self::new(Color::Black, piece_type)
    }

    pub const fn color(self) -> Color {
        if self.0.get() & 8 > 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub const fn is_white(self) -> bool {
        self.color().is_white()
    }

    pub const fn is_black(self) -> bool {
        self.color().is_black()
    }

    pub const fn piece_type(self) -> PieceType {
        match self.0.get() & 0x07 {
            1 => PieceType::Pawn,
            2 => PieceType::Knight,
            3 => PieceType::Bishop,
            4 => PieceType::Rook,
            5 => PieceType::Queen,
            6 => PieceType::King,
            _ => unreachable!(),
        }
    }

    /// Returns true if this piece is of the given colour and type.
    pub const fn is(self, color: Color, piece_type: PieceType) -> bool {
        self.0.get() == color as u8 | piece_type as u8
    }

    /// The board letter for this piece: lowercase for white, uppercase for
    /// black.
    pub const fn as_char(self) -> char {
        self.color().apply_case(self.piece_type().as_uppercase_char())
    }

    /// Inverse of [`Piece::as_char`].
    pub const fn try_from_char(c: char) -> Option<Self> {
        match PieceType::try_from_char(c) {
            Some(piece_type) => Some(Self::new(Color::from_letter_case(c), piece_type)),
            None => None,
        }
    }

    /// The letter used for this piece in Forsyth-Edwards Notation, where white
    /// is uppercase and black is lowercase.
    pub const fn as_fen_char(self) -> char {
        match self.color() {
            Color::White => self.piece_type().as_uppercase_char(),
            Color::Black => self.piece_type().as_lowercase_char(),
        }
    }

    pub const fn try_from_fen_char(c: char) -> Option<Self> {
        match PieceType::try_from_char(c) {
            Some(piece_type) => Some(Self::new(Color::from_letter_case(c).flip(), piece_type)),
            None => None,
        }
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("color", &self.color())
            .field("piece_type", &self.piece_type())
            .finish()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_char())
    }
}
