use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use thiserror::Error;

/// A square on the board, stored as `8 * rank + file`.
///
/// Rank 0 is white's home rank and file 0 is the a-file, so index 0 is a1,
/// index 7 is h1 and index 63 is h8. Ascending index order is the order in
/// which the board is scanned during move generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

macro_rules! define_rank {
    ($rank:literal => $a:ident $b:ident $c:ident $d:ident $e:ident $f:ident $g:ident $h:ident) => {
        pub const $a: Self = Self::new_unchecked($rank, 0);
        pub const $b: Self = Self::new_unchecked($rank, 1);
        pub const $c: Self = Self::new_unchecked($rank, 2);
        pub const $d: Self = Self::new_unchecked($rank, 3);
        pub const $e: Self = Self::new_unchecked($rank, 4);
        pub const $f: Self = Self::new_unchecked($rank, 5);
        pub const $g: Self = Self::new_unchecked($rank, 6);
        pub const $h: Self = Self::new_unchecked($rank, 7);
    };
}

impl Square {
    define_rank!(0 => A1 B1 C1 D1 E1 F1 G1 H1);
    define_rank!(1 => A2 B2 C2 D2 E2 F2 G2 H2);
    define_rank!(2 => A3 B3 C3 D3 E3 F3 G3 H3);
    define_rank!(3 => A4 B4 C4 D4 E4 F4 G4 H4);
    define_rank!(4 => A5 B5 C5 D5 E5 F5 G5 H5);
    define_rank!(5 => A6 B6 C6 D6 E6 F6 G6 H6);
    define_rank!(6 => A7 B7 C7 D7 E7 F7 G7 H7);
    define_rank!(7 => A8 B8 C8 D8 E8 F8 G8 H8);

    pub const WHITE_QUEENSIDE_ROOK: Self = Self::A1;
    pub const WHITE_KINGSIDE_ROOK: Self = Self::H1;
    pub const BLACK_QUEENSIDE_ROOK: Self = Self::A8;
    pub const BLACK_KINGSIDE_ROOK: Self = Self::H8;

    /// Coordinate bounds check: returns [`None`] unless both `rank` and
    /// `file` are within `0..8`.
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank >= 8 || file >= 8 {
            None
        } else {
            Some(Self(8 * rank + file))
        }
    }

    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self(rank.overflowing_mul(8).0.overflowing_add(file).0 % 64)
    }

    pub const fn index(self) -> usize {
        self.0 as _
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `file_delta` files and `rank_delta` ranks away from
    /// this one, or [`None`] if that would leave the board.
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;

        if file < 0 || rank < 0 {
            None
        } else {
            Self::new(rank as u8, file as u8)
        }
    }

    /// Iterates over all 64 squares in board scan order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// The file letter of this square, `a` to `h`.
    pub const fn file_char(self) -> char {
        (self.file() + b'a') as char
    }

    /// The rank digit of this square, `1` to `8`.
    pub const fn rank_char(self) -> char {
        (self.rank() + b'1') as char
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.file_char())?;
        f.write_char(self.rank_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square {0:?}")]
pub struct ParseSquareError(pub String);

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_owned());

        let mut char_iter = s.chars();
        let file = char_iter.next().ok_or_else(err)?;
        let rank = char_iter.next().ok_or_else(err)?;
        if char_iter.next().is_some() {
            return Err(err());
        }

        let rank = (rank as i32) - ('1' as i32);
        let file = (file as i32) - ('a' as i32);
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Ok(Square::new_unchecked(rank as _, file as _))
        } else {
            Err(err())
        }
    }
}
