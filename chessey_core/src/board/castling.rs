use bitflags::bitflags;

use super::{Color, Square};

bitflags! {
    /// Represents which directions castling moves can still be played for
    /// both players.
    ///
    /// Castling is allowed if the king has not moved and the rook with which to
    /// castle has not moved (and some rules about whether the king is in check
    /// and whether any squares the king will move through or land on are
    /// attacked). Thus, these flags store whether castling is still allowed
    /// given the history of the game with the kingside or queenside rook.
    ///
    /// Rights are only ever removed. After the white king makes a move, both
    /// [`WHITE_KINGSIDE`](Self::WHITE_KINGSIDE) and
    /// [`WHITE_QUEENSIDE`](Self::WHITE_QUEENSIDE) are cleared. If the black
    /// queenside rook leaves (or is captured on) a8, only
    /// [`BLACK_QUEENSIDE`](Self::BLACK_QUEENSIDE) is cleared.
    ///
    /// Temporary reasons a castle may not be permitted (pieces in the way,
    /// the king passing through an attacked square) are checked during move
    /// generation instead.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Castling: u8 {
        /// White is allowed to castle kingside.
        const WHITE_KINGSIDE  = 0b0001;
        /// White is allowed to castle queenside.
        const WHITE_QUEENSIDE = 0b0010;
        /// Black is allowed to castle kingside.
        const BLACK_KINGSIDE  = 0b0100;
        /// Black is allowed to castle queenside.
        const BLACK_QUEENSIDE = 0b1000;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Default for Castling {
    fn default() -> Self {
        Self::all()
    }
}

impl Castling {
    /// Rook home squares and the right that is lost once anything moves from
    /// or onto them.
    const ROOK_HOMES: [(Square, Castling); 4] = [
        (Square::WHITE_QUEENSIDE_ROOK, Castling::WHITE_QUEENSIDE),
        (Square::WHITE_KINGSIDE_ROOK, Castling::WHITE_KINGSIDE),
        (Square::BLACK_QUEENSIDE_ROOK, Castling::BLACK_QUEENSIDE),
        (Square::BLACK_KINGSIDE_ROOK, Castling::BLACK_KINGSIDE),
    ];

    /// Both rights of one colour.
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE,
            Color::Black => Self::BLACK,
        }
    }

    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// The rights that are lost when a piece moves from `from` to `to`, as far
    /// as rook home squares are concerned.
    pub fn lost_by_touching(from: Square, to: Square) -> Self {
        Self::ROOK_HOMES
            .into_iter()
            .filter(|&(square, _)| square == from || square == to)
            .fold(Self::empty(), |lost, (_, right)| lost | right)
    }

    /// Returns the castling state as the 3rd field in [Forsyth-Edwards
    /// Notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// If neither side can castle, returns `-`. Otherwise, returns a string
    /// that contains `K` if white can castle kingside, 'Q' if white can castle
    /// queenside, 'k' if black can castle kingside, and 'q' if black can castle
    /// queenside.
    pub fn as_fen_str(self) -> String {
        if self.is_empty() {
            "-".to_owned()
        } else {
            let mut result = String::with_capacity(4);
            if self.contains(Self::WHITE_KINGSIDE) {
                result.push('K');
            }
            if self.contains(Self::WHITE_QUEENSIDE) {
                result.push('Q');
            }
            if self.contains(Self::BLACK_KINGSIDE) {
                result.push('k');
            }
            if self.contains(Self::BLACK_QUEENSIDE) {
                result.push('q');
            }
            result
        }
    }

    /// Inverse of [`Castling::as_fen_str`].
    pub fn try_from_fen_str(s: &str) -> Option<Self> {
        if s == "-" {
            return Some(Self::empty());
        }
        if s.is_empty() {
            return None;
        }

        let mut flags = Self::empty();
        for c in s.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return None,
            };
        }
        Some(flags)
    }
}
