use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use thiserror::Error;

use super::{Move, Piece, PieceType, SpecialMove, Square, State};

/// Why a piece of notation could not be turned into a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// The text is not shaped like a move at all.
    #[error("incorrect notation: {0}")]
    IncorrectNotation(String),
    /// The text is well-formed, but nothing in the position can make the
    /// move.
    #[error("invalid move: {0}")]
    InvalidMove(String),
    /// More than one piece could make the move and the text does not say
    /// which.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Disambiguator {
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Disambiguator {
    pub fn matches(self, square: Square) -> bool {
        match self {
            Disambiguator::File(file) => square.file() == file,
            Disambiguator::Rank(rank) => square.rank() == rank,
            Disambiguator::Square(s) => square == s,
        }
    }
}

impl Display for Disambiguator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disambiguator::File(file) => f.write_char((file + b'a') as char),
            Disambiguator::Rank(rank) => f.write_char((rank + b'1') as char),
            Disambiguator::Square(square) => f.write_fmt(format_args!("{square}")),
        }
    }
}

/// Notation for anything other than castling.
///
/// For pawns the disambiguator is the origin file of a capture; a capture
/// written without it (`xd5`) leaves it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegularSANRepr {
    pub piece_type: PieceType,
    pub disambiguator: Option<Disambiguator>,
    pub is_capture: bool,
    pub to_square: Square,
    pub promotion: Option<PieceType>,
}

impl Display for RegularSANRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.piece_type != PieceType::Pawn {
            f.write_char(self.piece_type.as_uppercase_char())?;
        }

        if let Some(disambiguator) = self.disambiguator {
            f.write_fmt(format_args!("{disambiguator}"))?;
        }

        if self.is_capture {
            f.write_char('x')?;
        }

        f.write_fmt(format_args!("{}", self.to_square))?;

        if let Some(promotion) = self.promotion {
            f.write_char('=')?;
            f.write_char(promotion.as_uppercase_char())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SANRepr {
    Regular(RegularSANRepr),
    Castle { is_long: bool },
}

impl Display for SANRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SANRepr::Regular(r) => write!(f, "{r}"),
            SANRepr::Castle { is_long: false } => write!(f, "O-O"),
            SANRepr::Castle { is_long: true } => write!(f, "O-O-O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckIndicator {
    Check,
    Checkmate,
}

/// A move in Standard Algebraic Notation.
///
/// Parsing with [`FromStr`] only checks the shape of the text; use
/// [`State::resolve_san`] or [`State::parse_notation`] to find the move it
/// names in a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SAN {
    pub repr: SANRepr,
    pub check: Option<CheckIndicator>,
}

impl Display for SAN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repr)?;

        match self.check {
            Some(CheckIndicator::Check) => write!(f, "+"),
            Some(CheckIndicator::Checkmate) => write!(f, "#"),
            None => Ok(()),
        }
    }
}

impl FromStr for SAN {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let incorrect = || NotationError::IncorrectNotation(s.to_owned());
        if !s.is_ascii() {
            return Err(incorrect());
        }

        let (body, check) = if let Some(body) = s.strip_suffix('+') {
            (body, Some(CheckIndicator::Check))
        } else if let Some(body) = s.strip_suffix('#') {
            (body, Some(CheckIndicator::Checkmate))
        } else {
            (s, None)
        };

        if body.starts_with("O-O") {
            let repr = match body {
                "O-O" => SANRepr::Castle { is_long: false },
                "O-O-O" => SANRepr::Castle { is_long: true },
                _ => return Err(incorrect()),
            };
            return Ok(SAN { repr, check });
        }

        let mut chars = body.chars();
        let (piece_type, rest) = match chars.next() {
            Some(c @ ('R' | 'N' | 'B' | 'Q' | 'K')) => (
                PieceType::try_from_char(c).ok_or_else(incorrect)?,
                chars.as_str(),
            ),
            _ => (PieceType::Pawn, body),
        };

        let (rest, promotion) = match rest.len().checked_sub(2).map(|i| rest.split_at(i)) {
            Some((head, promo)) if promo.starts_with('=') => {
                let promotion = promo[1..]
                    .chars()
                    .next()
                    .filter(|&c| matches!(c, 'R' | 'N' | 'B' | 'Q'))
                    .and_then(PieceType::try_from_char)
                    .ok_or_else(incorrect)?;
                (head, Some(promotion))
            }
            _ => (rest, None),
        };

        if rest.len() < 2 {
            return Err(incorrect());
        }
        let (prefix, to_square) = rest.split_at(rest.len() - 2);
        let to_square: Square = to_square.parse().map_err(|_| incorrect())?;

        let (prefix, is_capture) = match prefix.strip_suffix('x') {
            Some(prefix) => (prefix, true),
            None => (prefix, false),
        };

        let disambiguator = parse_disambiguator(prefix).ok_or_else(incorrect)?;

        let well_formed = match (piece_type, disambiguator) {
            // Pawns only name their origin file, and only when capturing
            (PieceType::Pawn, None) => true,
            (PieceType::Pawn, Some(Disambiguator::File(_))) => is_capture,
            (PieceType::Pawn, Some(_)) => false,
            (_, _) => promotion.is_none(),
        };
        if !well_formed {
            return Err(incorrect());
        }

        Ok(SAN {
            repr: SANRepr::Regular(RegularSANRepr {
                piece_type,
                disambiguator,
                is_capture,
                to_square,
                promotion,
            }),
            check,
        })
    }
}

/// Parses the characters between the piece letter and the destination.
/// Returns `None` if they are not a file, a rank, or a square.
fn parse_disambiguator(s: &str) -> Option<Option<Disambiguator>> {
    let file = |c: u8| (b'a'..=b'h').contains(&c).then(|| c - b'a');
    let rank = |c: u8| (b'1'..=b'8').contains(&c).then(|| c - b'1');

    match *s.as_bytes() {
        [] => Some(None),
        [c] => file(c)
            .map(Disambiguator::File)
            .or_else(|| rank(c).map(Disambiguator::Rank))
            .map(Some),
        [f, r] => Some(Some(Disambiguator::Square(Square::new(rank(r)?, file(f)?)?))),
        _ => None,
    }
}

impl State {
    /// Renders `the_move` in Standard Algebraic Notation, including the check
    /// or checkmate suffix.
    ///
    /// The move is assumed to be one the side to move can make.
    pub fn get_san(&self, the_move: Move) -> SAN {
        let repr = match the_move.special() {
            SpecialMove::CastleShort => SANRepr::Castle { is_long: false },
            SpecialMove::CastleLong => SANRepr::Castle { is_long: true },
            _ => {
                let from = the_move.from_square();
                let to = the_move.to_square();
                let piece_type = self
                    .board()
                    .piece_at(from)
                    .map_or(the_move.piece_type(), Piece::piece_type);
                let is_capture = the_move.is_en_passant() || !self.board().is_empty_at(to);

                let disambiguator = if piece_type == PieceType::Pawn {
                    is_capture.then_some(Disambiguator::File(from.file()))
                } else {
                    self.san_disambiguator(the_move)
                };

                SANRepr::Regular(RegularSANRepr {
                    piece_type,
                    disambiguator,
                    is_capture,
                    to_square: to,
                    promotion: the_move.is_promotion().then_some(the_move.piece_type()),
                })
            }
        };

        // Make the move. Is it a check or checkmate?
        let after = self.apply_move(the_move);
        let check = if !after.king_is_in_check() {
            None
        } else if after.available_move_list(false).is_checkmate() {
            Some(CheckIndicator::Checkmate)
        } else {
            Some(CheckIndicator::Check)
        };

        SAN { repr, check }
    }

    fn san_disambiguator(&self, the_move: Move) -> Option<Disambiguator> {
        let from = the_move.from_square();
        let to = the_move.to_square();
        let piece = self.board().piece_at(from)?;

        // A piece on the destination would block the other pieces' paths to it
        let mut board = self.board().clone();
        board.remove(to);

        let mut ambiguous_piece_exists = false;
        let mut same_rank = false;
        let mut same_file = false;

        for other in board.squares_of(piece) {
            if other != from && board.can_piece_attack_square(other, to, piece) {
                ambiguous_piece_exists = true;

                same_rank |= other.rank() == from.rank();
                same_file |= other.file() == from.file();
            }
        }

        if ambiguous_piece_exists {
            if !same_file {
                Some(Disambiguator::File(from.file()))
            } else if !same_rank {
                Some(Disambiguator::Rank(from.rank()))
            } else {
                Some(Disambiguator::Square(from))
            }
        } else {
            None
        }
    }

    /// Parses `text` as Standard Algebraic Notation and finds the legal move
    /// it names. A trailing `+` or `#` is accepted and ignored.
    ///
    /// The returned move carries its notation as [`State::get_san`] renders
    /// it, which fills in anything the text left implicit.
    pub fn parse_notation(&self, text: &str) -> Result<Move, NotationError> {
        let san: SAN = text.parse()?;
        self.resolve(san, text)
    }

    /// Finds the legal move named by `san`.
    pub fn resolve_san(&self, san: SAN) -> Result<Move, NotationError> {
        self.resolve(san, &san.to_string())
    }

    fn resolve(&self, san: SAN, text: &str) -> Result<Move, NotationError> {
        let candidates = match san.repr {
            SANRepr::Castle { is_long } => {
                let king = Square::new_unchecked(self.to_move().home_rank(), 4);
                let to = Square::new_unchecked(king.rank(), if is_long { 2 } else { 6 });
                let builder = Move::builder(king, to, PieceType::King);

                vec![if is_long {
                    builder.is_castle_long().build()
                } else {
                    builder.is_castle_short().build()
                }]
            }
            SANRepr::Regular(repr) if repr.piece_type == PieceType::Pawn => {
                self.pawn_move_candidates(repr)
            }
            SANRepr::Regular(repr) => self.piece_move_candidates(repr),
        };

        let legal_moves = self.legal_moves();
        let mut candidates = candidates
            .into_iter()
            .filter(|m| legal_moves.contains(m));

        match (candidates.next(), candidates.next()) {
            (None, _) => Err(NotationError::InvalidMove(text.to_owned())),
            (Some(_), Some(_)) => Err(NotationError::AmbiguousMove(text.to_owned())),
            (Some(the_move), None) => Ok(the_move.with_notation(self.get_san(the_move))),
        }
    }

    fn pawn_move_candidates(&self, repr: RegularSANRepr) -> Vec<Move> {
        let to = repr.to_square;
        let color = self.to_move();
        let dy = color.pawn_direction();
        let pawn = PieceType::Pawn.with_color(color);

        let to_last_rank = to.rank() == color.promotion_rank();
        if to_last_rank != repr.promotion.is_some() {
            return Vec::new();
        }

        let finish = |from: Square| {
            let mut builder = Move::builder(from, to, PieceType::Pawn);
            if let Some(promotion) = repr.promotion {
                builder = builder.promotes_to(promotion);
            }
            if repr.is_capture && self.board().is_empty_at(to) {
                builder = builder.is_en_passant();
            }
            if from.rank().abs_diff(to.rank()) == 2 {
                builder = builder.is_double_pawn_push();
            }
            builder.build()
        };

        let origins: Vec<Square> = if repr.is_capture {
            let file_deltas = match repr.disambiguator {
                Some(Disambiguator::File(file)) => vec![file as i8 - to.file() as i8],
                _ => vec![1, -1],
            };
            file_deltas
                .into_iter()
                .filter(|&dx| dx != 0)
                .filter_map(|dx| to.offset(dx, -dy))
                .filter(|&from| self.board()[from] == Some(pawn))
                .collect()
        } else {
            let one_back = to.offset(0, -dy);
            let two_back = one_back.and_then(|square| square.offset(0, -dy));
            match (one_back, two_back) {
                (Some(from), _) if self.board()[from] == Some(pawn) => vec![from],
                (Some(_), Some(from)) if self.board()[from] == Some(pawn) => vec![from],
                _ => Vec::new(),
            }
        };

        origins
            .into_iter()
            .filter(|&from| self.can_pawn_move_to(from, to))
            .map(finish)
            .collect()
    }

    fn piece_move_candidates(&self, repr: RegularSANRepr) -> Vec<Move> {
        let to = repr.to_square;
        let piece = repr.piece_type.with_color(self.to_move());

        self.board()
            .squares_of(piece)
            .filter(|&from| repr.disambiguator.map_or(true, |d| d.matches(from)))
            .filter(|&from| self.can_piece_move_to(from, to, repr.piece_type))
            .map(|from| Move::builder(from, to, repr.piece_type).build())
            .collect()
    }
}
