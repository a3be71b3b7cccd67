use thiserror::Error;

use super::{BoardRepr, Castling, Color, KingCountError, Piece, Square, State};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("expected 4 to 6 space-separated fields, got {0}")]
    WrongFieldCount(usize),
    #[error("expected 8 ranks in piece placement, got {0}")]
    WrongRankCount(usize),
    #[error("rank {0} does not describe exactly 8 squares")]
    BadRankLength(u8),
    #[error("unknown piece {0:?}")]
    UnknownPiece(char),
    #[error("expected `w` or `b` for side to move, got {0:?}")]
    BadSideToMove(String),
    #[error("invalid castling field {0:?}")]
    BadCastling(String),
    #[error("invalid en passant field {0:?}")]
    BadEnPassant(String),
    #[error("invalid move counter {0:?}")]
    BadCounter(String),
    #[error(transparent)]
    KingCount(#[from] KingCountError),
}

impl State {
    /// Renders this state in Forsyth-Edwards Notation. Move counters are not
    /// tracked, so they are always written as `0 1`.
    pub fn fen(&self) -> String {
        let mut result = String::new();

        for rank in (0..8).rev() {
            let mut empty_squares = 0;
            for file in 0..8 {
                match self.board().piece_at(Square::new_unchecked(rank, file)) {
                    None => empty_squares += 1,
                    Some(piece) => {
                        if empty_squares > 0 {
                            result.push((empty_squares + b'0') as _);
                        }
                        result.push(piece.as_fen_char());
                        empty_squares = 0;
                    }
                }
            }
            if empty_squares > 0 {
                result.push((empty_squares + b'0') as _);
            }
            if rank > 0 {
                result.push('/');
            }
        }

        result.push(' ');
        result.push(if self.to_move().is_white() { 'w' } else { 'b' });
        result.push(' ');
        result.push_str(&self.castling().as_fen_str());
        result.push(' ');
        match self.en_passant_target() {
            Some(square) => result.push_str(&square.to_string()),
            None => result.push('-'),
        };
        result.push_str(" 0 1");

        result
    }

    /// Parses a position in Forsyth-Edwards Notation.
    ///
    /// The halfmove clock and fullmove number may be omitted; when present
    /// they are checked for being numbers and otherwise ignored. The position
    /// must have exactly one king per side.
    pub fn try_parse_fen(fen: &str) -> Result<Self, ParseFenError> {
        let fields: Vec<_> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(ParseFenError::WrongFieldCount(fields.len()));
        }

        let board = parse_placement(fields[0])?;

        let to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ParseFenError::BadSideToMove(other.to_owned())),
        };

        let castling = Castling::try_from_fen_str(fields[2])
            .ok_or_else(|| ParseFenError::BadCastling(fields[2].to_owned()))?;

        let en_passant_target = match fields[3] {
            "-" => None,
            square => Some(
                square
                    .parse::<Square>()
                    .map_err(|_| ParseFenError::BadEnPassant(square.to_owned()))?,
            ),
        };

        for counter in &fields[4..] {
            counter
                .parse::<u32>()
                .map_err(|_| ParseFenError::BadCounter((*counter).to_owned()))?;
        }

        let state = State::new(board, to_move, castling, en_passant_target.map(Square::file));
        // The target must sit on the rank behind a pawn that just moved two
        // squares.
        if state.en_passant_target() != en_passant_target {
            return Err(ParseFenError::BadEnPassant(fields[3].to_owned()));
        }
        state.validate()?;
        Ok(state)
    }
}

fn parse_placement(placement: &str) -> Result<BoardRepr, ParseFenError> {
    let ranks: Vec<_> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseFenError::WrongRankCount(ranks.len()));
    }

    let mut board = [None; 64];
    for (rank_index, rank_pieces) in ranks.into_iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file = 0;
        for c in rank_pieces.chars() {
            if let Some(digit) = c.to_digit(10) {
                file += digit as u8;
            } else {
                let piece = Piece::try_from_fen_char(c).ok_or(ParseFenError::UnknownPiece(c))?;
                let square =
                    Square::new(rank, file).ok_or(ParseFenError::BadRankLength(rank + 1))?;
                board[square.index()] = Some(piece);
                file += 1;
            }

            if file > 8 {
                return Err(ParseFenError::BadRankLength(rank + 1));
            }
        }
        if file != 8 {
            return Err(ParseFenError::BadRankLength(rank + 1));
        }
    }

    Ok(BoardRepr::new(&board))
}
