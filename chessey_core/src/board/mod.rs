//! Structs and functions related to to the board representation.

mod board_repr;
mod castling;
mod fen;
mod move_repr;
mod piece;
mod san;
mod square;
mod state;

pub use board_repr::{BoardRepr, ParseBoardError};
pub use castling::Castling;
pub use fen::{ParseFenError, STARTING_POSITION_FEN};
pub use move_repr::{Move, MoveBuilder, SpecialMove};
pub use piece::{Color, Piece, PieceType};
pub use san::{CheckIndicator, Disambiguator, NotationError, RegularSANRepr, SANRepr, SAN};
pub use square::{ParseSquareError, Square};
pub use state::{KingCountError, State};
