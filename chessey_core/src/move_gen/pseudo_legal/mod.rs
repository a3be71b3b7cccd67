use crate::board::{Move, Square};

use super::{movement::MovementRule, MoveGenerator};

mod pawn_moves;

impl<'state, 'moves> MoveGenerator<'state, 'moves> {
    /// Generates the ordinary moves of every piece of the side to move, in
    /// board scan order. En passant and castling are generated separately.
    pub(super) fn pseudo_legal_piece_moves(&mut self) {
        let board = self.board;

        for (piece, from) in board.pieces_of(self.to_move) {
            match MovementRule::of(piece.piece_type()) {
                MovementRule::Pawn => self.pseudo_legal_pawn_moves(from),
                rule => self.pseudo_legal_moves_along(from, rule),
            }
        }
    }

    fn pseudo_legal_moves_along(&mut self, from: Square, rule: MovementRule) {
        let Some(piece) = self.board[from] else {
            return;
        };

        for (dx, dy) in rule.directions() {
            let mut to = from;
            for _ in 0..rule.max_steps() {
                to = match to.offset(dx, dy) {
                    Some(next) => next,
                    None => break,
                };

                if self.board.is_ally_at(to, self.to_move) {
                    break;
                }

                self.out_moves
                    .push(Move::builder(from, to, piece.piece_type()).build());

                if self.board.is_enemy_at(to, self.to_move) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        board::{Castling, Color, PieceType, State},
        move_gen::MoveVec,
        test_utils::assert_in_any_order,
    };

    fn test_position(to_move: Color) -> State {
        State::new(
            "
                ...QK...
                ....P...
                B.N..R..
                pQn.N..r
                .p....q.
                ...nB.P.
                .b.p...p
                ....kb..
            "
            .parse()
            .unwrap(),
            to_move,
            Castling::empty(),
            None,
        )
    }

    fn piece_moves(to_move: Color, piece_type: PieceType) -> Vec<Move> {
        let state = test_position(to_move);
        let mut moves = MoveVec::new();
        MoveGenerator::new(&state, &mut moves).pseudo_legal_piece_moves();

        moves
            .into_iter()
            .filter(|m| m.piece_type() == piece_type)
            .collect()
    }

    fn white_knight_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::C5, Square::B7, PieceType::Knight).build(),
            Move::builder(Square::C5, Square::D7, PieceType::Knight).build(),
            Move::builder(Square::C5, Square::E6, PieceType::Knight).build(),
            Move::builder(Square::C5, Square::E4, PieceType::Knight).build(),
            Move::builder(Square::C5, Square::B3, PieceType::Knight).build(),
            Move::builder(Square::C5, Square::A4, PieceType::Knight).build(),
            Move::builder(Square::C5, Square::A6, PieceType::Knight).build(),
            //
            Move::builder(Square::D3, Square::F4, PieceType::Knight).build(),
            Move::builder(Square::D3, Square::F2, PieceType::Knight).build(),
            Move::builder(Square::D3, Square::C1, PieceType::Knight).build(),
            Move::builder(Square::D3, Square::E5, PieceType::Knight).build(),
        ]
    }

    fn black_knight_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::C6, Square::B8, PieceType::Knight).build(),
            Move::builder(Square::C6, Square::A7, PieceType::Knight).build(),
            Move::builder(Square::C6, Square::D4, PieceType::Knight).build(),
            Move::builder(Square::C6, Square::A5, PieceType::Knight).build(),
            Move::builder(Square::C6, Square::B4, PieceType::Knight).build(),
            //
            Move::builder(Square::E5, Square::F7, PieceType::Knight).build(),
            Move::builder(Square::E5, Square::G6, PieceType::Knight).build(),
            Move::builder(Square::E5, Square::C4, PieceType::Knight).build(),
            Move::builder(Square::E5, Square::D7, PieceType::Knight).build(),
            Move::builder(Square::E5, Square::G4, PieceType::Knight).build(),
            Move::builder(Square::E5, Square::F3, PieceType::Knight).build(),
            Move::builder(Square::E5, Square::D3, PieceType::Knight).build(),
        ]
    }

    fn white_rook_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::H5, Square::G5, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::F5, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::E5, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::H6, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::H7, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::H8, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::H4, PieceType::Rook).build(),
            Move::builder(Square::H5, Square::H3, PieceType::Rook).build(),
        ]
    }

    fn black_rook_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::F6, Square::E6, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::D6, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::G6, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::H6, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F7, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F8, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F5, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F4, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F3, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F2, PieceType::Rook).build(),
            Move::builder(Square::F6, Square::F1, PieceType::Rook).build(),
        ]
    }

    fn white_queen_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::G4, Square::F4, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::E4, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::D4, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::C4, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::F5, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::E6, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::D7, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::C8, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::G5, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::G6, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::G7, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::G8, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::H4, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::H3, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::F3, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::E2, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::D1, PieceType::Queen).build(),
            Move::builder(Square::G4, Square::G3, PieceType::Queen).build(),
        ]
    }

    fn white_king_moves() -> Vec<Move> {
        vec![
            Move::builder(Square::E1, Square::D1, PieceType::King).build(),
            Move::builder(Square::E1, Square::E2, PieceType::King).build(),
            Move::builder(Square::E1, Square::F2, PieceType::King).build(),
        ]
    }

    #[test]
    fn test_white_knight_moves() {
        assert_in_any_order(
            piece_moves(Color::White, PieceType::Knight),
            white_knight_moves(),
        );
    }

    #[test]
    fn test_black_knight_moves() {
        assert_in_any_order(
            piece_moves(Color::Black, PieceType::Knight),
            black_knight_moves(),
        );
    }

    #[test]
    fn test_white_rook_moves() {
        assert_in_any_order(
            piece_moves(Color::White, PieceType::Rook),
            white_rook_moves(),
        );
    }

    #[test]
    fn test_black_rook_moves() {
        assert_in_any_order(
            piece_moves(Color::Black, PieceType::Rook),
            black_rook_moves(),
        );
    }

    #[test]
    fn test_white_queen_moves() {
        assert_in_any_order(
            piece_moves(Color::White, PieceType::Queen),
            white_queen_moves(),
        );
    }

    #[test]
    fn test_white_king_moves() {
        assert_in_any_order(
            piece_moves(Color::White, PieceType::King),
            white_king_moves(),
        );
    }

    #[test]
    fn moves_come_out_in_scan_order() {
        let state = test_position(Color::White);
        let mut moves = MoveVec::new();
        MoveGenerator::new(&state, &mut moves).pseudo_legal_piece_moves();

        let origins = moves.iter().map(|m| m.from_square()).collect::<Vec<_>>();
        let mut sorted = origins.clone();
        sorted.sort();

        assert_eq!(origins, sorted);
    }
}
