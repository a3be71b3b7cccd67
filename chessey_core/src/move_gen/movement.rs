//! Static movement geometry for each kind of piece, and the attack and
//! reachability tests built on it.

use crate::board::{BoardRepr, Color, Piece, PieceType, Square, State};

const KNIGHT_DELTAS: &[(i8, i8)] = &[(2, 1), (2, -1), (1, 2), (1, -2)];
const BISHOP_DELTAS: &[(i8, i8)] = &[(1, 1), (1, -1)];
const ROOK_DELTAS: &[(i8, i8)] = &[(0, 1), (1, 0)];
const QUEEN_DELTAS: &[(i8, i8)] = &[(1, 1), (1, -1), (0, 1), (1, 0)];

/// How a kind of piece moves.
///
/// Deltas are `(file, rank)` offsets and only list one of each pair of
/// opposite directions; [`MovementRule::directions`] adds the negations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementRule {
    /// Pawns move, capture and promote asymmetrically and are handled
    /// separately.
    Pawn,
    Piece {
        deltas: &'static [(i8, i8)],
        /// Whether the piece slides along its deltas (bishop, rook, queen) or
        /// jumps exactly once (knight, king).
        repeat: bool,
    },
}

impl MovementRule {
    pub const fn of(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => MovementRule::Pawn,
            PieceType::Knight => MovementRule::Piece {
                deltas: KNIGHT_DELTAS,
                repeat: false,
            },
            PieceType::Bishop => MovementRule::Piece {
                deltas: BISHOP_DELTAS,
                repeat: true,
            },
            PieceType::Rook => MovementRule::Piece {
                deltas: ROOK_DELTAS,
                repeat: true,
            },
            PieceType::Queen => MovementRule::Piece {
                deltas: QUEEN_DELTAS,
                repeat: true,
            },
            PieceType::King => MovementRule::Piece {
                deltas: QUEEN_DELTAS,
                repeat: false,
            },
        }
    }

    /// All directions the piece can move in: each delta followed by all the
    /// negated deltas. Pawns have none.
    pub fn directions(self) -> impl Iterator<Item = (i8, i8)> {
        let deltas: &'static [(i8, i8)] = match self {
            MovementRule::Pawn => &[],
            MovementRule::Piece { deltas, .. } => deltas,
        };

        deltas
            .iter()
            .copied()
            .chain(deltas.iter().map(|&(dx, dy)| (-dx, -dy)))
    }

    /// How many steps the piece may take along one direction.
    pub const fn max_steps(self) -> u8 {
        match self {
            MovementRule::Piece { repeat: true, .. } => 8,
            _ => 1,
        }
    }
}

/// The two squares a pawn of `color` on `from` attacks.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let dy = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |dx| from.offset(dx, dy))
}

impl BoardRepr {
    /// Returns true if `piece`, standing on `from`, attacks `target`.
    ///
    /// A sliding piece stops at the first occupied square it meets, but that
    /// square is itself attacked whatever colour the blocker is.
    pub fn can_piece_attack_square(&self, from: Square, target: Square, piece: Piece) -> bool {
        let rule = MovementRule::of(piece.piece_type());

        if rule == MovementRule::Pawn {
            return pawn_attacks(from, piece.color()).any(|square| square == target);
        }

        for (dx, dy) in rule.directions() {
            let mut square = from;
            for _ in 0..rule.max_steps() {
                square = match square.offset(dx, dy) {
                    Some(next) => next,
                    None => break,
                };

                if square == target {
                    return true;
                }
                if !self.is_empty_at(square) {
                    break;
                }
            }
        }

        false
    }

    /// Returns true if any piece of colour `by` attacks `square`.
    pub fn is_under_attack(&self, square: Square, by: Color) -> bool {
        self.pieces_of(by)
            .any(|(piece, from)| self.can_piece_attack_square(from, square, piece))
    }
}

impl State {
    /// Returns true if the pawn on `from` may move to `to`, ignoring king
    /// safety: a single or initial double step onto empty squares, a diagonal
    /// capture of an enemy piece, or an en passant capture.
    pub fn can_pawn_move_to(&self, from: Square, to: Square) -> bool {
        let board = self.board();
        let color = board
            .piece_at(from)
            .map_or(self.to_move(), Piece::color);
        let dy = color.pawn_direction();

        if from.file() == to.file() {
            let Some(one_step) = from.offset(0, dy) else {
                return false;
            };
            if !board.is_empty_at(one_step) {
                return false;
            }
            if to == one_step {
                return true;
            }

            from.rank() == color.pawn_rank()
                && one_step.offset(0, dy) == Some(to)
                && board.is_empty_at(to)
        } else {
            if !pawn_attacks(from, color).any(|square| square == to) {
                return false;
            }

            board.is_enemy_at(to, color)
                || (color == self.to_move() && self.en_passant_target() == Some(to))
        }
    }

    /// Returns true if a piece of kind `piece_type` on `from` may move to
    /// `to`, ignoring king safety.
    ///
    /// The destination must not hold a piece of the mover's colour, and a
    /// sliding piece needs every square strictly between `from` and `to` to
    /// be empty.
    pub fn can_piece_move_to(&self, from: Square, to: Square, piece_type: PieceType) -> bool {
        let board = self.board();
        let color = board
            .piece_at(from)
            .map_or(self.to_move(), Piece::color);

        if from == to || board.is_ally_at(to, color) {
            return false;
        }

        let rule = MovementRule::of(piece_type);
        if rule == MovementRule::Pawn {
            return self.can_pawn_move_to(from, to);
        }

        let dx = to.file() as i8 - from.file() as i8;
        let dy = to.rank() as i8 - from.rank() as i8;

        if rule.max_steps() == 1 {
            return rule.directions().any(|delta| delta == (dx, dy));
        }

        let aligned = dx == 0 || dy == 0 || dx.abs() == dy.abs();
        if !aligned {
            return false;
        }

        let step = (dx.signum(), dy.signum());
        if !rule.directions().any(|delta| delta == step) {
            return false;
        }

        let distance = dx.abs().max(dy.abs());
        (1..distance).all(|k| {
            from.offset(step.0 * k, step.1 * k)
                .is_some_and(|square| board.is_empty_at(square))
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::board::Castling;

    fn state(diagram: &str, to_move: Color) -> State {
        State::new(diagram.parse().unwrap(), to_move, Castling::empty(), None)
    }

    #[test]
    fn movement_rule_directions() {
        let knight = MovementRule::of(PieceType::Knight).directions().collect::<Vec<_>>();
        assert_eq!(
            knight,
            vec![
                (2, 1),
                (2, -1),
                (1, 2),
                (1, -2),
                (-2, -1),
                (-2, 1),
                (-1, -2),
                (-1, 2)
            ]
        );

        let rook = MovementRule::of(PieceType::Rook).directions().collect::<Vec<_>>();
        assert_eq!(rook, vec![(0, 1), (1, 0), (0, -1), (-1, 0)]);

        assert_eq!(MovementRule::of(PieceType::Pawn).directions().count(), 0);
        assert_eq!(MovementRule::of(PieceType::Queen).directions().count(), 8);
    }

    #[test]
    fn movement_rule_king_is_non_repeating_queen() {
        assert_eq!(
            MovementRule::of(PieceType::King),
            MovementRule::Piece {
                deltas: QUEEN_DELTAS,
                repeat: false,
            }
        );
        assert_eq!(
            MovementRule::of(PieceType::Queen),
            MovementRule::Piece {
                deltas: &[(1, 1), (1, -1), (0, 1), (1, 0)],
                repeat: true,
            }
        );
        assert_eq!(MovementRule::of(PieceType::King).max_steps(), 1);
        assert_eq!(MovementRule::of(PieceType::Bishop).max_steps(), 8);
    }

    #[test]
    fn pawn_attack_geometry() {
        let board = BoardRepr::default();

        assert!(board.can_piece_attack_square(Square::E4, Square::D5, Piece::WHITE_PAWN));
        assert!(board.can_piece_attack_square(Square::E4, Square::F5, Piece::WHITE_PAWN));
        assert!(!board.can_piece_attack_square(Square::E4, Square::E5, Piece::WHITE_PAWN));
        assert!(!board.can_piece_attack_square(Square::E4, Square::D3, Piece::WHITE_PAWN));

        assert!(board.can_piece_attack_square(Square::E4, Square::D3, Piece::BLACK_PAWN));
        assert!(!board.can_piece_attack_square(Square::A4, Square::H3, Piece::BLACK_PAWN));
    }

    #[test]
    fn sliders_stop_at_blockers_inclusive() {
        let board: BoardRepr = "
            ........
            ........
            ........
            ........
            ...P....
            ........
            .b......
            r..p....
        "
        .parse()
        .unwrap();

        // Blocked by the white pawn on d1, which is still "attacked".
        assert!(board.can_piece_attack_square(Square::A1, Square::D1, Piece::WHITE_ROOK));
        assert!(!board.can_piece_attack_square(Square::A1, Square::E1, Piece::WHITE_ROOK));
        assert!(board.can_piece_attack_square(Square::A1, Square::A8, Piece::WHITE_ROOK));

        assert!(board.can_piece_attack_square(Square::B2, Square::D4, Piece::WHITE_BISHOP));
        assert!(!board.can_piece_attack_square(Square::B2, Square::E5, Piece::WHITE_BISHOP));
        assert!(board.can_piece_attack_square(Square::B2, Square::A1, Piece::WHITE_BISHOP));
    }

    #[test]
    fn jumpers_ignore_blockers() {
        let board = BoardRepr::starting_position();

        assert!(board.can_piece_attack_square(Square::B1, Square::C3, Piece::WHITE_KNIGHT));
        assert!(board.can_piece_attack_square(Square::B1, Square::D2, Piece::WHITE_KNIGHT));
        assert!(!board.can_piece_attack_square(Square::B1, Square::B3, Piece::WHITE_KNIGHT));
        assert!(board.can_piece_attack_square(Square::E1, Square::F2, Piece::WHITE_KING));
        assert!(!board.can_piece_attack_square(Square::E1, Square::E3, Piece::WHITE_KING));
    }

    #[test]
    fn is_under_attack_by_color() {
        let board = BoardRepr::starting_position();

        assert!(board.is_under_attack(Square::F3, Color::White));
        assert!(!board.is_under_attack(Square::F3, Color::Black));
        assert!(board.is_under_attack(Square::F6, Color::Black));
        assert!(!board.is_under_attack(Square::E4, Color::White));
        assert!(!board.is_under_attack(Square::E5, Color::Black));
    }

    #[test]
    fn can_pawn_move_to_steps() {
        let state = state(
            "
                ....K...
                ........
                ........
                ........
                ........
                ..P.....
                ..pp....
                ....k...
            ",
            Color::White,
        );

        assert!(state.can_pawn_move_to(Square::D2, Square::D3));
        assert!(state.can_pawn_move_to(Square::D2, Square::D4));
        assert!(state.can_pawn_move_to(Square::D2, Square::C3));
        assert!(!state.can_pawn_move_to(Square::D2, Square::E3));
        assert!(!state.can_pawn_move_to(Square::D2, Square::D5));

        // Blocked by the black pawn on c3.
        assert!(!state.can_pawn_move_to(Square::C2, Square::C3));
        assert!(!state.can_pawn_move_to(Square::C2, Square::C4));
    }

    #[test]
    fn can_pawn_move_to_en_passant() {
        let state = State::new(
            "
                ....K...
                ........
                ........
                ...pP...
                ........
                ........
                ........
                ....k...
            "
            .parse()
            .unwrap(),
            Color::White,
            Castling::empty(),
            Some(4),
        );

        assert!(state.can_pawn_move_to(Square::D5, Square::E6));
        assert!(!state.can_pawn_move_to(Square::D5, Square::C6));
    }

    #[test]
    fn can_piece_move_to_checks_path_and_destination() {
        let state = state(
            "
                ....K...
                ........
                ........
                ........
                ........
                ........
                ........
                r..pk..r
            ",
            Color::White,
        );

        assert!(state.can_piece_move_to(Square::A1, Square::C1, PieceType::Rook));
        assert!(!state.can_piece_move_to(Square::A1, Square::D1, PieceType::Rook));
        assert!(!state.can_piece_move_to(Square::A1, Square::E1, PieceType::Rook));
        assert!(state.can_piece_move_to(Square::A1, Square::A8, PieceType::Rook));
        assert!(!state.can_piece_move_to(Square::A1, Square::B2, PieceType::Rook));
        assert!(state.can_piece_move_to(Square::H1, Square::F1, PieceType::Rook));

        assert!(state.can_piece_move_to(Square::E1, Square::F2, PieceType::King));
        assert!(!state.can_piece_move_to(Square::E1, Square::D1, PieceType::King));
        assert!(!state.can_piece_move_to(Square::E1, Square::G1, PieceType::King));
    }
}
