use crate::{
    board::{Move, MoveBuilder, PieceType, Square},
    move_gen::{MoveGenerator, POSSIBLE_PROMOTIONS},
};

impl<'state, 'moves> MoveGenerator<'state, 'moves> {
    /// Generates the captures and pushes of the pawn on `from`, left capture
    /// first, then pushes, then right capture. A pawn reaching the last rank
    /// produces one move per promotion target.
    pub(in crate::move_gen) fn pseudo_legal_pawn_moves(&mut self, from: Square) {
        let dy = self.to_move.pawn_direction();

        for dx in [-1, 0, 1] {
            let Some(to) = from.offset(dx, dy) else {
                continue;
            };

            if dx == 0 {
                if !self.board.is_empty_at(to) {
                    continue;
                }
                self.push_pawn_move(Move::builder(from, to, PieceType::Pawn));

                if from.rank() == self.to_move.pawn_rank() {
                    if let Some(double) = to.offset(0, dy) {
                        if self.board.is_empty_at(double) {
                            self.out_moves.push(
                                Move::builder(from, double, PieceType::Pawn)
                                    .is_double_pawn_push()
                                    .build(),
                            );
                        }
                    }
                }
            } else if self.board.is_enemy_at(to, self.to_move) {
                self.push_pawn_move(Move::builder(from, to, PieceType::Pawn));
            }
        }
    }

    fn push_pawn_move(&mut self, builder: MoveBuilder) {
        if builder.to.rank() == self.to_move.promotion_rank() {
            for &promotion in POSSIBLE_PROMOTIONS {
                self.out_moves.push(builder.promotes_to(promotion).build());
            }
        } else {
            self.out_moves.push(builder.build());
        }
    }

    /// Generates captures of a pawn that has just advanced two squares.
    pub(in crate::move_gen) fn pseudo_legal_en_passants(&mut self) {
        let Some(target) = self.state.en_passant_target() else {
            return;
        };

        let pawn = PieceType::Pawn.with_color(self.to_move);
        let dy = self.to_move.pawn_direction();

        for dx in [-1, 1] {
            let Some(from) = target.offset(dx, -dy) else {
                continue;
            };

            if self.board[from] == Some(pawn) {
                self.out_moves.push(
                    Move::builder(from, target, PieceType::Pawn)
                        .is_en_passant()
                        .build(),
                );
            }
        }
    }
}
