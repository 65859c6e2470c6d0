use super::board::Board;
use super::board_move::BoardMove;
use super::pieces::{Piece, PieceType};
use super::square::Position;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROYAL: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (-1, 2),
    (-1, -2),
];

impl Piece {
    /// Pseudo-legal moves from `position`: movement, blocking and capture rules only.
    /// Whether the move leaves our own king in check is not considered.
    pub fn piece_moves(&self, board: &Board, position: Position) -> Vec<BoardMove> {
        let mut moves = Vec::new();

        match self.piece_type {
            PieceType::King => self.add_single_moves(&ROYAL, board, position, &mut moves),
            PieceType::Knight => self.add_single_moves(&KNIGHT_JUMPS, board, position, &mut moves),
            PieceType::Queen => self.add_sliding_moves(&ROYAL, board, position, &mut moves),
            PieceType::Rook => self.add_sliding_moves(&ORTHOGONAL, board, position, &mut moves),
            PieceType::Bishop => self.add_sliding_moves(&DIAGONAL, board, position, &mut moves),
            PieceType::Pawn => self.add_pawn_moves(board, position, &mut moves),
        }

        moves
    }

    fn is_enemy(&self, other: Piece) -> bool {
        other.color != self.color
    }

    fn add_single_moves(
        &self,
        steps: &[(i8, i8)],
        board: &Board,
        position: Position,
        moves: &mut Vec<BoardMove>,
    ) {
        for &(row_step, column_step) in steps {
            let Some(target) = position.offset(row_step, column_step) else {
                continue;
            };

            match board.get_piece(target) {
                Some(other) if !self.is_enemy(other) => {}
                _ => moves.push(BoardMove::new(position, target)),
            }
        }
    }

    fn add_sliding_moves(
        &self,
        directions: &[(i8, i8)],
        board: &Board,
        position: Position,
        moves: &mut Vec<BoardMove>,
    ) {
        for &(row_step, column_step) in directions {
            let mut current = position;

            while let Some(target) = current.offset(row_step, column_step) {
                match board.get_piece(target) {
                    None => moves.push(BoardMove::new(position, target)),
                    Some(other) => {
                        if self.is_enemy(other) {
                            moves.push(BoardMove::new(position, target));
                        }
                        break;
                    }
                }

                current = target;
            }
        }
    }

    fn add_pawn_moves(&self, board: &Board, position: Position, moves: &mut Vec<BoardMove>) {
        let direction = self.color.pawn_direction();

        if let Some(one_step) = position.offset(direction, 0) {
            if board.get_piece(one_step).is_none() {
                self.add_pawn_move(position, one_step, moves);

                if position.row() == self.color.pawn_start_row() {
                    if let Some(two_steps) = one_step.offset(direction, 0) {
                        if board.get_piece(two_steps).is_none() {
                            self.add_pawn_move(position, two_steps, moves);
                        }
                    }
                }
            }
        }

        for column_step in [-1, 1] {
            let Some(target) = position.offset(direction, column_step) else {
                continue;
            };

            if board.get_piece(target).is_some_and(|other| self.is_enemy(other)) {
                self.add_pawn_move(position, target, moves);
            }
        }
    }

    // Landing on the last row fans out into one move per promotion choice.
    fn add_pawn_move(&self, from: Position, to: Position, moves: &mut Vec<BoardMove>) {
        if to.row() == self.color.promotion_row() {
            moves.extend(
                PieceType::PROMOTIONS
                    .iter()
                    .map(|&promotion| BoardMove::promoting(from, to, promotion)),
            );
        } else {
            moves.push(BoardMove::new(from, to));
        }
    }
}
