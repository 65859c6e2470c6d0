use super::board_move::BoardMove;
use super::pieces::{Color, Piece, PieceType};
use super::square::Position;
use strum::IntoEnumIterator;

pub type PieceBoard = [[Option<Piece>; 8]; 8];

/// Plain storage of up to 64 pieces. No rules are checked here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: PieceBoard,
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Board {
    /// An empty board.
    pub fn new() -> Board {
        Board::default()
    }

    /// A board in the standard starting position.
    pub fn starting() -> Board {
        let mut board = Board::new();
        board.reset_board();
        board
    }

    /// Writes `piece` (or clears the square) and returns whatever was there before.
    pub fn add_piece(&mut self, position: Position, piece: Option<Piece>) -> Option<Piece> {
        let (row, column) = position.index();
        std::mem::replace(&mut self.squares[row][column], piece)
    }

    pub fn get_piece(&self, position: Position) -> Option<Piece> {
        let (row, column) = position.index();
        self.squares[row][column]
    }

    pub fn find_piece(&self, piece_type: PieceType, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(color, piece_type))
            .map(|(position, _)| position)
    }

    pub fn find_all_pieces_of_color(&self, color: Color) -> Vec<Position> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(position, _)| position)
            .collect()
    }

    /// Occupied squares, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|position| self.get_piece(position).map(|piece| (position, piece)))
    }

    pub fn reset_board(&mut self) {
        self.squares = PieceBoard::default();

        for color in Color::iter() {
            let back_row = color.back_row();
            let pawn_row = color.pawn_start_row();

            for (column, piece_type) in (1..=8).zip(BACK_RANK) {
                self.add_piece(Position::new(back_row, column), Some(Piece::new(color, piece_type)));
                self.add_piece(Position::new(pawn_row, column), Some(Piece::new(color, PieceType::Pawn)));
            }
        }
    }

    /// Plays `board_move` for `piece` without any rule checks: clears the source and
    /// writes the piece (or its promoted form) to the destination. Returns the captured piece.
    pub(crate) fn apply_move(&mut self, piece: Piece, board_move: &BoardMove) -> Option<Piece> {
        let landing = match board_move.promotion {
            Some(promotion) => Piece::new(piece.color, promotion),
            None => piece,
        };

        self.add_piece(board_move.from, None);
        self.add_piece(board_move.to, Some(landing))
    }

    /// Temporarily plays `board_move` for `piece`. The two touched squares are put back
    /// when the returned guard goes out of scope, on every exit path.
    pub(crate) fn simulate(&mut self, piece: Piece, board_move: BoardMove) -> MoveSimulation<'_> {
        let source = self.get_piece(board_move.from);
        let captured = self.apply_move(piece, &board_move);

        MoveSimulation {
            board: self,
            board_move,
            source,
            captured,
        }
    }

    /// Dumps the board to the debug log, marking `marked` squares with a dot.
    pub fn print(&self, title: Option<&str>, marked: &[Position]) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }

        if let Some(title_text) = title {
            log::debug!("{}", title_text);
        }

        for row in (1..=8).rev() {
            let mut line = format!("{} ", row);

            for column in 1..=8 {
                let position = Position::new(row, column);

                line.push(match self.get_piece(position) {
                    Some(piece) => piece.to_char(),
                    None if marked.contains(&position) => '•',
                    None => '.',
                });
                line.push(' ');
            }

            log::debug!("{}", line);
        }

        log::debug!("  a b c d e f g h");
    }
}

pub(crate) struct MoveSimulation<'a> {
    board: &'a mut Board,
    board_move: BoardMove,
    source: Option<Piece>,
    captured: Option<Piece>,
}

impl MoveSimulation<'_> {
    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for MoveSimulation<'_> {
    fn drop(&mut self) {
        self.board.add_piece(self.board_move.to, self.captured);
        self.board.add_piece(self.board_move.from, self.source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_thirty_two_pieces() {
        let board = Board::starting();

        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.find_all_pieces_of_color(Color::White).len(), 16);
        assert_eq!(board.find_all_pieces_of_color(Color::Black).len(), 16);
        assert_eq!(board.find_piece(PieceType::King, Color::White), Some(Position::new(1, 5)));
        assert_eq!(board.find_piece(PieceType::King, Color::Black), Some(Position::new(8, 5)));
        assert_eq!(
            board.get_piece(Position::new(8, 4)),
            Some(Piece::new(Color::Black, PieceType::Queen))
        );
        assert_eq!(board.get_piece(Position::new(4, 4)), None);
    }

    #[test]
    fn reset_clears_stray_pieces() {
        let mut board = Board::new();
        board.add_piece(Position::new(5, 5), Some(Piece::new(Color::Black, PieceType::Queen)));
        board.reset_board();

        assert_eq!(board.get_piece(Position::new(5, 5)), None);
        assert_eq!(board, Board::starting());
    }

    #[test]
    fn simulation_restores_both_squares() {
        let mut board = Board::new();
        let rook = Piece::new(Color::White, PieceType::Rook);
        let knight = Piece::new(Color::Black, PieceType::Knight);
        board.add_piece(Position::new(1, 1), Some(rook));
        board.add_piece(Position::new(1, 8), Some(knight));

        let before = board.clone();

        {
            let simulation = board.simulate(rook, BoardMove::new(Position::new(1, 1), Position::new(1, 8)));
            assert_eq!(simulation.board().get_piece(Position::new(1, 8)), Some(rook));
            assert_eq!(simulation.board().get_piece(Position::new(1, 1)), None);
        }

        assert_eq!(board, before);
    }

    #[test]
    fn simulation_restores_after_promotion() {
        let mut board = Board::new();
        let pawn = Piece::new(Color::White, PieceType::Pawn);
        board.add_piece(Position::new(7, 1), Some(pawn));

        let before = board.clone();
        let promotion = BoardMove::promoting(Position::new(7, 1), Position::new(8, 1), PieceType::Knight);

        {
            let simulation = board.simulate(pawn, promotion);
            assert_eq!(
                simulation.board().get_piece(Position::new(8, 1)),
                Some(Piece::new(Color::White, PieceType::Knight))
            );
        }

        assert_eq!(board, before);
    }

    #[test]
    fn simulation_restores_when_unwinding() {
        let mut board = Board::starting();
        let before = board.clone();
        let knight = Piece::new(Color::White, PieceType::Knight);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let simulation = board.simulate(knight, BoardMove::new(Position::new(1, 7), Position::new(7, 6)));
            assert_eq!(simulation.board().get_piece(Position::new(7, 6)), Some(knight));
            panic!("interrupted while simulating");
        }));

        assert!(result.is_err());
        assert_eq!(board, before);
    }
}
