use super::board::Board;
use super::board_move::BoardMove;
use super::errors::InvalidMove;
use super::pieces::{Color, Piece, PieceType};
use super::square::Position;
use std::fmt;

const KING_HOME_COLUMN: u8 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingsSide,
    QueensSide,
}

impl CastleSide {
    pub const fn rook_column(self) -> u8 {
        match self {
            CastleSide::KingsSide => 8,
            CastleSide::QueensSide => 1,
        }
    }

    /// Columns strictly between the king and the rook.
    const fn between_columns(self) -> &'static [u8] {
        match self {
            CastleSide::KingsSide => &[6, 7],
            CastleSide::QueensSide => &[2, 3, 4],
        }
    }

    /// Columns the king crosses or lands on, in order.
    const fn king_path_columns(self) -> &'static [u8] {
        match self {
            CastleSide::KingsSide => &[6, 7],
            CastleSide::QueensSide => &[4, 3],
        }
    }
}

/// Has-moved flags for both kings and all four rooks. Flags only ever go from false to true.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_kings_rook_moved: bool,
    pub white_queens_rook_moved: bool,
    pub black_kings_rook_moved: bool,
    pub black_queens_rook_moved: bool,
}

impl CastlingRights {
    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingsSide) => self.white_kings_rook_moved,
            (Color::White, CastleSide::QueensSide) => self.white_queens_rook_moved,
            (Color::Black, CastleSide::KingsSide) => self.black_kings_rook_moved,
            (Color::Black, CastleSide::QueensSide) => self.black_queens_rook_moved,
        }
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_moved = true,
            Color::Black => self.black_king_moved = true,
        }
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::KingsSide) => self.white_kings_rook_moved = true,
            (Color::White, CastleSide::QueensSide) => self.white_queens_rook_moved = true,
            (Color::Black, CastleSide::KingsSide) => self.black_kings_rook_moved = true,
            (Color::Black, CastleSide::QueensSide) => self.black_queens_rook_moved = true,
        }
    }

    /// Sets the flag for a king or rook leaving its home square.
    fn record(&mut self, piece: Piece, from: Position) {
        if from.row() != piece.color.back_row() {
            return;
        }

        match piece.piece_type {
            PieceType::King if from.column() == KING_HOME_COLUMN => self.mark_king_moved(piece.color),
            PieceType::Rook => {
                for side in [CastleSide::KingsSide, CastleSide::QueensSide] {
                    if from.column() == side.rook_column() {
                        self.mark_rook_moved(piece.color, side);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Classification of the side to move, computed on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Color),
    Checkmate(Color),
    Stalemate(Color),
    Resigned(Color),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate(_) | GameStatus::Stalemate(_) | GameStatus::Resigned(_)
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check(color) => write!(f, "check {}", color),
            GameStatus::Checkmate(color) => write!(f, "checkmate {}", color),
            GameStatus::Stalemate(color) => write!(f, "stalemate {}", color),
            GameStatus::Resigned(color) => write!(f, "resigned {}", color),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    resigned: Option<Color>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A fresh game in the starting position, White to move.
    pub fn new() -> Game {
        Game::from_parts(Board::starting(), Color::White, CastlingRights::default())
    }

    pub fn from_parts(board: Board, turn: Color, castling: CastlingRights) -> Game {
        Game {
            board,
            turn,
            castling,
            resigned: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn team_turn(&self) -> Color {
        self.turn
    }

    pub fn set_team_turn(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Legal moves for the piece on `position`, or `None` if the square is empty.
    pub fn valid_moves(&self, position: Position) -> Option<Vec<BoardMove>> {
        let piece = self.board.get_piece(position)?;
        let mut scratch = self.board.clone();

        let moves = piece
            .piece_moves(&self.board, position)
            .into_iter()
            .filter(|&board_move| {
                let simulation = scratch.simulate(piece, board_move);
                let exposed = is_king_attacked(simulation.board(), piece.color);

                if exposed {
                    log::trace!("{} dropped, it leaves {:?} in check", board_move, piece.color);
                }

                !exposed
            })
            .collect();

        Some(moves)
    }

    /// Legal moves for every piece of `color`.
    pub fn all_valid_moves(&self, color: Color) -> Vec<BoardMove> {
        self.board
            .find_all_pieces_of_color(color)
            .into_iter()
            .flat_map(|position| self.valid_moves(position).unwrap_or_default())
            .collect()
    }

    fn has_no_valid_moves(&self, color: Color) -> bool {
        self.board
            .find_all_pieces_of_color(color)
            .into_iter()
            .all(|position| self.valid_moves(position).is_none_or(|moves| moves.is_empty()))
    }

    /// Validates and plays `board_move`. On error nothing changes.
    pub fn make_move(&mut self, board_move: BoardMove) -> Result<(), InvalidMove> {
        if self.resigned.is_some() {
            return Err(InvalidMove::GameOver);
        }

        let piece = self
            .board
            .get_piece(board_move.from)
            .ok_or(InvalidMove::NoPiece(board_move.from))?;

        if piece.color != self.turn {
            return Err(InvalidMove::WrongTurn {
                expected: self.turn,
                found: piece.color,
            });
        }

        let is_legal = self
            .valid_moves(board_move.from)
            .is_some_and(|moves| moves.contains(&board_move));

        if !is_legal {
            log::debug!("Rejected {} for {:?}", board_move, piece.color);
            return Err(InvalidMove::IllegalMove(board_move));
        }

        self.apply_legal_move(piece, board_move);

        Ok(())
    }

    /// Plays a move already known to be legal for `piece`.
    pub(crate) fn apply_legal_move(&mut self, piece: Piece, board_move: BoardMove) {
        self.board.apply_move(piece, &board_move);
        self.castling.record(piece, board_move.from);
        self.turn = !self.turn;
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        if self.board.find_piece(PieceType::King, color).is_none() {
            log::warn!("No {} king on the board, treating it as not in check", color);
            return false;
        }

        is_king_attacked(&self.board, color)
    }

    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.has_no_valid_moves(color)
    }

    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.has_no_valid_moves(color)
    }

    pub fn can_castle_kings_side(&self, color: Color) -> bool {
        self.can_castle(color, CastleSide::KingsSide)
    }

    pub fn can_castle_queens_side(&self, color: Color) -> bool {
        self.can_castle(color, CastleSide::QueensSide)
    }

    /// Eligibility only; castling itself is never played by `make_move`.
    fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        if self.castling.king_moved(color) || self.castling.rook_moved(color, side) {
            return false;
        }

        let row = color.back_row();
        let king_home = Position::new(row, KING_HOME_COLUMN);
        let king = Piece::new(color, PieceType::King);

        if self.board.get_piece(king_home) != Some(king)
            || self.board.get_piece(Position::new(row, side.rook_column()))
                != Some(Piece::new(color, PieceType::Rook))
        {
            return false;
        }

        if side
            .between_columns()
            .iter()
            .any(|&column| self.board.get_piece(Position::new(row, column)).is_some())
        {
            return false;
        }

        if self.is_in_check(color) {
            return false;
        }

        let mut scratch = self.board.clone();

        side.king_path_columns().iter().all(|&column| {
            let step = BoardMove::new(king_home, Position::new(row, column));
            let simulation = scratch.simulate(king, step);
            !is_king_attacked(simulation.board(), color)
        })
    }

    pub fn resign(&mut self, color: Color) -> Result<(), InvalidMove> {
        if self.resigned.is_some() {
            return Err(InvalidMove::GameOver);
        }

        log::info!("{:?} resigned", color);
        self.resigned = Some(color);

        Ok(())
    }

    /// Classifies the side to move.
    pub fn status(&self) -> GameStatus {
        if let Some(color) = self.resigned {
            return GameStatus::Resigned(color);
        }

        let color = self.turn;
        let in_check = self.is_in_check(color);

        match (in_check, self.has_no_valid_moves(color)) {
            (true, true) => GameStatus::Checkmate(color),
            (false, true) => GameStatus::Stalemate(color),
            (true, false) => GameStatus::Check(color),
            (false, false) => GameStatus::InProgress,
        }
    }
}

/// Whether any opposing piece has a pseudo-legal move onto `color`'s king.
/// A board without that king is never in check.
fn is_king_attacked(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_piece(PieceType::King, color) else {
        return false;
    };

    board
        .pieces()
        .filter(|(_, piece)| piece.color != color)
        .any(|(position, piece)| {
            piece
                .piece_moves(board, position)
                .iter()
                .any(|board_move| board_move.to == king)
        })
}
