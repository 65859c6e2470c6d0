use crate::game::board_move::BoardMove;
use crate::game::pieces::Color;
use crate::game::square::Position;
use std::fmt;

/// Why `Game::make_move` refused a move. A refused move leaves the game untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidMove {
    NoPiece(Position),
    WrongTurn { expected: Color, found: Color },
    IllegalMove(BoardMove),
    GameOver,
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMove::NoPiece(square) => write!(f, "no piece at {}", square),
            InvalidMove::WrongTurn { expected, found } => {
                write!(f, "it is {}'s turn, not {}'s", expected, found)
            }
            InvalidMove::IllegalMove(board_move) => write!(f, "{} is not a legal move", board_move),
            InvalidMove::GameOver => write!(f, "the game is over"),
        }
    }
}

impl std::error::Error for InvalidMove {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    InvalidSquare(String),
    InvalidMove(String),
    InvalidFen(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidSquare(text) => write!(f, "invalid square '{}'", text),
            ParseError::InvalidMove(text) => write!(f, "invalid move '{}'", text),
            ParseError::InvalidFen(reason) => write!(f, "invalid FEN: {}", reason),
        }
    }
}

impl std::error::Error for ParseError {}
