pub mod board;
pub mod board_move;
pub mod errors;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod pieces;
pub mod square;

pub use board::*;
pub use board_move::*;
pub use errors::*;
pub use fen::*;
pub use game::*;
pub use pieces::*;
pub use square::*;
