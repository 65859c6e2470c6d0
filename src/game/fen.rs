use super::board::Board;
use super::errors::ParseError;
use super::game::{CastleSide, CastlingRights, Game};
use super::pieces::{Color, Piece};
use super::square::Position;
use strum::IntoEnumIterator;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn invalid(reason: impl Into<String>) -> ParseError {
    ParseError::InvalidFen(reason.into())
}

impl Board {
    /// Parses the piece-placement field of a FEN string (rank 8 first).
    pub fn from_placement(placement: &str) -> Result<Board, ParseError> {
        let ranks: Vec<&str> = placement.split('/').collect();

        if ranks.len() != 8 {
            return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
        }

        let mut board = Board::new();

        for (rank, row) in ranks.iter().zip((1..=8u8).rev()) {
            let mut column = 1u8;

            for char in rank.chars() {
                // Numbers encode empty spaces
                if let Some(empty) = char.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        return Err(invalid(format!("bad empty run '{}' on rank {}", char, row)));
                    }

                    column += empty as u8;

                    if column > 9 {
                        return Err(invalid(format!("rank {} is too long", row)));
                    }
                    continue;
                }

                let piece = Piece::from_char(char)
                    .ok_or_else(|| invalid(format!("unknown piece '{}'", char)))?;

                if column > 8 {
                    return Err(invalid(format!("rank {} is too long", row)));
                }

                board.add_piece(Position::new(row, column), Some(piece));
                column += 1;
            }

            if column != 9 {
                return Err(invalid(format!("rank {} does not have 8 squares", row)));
            }
        }

        Ok(board)
    }

    pub fn to_placement(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for row in (1..=8).rev() {
            let mut rank = String::new();
            let mut empty = 0;

            for column in 1..=8 {
                match self.get_piece(Position::new(row, column)) {
                    Some(piece) => {
                        if empty > 0 {
                            rank.push_str(&empty.to_string());
                            empty = 0;
                        }
                        rank.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                rank.push_str(&empty.to_string());
            }

            ranks.push(rank);
        }

        ranks.join("/")
    }
}

const CASTLING_LETTERS: [(char, Color, CastleSide); 4] = [
    ('K', Color::White, CastleSide::KingsSide),
    ('Q', Color::White, CastleSide::QueensSide),
    ('k', Color::Black, CastleSide::KingsSide),
    ('q', Color::Black, CastleSide::QueensSide),
];

impl Game {
    /// Restores a game from FEN. En passant and the move clocks are accepted but ignored.
    pub fn from_fen(fen: &str) -> Result<Game, ParseError> {
        let mut parts = fen.split_whitespace();

        let board = Board::from_placement(parts.next().ok_or_else(|| invalid("empty string"))?)?;

        let turn = match parts.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(invalid(format!("unknown side to move '{}'", other))),
            None => return Err(invalid("missing side to move")),
        };

        let availability = parts.next().unwrap_or("-");

        if availability != "-"
            && !availability
                .chars()
                .all(|c| CASTLING_LETTERS.iter().any(|(letter, _, _)| *letter == c))
        {
            return Err(invalid(format!("bad castling field '{}'", availability)));
        }

        // A missing letter means that rook has moved; losing both sides means the king has.
        let mut castling = CastlingRights::default();
        for (letter, color, side) in CASTLING_LETTERS {
            if !availability.contains(letter) {
                castling.mark_rook_moved(color, side);
            }
        }
        for color in Color::iter() {
            if castling.rook_moved(color, CastleSide::KingsSide)
                && castling.rook_moved(color, CastleSide::QueensSide)
            {
                castling.mark_king_moved(color);
            }
        }

        Ok(Game::from_parts(board, turn, castling))
    }

    pub fn to_fen(&self) -> String {
        let castling = self.castling_rights();

        let availability: String = CASTLING_LETTERS
            .iter()
            .filter(|(_, color, side)| !castling.king_moved(*color) && !castling.rook_moved(*color, *side))
            .map(|(letter, _, _)| *letter)
            .collect();

        format!(
            "{} {} {} - 0 1",
            self.board().to_placement(),
            match self.team_turn() {
                Color::White => "w",
                Color::Black => "b",
            },
            if availability.is_empty() { "-" } else { availability.as_str() },
        )
    }
}
