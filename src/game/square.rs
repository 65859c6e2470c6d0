use crate::game::errors::ParseError;
use std::fmt;

/// A square on the board, 1-based: row 1 is White's back rank, column 1 is the a-file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Panics if either coordinate is outside 1..=8.
    pub const fn new(row: u8, column: u8) -> Position {
        assert!(
            Self::is_on_board(row as i8, column as i8),
            "square outside the board"
        );

        Position { row, column }
    }

    pub const fn try_new(row: i8, column: i8) -> Option<Position> {
        if Self::is_on_board(row, column) {
            Some(Position {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    pub const fn is_on_board(row: i8, column: i8) -> bool {
        row >= 1 && row <= 8 && column >= 1 && column <= 8
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub const fn column(&self) -> u8 {
        self.column
    }

    /// The square `(row_step, column_step)` away, if it is still on the board.
    pub const fn offset(&self, row_step: i8, column_step: i8) -> Option<Position> {
        Self::try_new(self.row as i8 + row_step, self.column as i8 + column_step)
    }

    pub(crate) const fn index(&self) -> (usize, usize) {
        (self.row as usize - 1, self.column as usize - 1)
    }

    /// All 64 squares, rank by rank from a1 to h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=8).flat_map(|row| (1..=8).map(move |column| Position { row, column }))
    }

    pub fn parse(string: &str) -> Result<Position, ParseError> {
        let mut chars = string.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Ok(Position {
                row: rank as u8 - b'0',
                column: file as u8 - b'a' + 1,
            }),
            _ => Err(ParseError::InvalidSquare(string.to_string())),
        }
    }

    pub fn unparse(&self) -> String {
        format!(
            "{}{}",
            (self.column - 1 + b'a') as char,
            (self.row + b'0') as char
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unparse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algebraic_squares() {
        assert_eq!(Position::parse("a1").unwrap(), Position::new(1, 1));
        assert_eq!(Position::parse("e2").unwrap(), Position::new(2, 5));
        assert_eq!(Position::parse("h8").unwrap(), Position::new(8, 8));
        assert_eq!(Position::new(4, 7).unparse(), "g4");
    }

    #[test]
    fn rejects_squares_off_the_board() {
        for bad in ["", "e", "i1", "a0", "a9", "e22", "E2"] {
            assert!(Position::parse(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn offset_stops_at_the_edge() {
        let corner = Position::new(1, 8);

        assert_eq!(corner.offset(1, -1), Some(Position::new(2, 7)));
        assert_eq!(corner.offset(0, 1), None);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(Position::all().count(), 64);
    }
}
