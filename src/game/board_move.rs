use crate::game::errors::ParseError;
use crate::game::pieces::PieceType;
use crate::game::square::Position;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardMove {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceType>,
}

impl BoardMove {
    pub const fn new(from: Position, to: Position) -> BoardMove {
        BoardMove {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn promoting(from: Position, to: Position, promotion: PieceType) -> BoardMove {
        BoardMove {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Long algebraic notation, e.g. `e2e4` or `e7e8q`.
    pub fn parse(string: &str) -> Result<BoardMove, ParseError> {
        let invalid = || ParseError::InvalidMove(string.to_string());

        if !string.is_ascii() || !(4..=5).contains(&string.len()) {
            return Err(invalid());
        }

        let from = Position::parse(&string[0..2]).map_err(|_| invalid())?;
        let to = Position::parse(&string[2..4]).map_err(|_| invalid())?;

        let promotion = match string[4..].chars().next() {
            None => None,
            Some(c) => match PieceType::from_char(c) {
                Some(piece_type) if PieceType::PROMOTIONS.contains(&piece_type) => Some(piece_type),
                _ => return Err(invalid()),
            },
        };

        Ok(BoardMove {
            from,
            to,
            promotion,
        })
    }

    pub fn unparse(&self) -> String {
        format!(
            "{}{}{}",
            self.from.unparse(),
            self.to.unparse(),
            self.promotion
                .map(|p| p.to_char().to_string())
                .unwrap_or_default()
        )
    }
}

impl fmt::Display for BoardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unparse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_algebraic_moves() {
        let board_move = BoardMove::parse("e2e4").unwrap();
        assert_eq!(board_move, BoardMove::new(Position::new(2, 5), Position::new(4, 5)));

        let promotion = BoardMove::parse("a7a8n").unwrap();
        assert_eq!(promotion.promotion, Some(PieceType::Knight));
        assert_eq!(promotion.unparse(), "a7a8n");
    }

    #[test]
    fn rejects_malformed_moves() {
        for bad in ["", "e2", "e2e", "e2e9", "e7e8k", "e7e8p", "e2e4qq", "é2e4"] {
            assert!(BoardMove::parse(bad).is_err(), "{bad} should not parse");
        }
    }
}
