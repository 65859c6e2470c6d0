use crate::game::{
    BoardMove, Game, GameStatus, InvalidMove, ParseError, PieceType, Position, STARTING_FEN,
};
use rayon::prelude::*;

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResultType {
    Success,                         // successful move
    InvalidNotation(ParseError),     // wrong algebraic notation
    InvalidMove(InvalidMove),        // rejected by the rules
}

pub struct GameController {
    pub game: Game,
    pub threads: usize,
    pool: Option<rayon::ThreadPool>,
}

impl Default for GameController {
    fn default() -> Self {
        GameController::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            threads: rayon::current_num_threads(),
            pool: None,
        }
    }

    pub fn new_game(&mut self) {
        log::info!("New game from {}", STARTING_FEN);
        self.game = Game::new();
    }

    pub fn new_game_from_fen(&mut self, fen: &str) -> Result<(), ParseError> {
        self.game = Game::from_fen(fen)?;
        log::info!("New game from {}", fen);
        Ok(())
    }

    /// Plays `moves` in order, stopping at the first one that fails.
    pub fn play_moves<S: AsRef<str>>(&mut self, moves: &[S]) -> MoveResultType {
        for notation in moves {
            match self.try_move_piece(notation.as_ref()) {
                MoveResultType::Success => {}
                failure => return failure,
            }
        }

        MoveResultType::Success
    }

    /// Accepts `e2e4`, `e7e8q` or `e2 e4`. A pawn reaching the last row without a
    /// promotion letter becomes a queen.
    pub fn parse_move(&self, notation: &str) -> Result<BoardMove, ParseError> {
        let compact: String = notation.split_whitespace().collect();
        let mut board_move = BoardMove::parse(&compact)?;

        if board_move.promotion.is_none() {
            if let Some(piece) = self.game.board().get_piece(board_move.from) {
                if piece.piece_type == PieceType::Pawn
                    && board_move.to.row() == piece.color.promotion_row()
                {
                    board_move.promotion = Some(PieceType::Queen);
                }
            }
        }

        Ok(board_move)
    }

    pub fn try_move_piece(&mut self, notation: &str) -> MoveResultType {
        let board_move = match self.parse_move(notation) {
            Ok(board_move) => board_move,
            Err(error) => return MoveResultType::InvalidNotation(error),
        };

        match self.game.make_move(board_move) {
            Ok(()) => {
                let status = self.game.status();

                if status != GameStatus::InProgress {
                    log::info!("{} -> {}", board_move, status);
                }

                MoveResultType::Success
            }
            Err(error) => MoveResultType::InvalidMove(error),
        }
    }

    /// Destination squares of the legal moves from `square`. Empty if nothing stands there.
    pub fn highlight(&self, square: &str) -> Result<Vec<Position>, ParseError> {
        let position = Position::parse(square)?;

        let mut destinations: Vec<Position> = self
            .game
            .valid_moves(position)
            .unwrap_or_default()
            .into_iter()
            .map(|board_move| board_move.to)
            .collect();
        destinations.sort();
        destinations.dedup();

        self.game.board().print(Some(format!("Moves from {}", position).as_str()), &destinations);

        Ok(destinations)
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> Result<(), InvalidMove> {
        let color = self.game.team_turn();
        self.game.resign(color)
    }

    pub fn set_threads(&mut self, threads: usize) {
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                self.threads = pool.current_num_threads();
                self.pool = Some(pool);
            }
            Err(error) => log::error!("Failed to build a pool of {} threads: {}", threads, error),
        }
    }

    pub fn set_option(&mut self, name: &str, value: &str) {
        match name.to_lowercase().as_str() {
            "threads" => match value.parse::<usize>() {
                Ok(threads) if (1..=1024).contains(&threads) => self.set_threads(threads),
                _ => log::warn!(
                    "Invalid value for Threads option: {}. Expected value between 1 and 1024",
                    value
                ),
            },
            _ => log::warn!("Unknown option: {}", name),
        }
    }

    /// Leaf counts `depth` plies deep, broken down by root move. Depth 0 has no root
    /// moves to break down, so it yields an empty list.
    pub fn perft(&self, depth: usize) -> Vec<(BoardMove, usize)> {
        if depth == 0 {
            log::warn!("perft needs a depth of at least 1");
            return vec![];
        }

        let game = &self.game;
        let root_moves = game.all_valid_moves(game.team_turn());

        let count_root = || {
            root_moves
                .par_iter()
                .filter_map(|&board_move| {
                    play_unchecked(game, board_move)
                        .map(|next| (board_move, count_leaves(&next, depth - 1)))
                })
                .collect::<Vec<_>>()
        };

        match &self.pool {
            Some(pool) => pool.install(count_root),
            None => count_root(),
        }
    }
}

fn play_unchecked(game: &Game, board_move: BoardMove) -> Option<Game> {
    let piece = game.board().get_piece(board_move.from)?;
    let mut next = game.clone();
    next.apply_legal_move(piece, board_move);
    Some(next)
}

fn count_leaves(game: &Game, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = game.all_valid_moves(game.team_turn());

    // Bulk counting
    if depth == 1 {
        return moves.len();
    }

    moves
        .into_iter()
        .filter_map(|board_move| play_unchecked(game, board_move))
        .map(|next| count_leaves(&next, depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Color;

    fn total(breakdown: &[(BoardMove, usize)]) -> usize {
        breakdown.iter().map(|(_, count)| count).sum()
    }

    #[test]
    fn perft_from_the_starting_position() {
        let controller = GameController::new();

        assert_eq!(total(&controller.perft(1)), 20);
        assert_eq!(total(&controller.perft(2)), 400);
        assert_eq!(total(&controller.perft(3)), 8902);
        assert!(controller.perft(0).is_empty());
    }

    #[test]
    fn perft_on_known_positions() {
        let mut controller = GameController::new();
        controller.set_threads(2);

        controller
            .new_game_from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
            .unwrap();
        assert_eq!(total(&controller.perft(1)), 14);
        assert_eq!(total(&controller.perft(2)), 191);

        controller
            .new_game_from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
            .unwrap();
        assert_eq!(total(&controller.perft(1)), 6);
    }

    #[test]
    fn two_token_moves_and_auto_queening() {
        let mut controller = GameController::new();
        controller
            .new_game_from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .unwrap();

        assert_eq!(controller.try_move_piece("a7 a8"), MoveResultType::Success);
        assert_eq!(
            controller.game.board().get_piece(Position::new(8, 1)).map(|p| p.piece_type),
            Some(PieceType::Queen)
        );
        assert_eq!(controller.status(), GameStatus::Check(Color::Black));
    }

    #[test]
    fn bad_notation_and_bad_moves_are_told_apart() {
        let mut controller = GameController::new();

        assert!(matches!(
            controller.try_move_piece("e2-e4"),
            MoveResultType::InvalidNotation(_)
        ));
        assert!(matches!(
            controller.try_move_piece("e2e5"),
            MoveResultType::InvalidMove(InvalidMove::IllegalMove(_))
        ));
        assert_eq!(
            controller.play_moves(&["e2e4", "e7e5", "e1e3"]),
            MoveResultType::InvalidMove(InvalidMove::IllegalMove(BoardMove::new(
                Position::new(1, 5),
                Position::new(3, 5)
            )))
        );
        assert_eq!(controller.game.team_turn(), Color::White);
    }

    #[test]
    fn highlight_lists_knight_jumps() {
        let controller = GameController::new();

        let mut squares: Vec<String> = controller
            .highlight("g1")
            .unwrap()
            .iter()
            .map(Position::unparse)
            .collect();
        squares.sort();

        assert_eq!(squares, vec!["f3", "h3"]);
        assert!(controller.highlight("e4").unwrap().is_empty());
        assert!(controller.highlight("z9").is_err());
    }
}
