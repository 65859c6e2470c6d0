use chess_rules::controller::{GameController, MoveResultType};
use chess_rules::utils::GUICommand;
use clap::Parser;

#[derive(Parser)]
#[command(name = "chess_rules")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Chess rules engine driven by line commands on stdin", long_about = None)]
struct Cli {
    /// Start from this FEN instead of the starting position
    #[arg(long, value_name = "FEN")]
    fen: Option<String>,

    /// Threads used by `go perft`
    #[arg(long, value_name = "N")]
    threads: Option<usize>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut controller = GameController::new();

    if let Some(threads) = cli.threads {
        controller.set_threads(threads);
    }

    if let Some(fen) = cli.fen {
        if let Err(error) = controller.new_game_from_fen(&fen) {
            eprintln!("error: {}", error);
            std::process::exit(2);
        }
    }

    loop {
        match GUICommand::receive() {
            GUICommand::Quit => break,
            GUICommand::MovePosition(moves) => {
                controller.new_game();

                if let Some(moves) = moves {
                    report_failure(controller.play_moves(&moves));
                }
            }
            GUICommand::FenPosition(fen) => {
                if let Err(error) = controller.new_game_from_fen(&fen) {
                    println!("error: {}", error);
                }
            }
            GUICommand::SetOption(name, value) => controller.set_option(&name, &value),
            GUICommand::Move(notation) => match controller.try_move_piece(&notation) {
                MoveResultType::Success => println!("{}", controller.status()),
                failure => report_failure(failure),
            },
            GUICommand::ValidMoves(square) => match controller.highlight(&square) {
                Ok(squares) => println!(
                    "{}",
                    squares
                        .iter()
                        .map(|square| square.unparse())
                        .collect::<Vec<_>>()
                        .join(" ")
                ),
                Err(error) => println!("error: {}", error),
            },
            GUICommand::Perft(depth_string) => match depth_string.parse::<usize>() {
                Ok(0) => println!("error: perft depth must be at least 1"),
                Ok(depth) => {
                    let moves = controller.perft(depth);

                    for (m, c) in &moves {
                        println!("{}: {}", m.unparse(), c);
                    }

                    println!("\nNodes: {}", moves.iter().map(|(_, c)| c).sum::<usize>());
                }
                Err(_) => println!("error: invalid depth '{}'", depth_string),
            },
            GUICommand::Status => println!("{}", controller.status()),
            GUICommand::Fen => println!("{}", controller.game.to_fen()),
            GUICommand::Resign => match controller.resign() {
                Ok(()) => println!("{}", controller.status()),
                Err(error) => println!("error: {}", error),
            },
            GUICommand::Invalid(input) => log::warn!("Unknown command: {}", input),
        }
    }
}

fn report_failure(result: MoveResultType) {
    match result {
        MoveResultType::Success => {}
        MoveResultType::InvalidNotation(error) => println!("error: {}", error),
        MoveResultType::InvalidMove(error) => println!("error: {}", error),
    }
}
