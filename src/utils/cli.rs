use std::io;

#[derive(Debug, PartialEq, Eq)]
pub enum GUICommand {
    FenPosition(String),               // position fen <fen>
    MovePosition(Option<Vec<String>>), // position startpos <maybe some moves>
    SetOption(String, String),         // setoption name <name> value <value>
    Move(String),                      // move e2e4 | move e2 e4
    ValidMoves(String),                // moves <square>
    Perft(String),                     // go perft <depth>
    Status,                            // status
    Fen,                               // fen
    Resign,                            // resign
    Quit,                              // quit the program

    Invalid(String), // placeholder for invalid commands so we can pattern match
}

impl GUICommand {
    /// Reads one line from stdin. End of input counts as `quit`.
    pub fn receive() -> GUICommand {
        let mut input = String::new();

        match io::stdin().read_line(&mut input) {
            Ok(0) => GUICommand::Quit,
            Ok(_) => GUICommand::parse(&input),
            Err(error) => {
                log::error!("Failed to read from stdin: {}", error);
                GUICommand::Quit
            }
        }
    }

    pub fn parse(input: &str) -> GUICommand {
        let parts = input.split_whitespace().collect::<Vec<_>>();

        match parts.as_slice() {
            ["position", "startpos"] => GUICommand::MovePosition(None),
            ["position", "startpos", "moves", moves @ ..] => {
                GUICommand::MovePosition(Some(moves.iter().map(|m| m.to_string()).collect()))
            }
            ["position", "fen", fen @ ..] if !fen.is_empty() => {
                GUICommand::FenPosition(fen.join(" "))
            }
            ["setoption", "name", name_and_rest @ ..] if !name_and_rest.is_empty() => {
                Self::parse_setoption(name_and_rest)
            }
            ["move", notation @ ..] if !notation.is_empty() => GUICommand::Move(notation.join(" ")),
            ["moves", square] => GUICommand::ValidMoves(square.to_string()),
            ["go", "perft", depth] => GUICommand::Perft(depth.to_string()),
            ["status"] => GUICommand::Status,
            ["fen"] => GUICommand::Fen,
            ["resign"] => GUICommand::Resign,
            ["quit"] => GUICommand::Quit,
            _ => GUICommand::Invalid(input.trim().to_string()),
        }
    }

    fn parse_setoption(parts: &[&str]) -> GUICommand {
        // Everything before "value" is the option name, everything after is the value
        match parts.iter().position(|&part| part == "value") {
            Some(value_pos) => {
                let name = parts[..value_pos].join(" ");
                let value = parts[value_pos + 1..].join(" ");

                if !name.is_empty() && !value.is_empty() {
                    GUICommand::SetOption(name, value)
                } else {
                    GUICommand::Invalid(format!("setoption name {} value {}", name, value))
                }
            }
            None => GUICommand::Invalid(format!("setoption name {}", parts.join(" "))),
        }
    }
}
