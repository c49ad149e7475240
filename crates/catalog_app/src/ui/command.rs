/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a search. The keyword is kept verbatim after the command word.
    Search(String),
    /// Show the detail of the n-th listed product (1-based).
    Open(usize),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "search" | "s" => Command::Search(rest.to_string()),
        "open" | "o" => match rest.parse::<usize>() {
            Ok(position) if position > 0 => Command::Open(position),
            _ => Command::Invalid(format!("expected a product number, got {rest:?}")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        // Bare text is a search for the whole line.
        _ => Command::Search(trimmed.trim_end().to_string()),
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  search <keyword>   search the catalog (bare text works too)
  open <n>           show details of the n-th product
  help               show this help
  quit               exit";
