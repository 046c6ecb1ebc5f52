use jobwatch_core::{Msg, PagerConfig};

/// One line typed at the dashboard prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status(String),
    Engine(String),
    Page(u64),
    Dismiss,
    /// Navigate to a hash; the dashboard also moves the terminal location.
    Hash(String),
    Help,
    Quit,
}

pub const HELP: &str = "commands: status <name|Any>, engine <name|Any>, page <n>, dismiss, \
hash <#?st=..&eng=..>, help, quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "status" | "st" => Ok(Command::Status(value_or_any(rest))),
        "engine" | "eng" => Ok(Command::Engine(value_or_any(rest))),
        "page" | "p" => rest
            .parse::<u64>()
            .map(Command::Page)
            .map_err(|_| format!("not a page number: {rest:?}")),
        "dismiss" | "d" => Ok(Command::Dismiss),
        "hash" => Ok(Command::Hash(rest.to_string())),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command {other:?}")),
    }
}

fn value_or_any(rest: &str) -> String {
    if rest.is_empty() {
        jobwatch_core::ANY.to_string()
    } else {
        rest.to_string()
    }
}

impl Command {
    /// Message for the dashboard, if the command produces one. Page clicks go
    /// to whichever pager is showing right now.
    pub fn to_msg(&self, pager: Option<PagerConfig>) -> Option<Msg> {
        match self {
            Command::Status(status) => Some(Msg::StatusSelected(status.clone())),
            Command::Engine(engine) => Some(Msg::EngineSelected(engine.clone())),
            Command::Page(page) => pager.map(|pager| Msg::PageSelected {
                generation: pager.generation,
                page: *page,
            }),
            Command::Dismiss => Some(Msg::NoticeDismissed),
            Command::Hash(hash) => Some(Msg::HashChanged(hash.clone())),
            Command::Help | Command::Quit => None,
        }
    }
}
