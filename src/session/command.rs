//! Parsing of interactive command lines.
//!
//! The first whitespace-delimited word selects the command; the remainder
//! of the line is its argument. Argument parsing never coerces bad input
//! into a valid value: a token that does not parse is kept verbatim in the
//! `Err` side of [`Arg`].

use crate::domain::Priority;

/// A parsed argument, or the raw text that failed to parse
pub type Arg<T> = std::result::Result<T, String>;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Persist and end the session
    Exit,
    /// Persist and continue
    Save,
    /// Append a task; the label is the rest of the line after the single
    /// separator following `create`, and may be blank
    Create(String),
    /// Delete the task at a 1-based position
    Remove(Arg<usize>),
    /// Flip completion of the task at a 1-based position
    Toggle(Arg<usize>),
    /// Set the priority of the task at a 1-based position
    Priority(Arg<usize>, Arg<Priority>),
    /// Any other command word
    Unknown(String),
    /// Nothing but whitespace
    Blank,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word {
            "" => Command::Blank,
            "exit" => Command::Exit,
            "save" => Command::Save,
            "create" => Command::Create(rest.to_string()),
            "remove" => Command::Remove(parse_index(rest)),
            "toggle" => Command::Toggle(parse_index(rest)),
            "priority" => {
                let mut tokens = rest.split_whitespace();
                let index = parse_index(tokens.next().unwrap_or(""));
                let priority = parse_priority(tokens.next().unwrap_or(""));
                Command::Priority(index, priority)
            }
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Parse a 1-based task position. Range is checked by the session.
pub fn parse_index(raw: &str) -> Arg<usize> {
    let raw = raw.trim();
    raw.parse::<usize>().map_err(|_| raw.to_string())
}

pub fn parse_priority(raw: &str) -> Arg<Priority> {
    let raw = raw.trim();
    Priority::from_name(raw).ok_or_else(|| raw.to_string())
}
