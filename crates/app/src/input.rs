use thiserror::Error;

use exam_core::model::option_index_from_label;

/// One line of user input during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Choose an option of the current question (0-based).
    Select(usize),
    Next,
    Previous,
    /// Jump to a question (0-based).
    GoTo(usize),
    Finish,
    Reprint,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error(
        "type an option letter or number, :n/:p to move, :g <n> to jump, :f to finish, :q to quit"
    )]
    Unknown(String),
    #[error(":g needs a question number, e.g. :g 3")]
    MissingQuestion,
    #[error("{0:?} is not a question number")]
    InvalidQuestion(String),
    #[error("{0:?} is not an option number")]
    InvalidOption(String),
}

/// Parse a command line typed during a session.
///
/// A single letter selects the option with that label and a number selects
/// by 1-based position, so every option stays reachable. Commands are words
/// (`next`, `finish`, …) or their `:`-prefixed short forms (`:n`, `:f`, …).
pub fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default().to_ascii_lowercase();
    let rest = parts.next();
    if parts.next().is_some() {
        return Err(InputError::Unknown(line.to_owned()));
    }

    let input = match (head.as_str(), rest) {
        (":n" | "next", None) => Input::Next,
        (":p" | "prev" | "previous", None) => Input::Previous,
        (":f" | "finish", None) => Input::Finish,
        (":r" | "reprint", None) => Input::Reprint,
        (":q" | "quit", None) => Input::Quit,
        (":g" | "goto", None) => return Err(InputError::MissingQuestion),
        (":g" | "goto", Some(number)) => Input::GoTo(question_number(number)?),
        (token, None) => Input::Select(select(token, line)?),
        _ => return Err(InputError::Unknown(line.to_owned())),
    };
    Ok(Some(input))
}

fn question_number(raw: &str) -> Result<usize, InputError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(InputError::InvalidQuestion(raw.to_owned())),
    }
}

fn select(token: &str, line: &str) -> Result<usize, InputError> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return match token.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(InputError::InvalidOption(token.to_owned())),
        };
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => {
            option_index_from_label(ch).ok_or_else(|| InputError::Unknown(line.to_owned()))
        }
        _ => Err(InputError::Unknown(line.to_owned())),
    }
}
