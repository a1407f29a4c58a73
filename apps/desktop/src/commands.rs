use client_core::LocalAction;
use shared::{domain::ScaleValue, DomainError};
use thiserror::Error;

pub const USAGE: &str = "\
commands:
  create [name]        create a room
  join <code> [name]   join a room by code
  start                start the game (host, 2+ players)
  clue <text>          give the clue (briefer)
  guess <0-100>        move the guess pointer (guesser)
  lock                 lock in the guess
  reveal               reveal the target (briefer)
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Actions(Vec<LocalAction>),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no name given and no default username configured")]
    MissingUsername,
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Parses one line typed by the player.
pub fn parse_command(line: &str, default_username: Option<&str>) -> Result<Input, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let actions = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(Input::Empty),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        "create" => vec![LocalAction::CreateRoom {
            username: username_or_default(rest, default_username)?,
        }],
        "join" => {
            let (code, name) = match rest.split_once(char::is_whitespace) {
                Some((code, name)) => (code, name.trim()),
                None => (rest, ""),
            };
            if code.is_empty() {
                return Err(CommandError::Usage("join <code> [name]"));
            }
            vec![LocalAction::JoinRoom {
                room_code: code.to_string(),
                username: username_or_default(name, default_username)?,
            }]
        }
        "start" => vec![LocalAction::StartGame],
        "clue" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("clue <text>"));
            }
            vec![
                LocalAction::EditClue(rest.to_string()),
                LocalAction::SubmitClue,
            ]
        }
        "guess" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("guess <0-100>"));
            }
            let raw: i64 = rest
                .parse()
                .map_err(|_| CommandError::NotANumber(rest.to_string()))?;
            vec![LocalAction::MoveGuess(ScaleValue::new(raw)?)]
        }
        "lock" => vec![LocalAction::SubmitGuess],
        "reveal" => vec![LocalAction::Reveal],
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Input::Actions(actions))
}

fn username_or_default(given: &str, default: Option<&str>) -> Result<String, CommandError> {
    if !given.is_empty() {
        return Ok(given.to_string());
    }
    default
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(CommandError::MissingUsername)
}
