//! Line commands understood by the terminal front-end.

use thiserror::Error;
use todo_core::TodoId;

pub const HELP: &str = "\
commands:
  type <text>    set the draft (everything after the first space, verbatim)
  submit         create a todo from the draft
  add <text>     type + submit
  delete <id>    delete the todo with this id
  show           print the list again
  help           this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Submit,
    Add(String),
    Delete(TodoId),
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("delete needs a todo id")]
    MissingId,

    #[error("not a todo id: {0}")]
    InvalidId(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let command = match head {
        "type" => Command::Type(rest.to_string()),
        "add" => Command::Add(rest.to_string()),
        "submit" => Command::Submit,
        "delete" | "rm" => {
            let id = rest.trim();
            if id.is_empty() {
                return Err(CommandError::MissingId);
            }
            let id = id.parse().map_err(|_| CommandError::InvalidId(id.to_string()))?;
            Command::Delete(id)
        }
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
