//! Commands typed at the interactive prompt.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Retry,
    Next,
    Back,
    Register,
    Cancel,
    Login { token: String },
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("type a command, or 'help' to list them")]
    Empty,
    #[error("unknown command '{0}'; type 'help' to list commands")]
    Unknown(String),
    #[error("usage: login <access-token>")]
    MissingToken,
}

pub const HELP: &str = "\
Commands:
  retry            reload the current screen
  next             open registration (from the event details)
  back             return to the event details
  register         register for the event
  cancel           cancel your registration
  login <token>    use an access token from the sign-in page
  logout           forget the access token
  help             show this list
  quit             exit";

pub fn parse_command(line: &str) -> Result<UserCommand, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandError::Empty);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "retry" | "r" => UserCommand::Retry,
        "next" | "n" => UserCommand::Next,
        "back" | "b" => UserCommand::Back,
        "register" => UserCommand::Register,
        "cancel" => UserCommand::Cancel,
        "login" => {
            let token = parts.next().ok_or(CommandError::MissingToken)?;
            UserCommand::Login {
                token: token.to_string(),
            }
        }
        "logout" => UserCommand::Logout,
        "help" | "h" | "?" => UserCommand::Help,
        "quit" | "q" | "exit" => UserCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
