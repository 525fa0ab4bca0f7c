mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::core::state::ShellState;
use crate::process::jobs::JobTable;

#[derive(Debug)]
pub enum CommandError {
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// What the main loop should do after a built-in ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A built-in runs in the interpreter process itself. `args` excludes the
/// command name. Failures a user can recover from are reported inline and
/// never bubble up.
pub trait Command {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        jobs: &mut JobTable,
    ) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
pub enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl CommandType {
    /// Maps a command name to its built-in; anything else belongs to the
    /// process launcher.
    pub fn recognize(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(CommandType::Cd(CdCommand::new())),
            "exit" => Some(CommandType::Exit(ExitCommand::new())),
            "status" => Some(CommandType::Status(StatusCommand::new())),
            _ => None,
        }
    }
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        jobs: &mut JobTable,
    ) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state, jobs),
            CommandType::Exit(cmd) => cmd.execute(args, state, jobs),
            CommandType::Status(cmd) => cmd.execute(args, state, jobs),
        }
    }
}
