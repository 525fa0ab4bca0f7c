use std::fmt;

pub mod executor;
pub mod jobs;
pub mod signal;

#[derive(Debug)]
pub enum ProcessError {
    /// The OS refused to create a child process. The one unrecoverable
    /// failure in the interpreter.
    Spawn(std::io::Error),
    Signal(std::io::Error),
    Io(std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(err) => write!(f, "failed to create child process: {}", err),
            ProcessError::Signal(err) => write!(f, "failed to install signal handler: {}", err),
            ProcessError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        ProcessError::Io(err)
    }
}
