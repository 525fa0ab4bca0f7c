use std::fmt;

/// How the most recent foreground command ended. The working directory is
/// deliberately not mirrored here; the OS owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastStatus {
    Exited(i32),
    Signaled(i32),
}

impl fmt::Display for LastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastStatus::Exited(code) => write!(f, "exit value {}", code),
            LastStatus::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

pub struct ShellState {
    last_status: LastStatus,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            last_status: LastStatus::Exited(0),
        }
    }

    pub fn last_status(&self) -> LastStatus {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: LastStatus) {
        self.last_status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_is_clean_exit() {
        let state = ShellState::new();
        assert_eq!(state.last_status(), LastStatus::Exited(0));
    }

    #[test]
    fn test_exit_status_format() {
        assert_eq!(LastStatus::Exited(7).to_string(), "exit value 7");
        assert_eq!(LastStatus::Exited(0).to_string(), "exit value 0");
    }

    #[test]
    fn test_signal_status_format() {
        assert_eq!(
            LastStatus::Signaled(9).to_string(),
            "terminated by signal 9"
        );
    }

    #[test]
    fn test_status_updates() {
        let mut state = ShellState::new();
        state.set_last_status(LastStatus::Signaled(15));
        assert_eq!(state.last_status(), LastStatus::Signaled(15));
    }
}
