use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::process::jobs::JobTable;

/// Signals every tracked background job, then tells the loop to stop.
#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &mut ShellState,
        jobs: &mut JobTable,
    ) -> Result<Flow, CommandError> {
        jobs.terminate_all();
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_empties_the_job_table() {
        let cmd = ExitCommand::new();
        let mut state = ShellState::new();
        let mut jobs = JobTable::new();

        // A pid far above any real pid range; kill failing on it must not
        // disturb exit.
        jobs.insert(2_000_000_000);
        let flow = cmd.execute(&[], &mut state, &mut jobs).unwrap();
        assert_eq!(flow, Flow::Exit);
        assert!(jobs.is_empty());
    }
}
