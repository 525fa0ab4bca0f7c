use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::process::jobs::JobTable;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        _jobs: &mut JobTable,
    ) -> Result<Flow, CommandError> {
        let target: PathBuf = match args.first() {
            Some(path) => PathBuf::from(path),
            None => match dirs::home_dir() {
                Some(home) => home,
                // Nowhere to go without HOME; leave the directory alone.
                None => return Ok(Flow::Continue),
            },
        };

        if env::set_current_dir(&target).is_err() {
            println!("Directory not found: {}", target.display());
            io::stdout().flush()?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test on purpose: the working directory is process-wide and the
    // harness runs tests on parallel threads.
    #[test]
    fn test_cd_behavior() {
        let cmd = CdCommand::new();
        let mut state = ShellState::new();
        let mut jobs = JobTable::new();

        let temp_dir = env::temp_dir();
        let flow = cmd
            .execute(
                &[temp_dir.to_string_lossy().to_string()],
                &mut state,
                &mut jobs,
            )
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            temp_dir.canonicalize().unwrap()
        );

        // A bad path reports but does not move us.
        let before = env::current_dir().unwrap();
        let flow = cmd
            .execute(
                &["/path/that/does/not/exist".to_string()],
                &mut state,
                &mut jobs,
            )
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(env::current_dir().unwrap(), before);

        // No argument goes home.
        if let Some(home) = dirs::home_dir() {
            cmd.execute(&[], &mut state, &mut jobs).unwrap();
            assert_eq!(env::current_dir().unwrap(), home);
        }
    }
}
