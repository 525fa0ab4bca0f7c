use std::io::{self, Write};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::process::jobs::JobTable;

/// Reports how the last foreground command ended; reads state, never
/// writes it.
#[derive(Clone)]
pub struct StatusCommand;

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        _jobs: &mut JobTable,
    ) -> Result<Flow, CommandError> {
        println!("{}", state.last_status());
        io::stdout().flush()?;
        Ok(Flow::Continue)
    }
}
