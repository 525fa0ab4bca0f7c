use crate::core::commands::{Command, CommandType, Flow};
use crate::error::ShellError;
use crate::input::ParsedCommand;

pub(crate) trait CommandHandler {
    fn dispatch(&mut self, cmd: &ParsedCommand) -> Result<Flow, ShellError>;
}

impl CommandHandler for super::Shell {
    fn dispatch(&mut self, cmd: &ParsedCommand) -> Result<Flow, ShellError> {
        let name = match cmd.name() {
            Some(name) => name,
            None => return Ok(Flow::Continue),
        };

        if let Some(builtin) = CommandType::recognize(name) {
            let flow = builtin.execute(&cmd.args[1..], &mut self.state, &mut self.jobs)?;
            return Ok(flow);
        }

        self.launcher
            .launch(cmd, &mut self.state, &mut self.jobs, &self.signals)?;
        Ok(Flow::Continue)
    }
}
