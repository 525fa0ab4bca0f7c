mod executor;

use executor::CommandHandler;

use crate::core::commands::Flow;
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::input::{LineReader, ReadOutcome};
use crate::process::executor::ProcessLauncher;
use crate::process::jobs::JobTable;
use crate::process::signal::SignalCoordinator;

pub struct Shell {
    pub(crate) reader: LineReader,
    pub(crate) state: ShellState,
    pub(crate) jobs: JobTable,
    pub(crate) launcher: ProcessLauncher,
    pub(crate) signals: SignalCoordinator,
}

impl Shell {
    pub fn new() -> Result<Self, ShellError> {
        let signals = SignalCoordinator::new();
        // Once, for the whole process lifetime.
        signals.install_stop_handler()?;

        Ok(Shell {
            reader: LineReader::new(),
            state: ShellState::new(),
            jobs: JobTable::new(),
            launcher: ProcessLauncher::new(),
            signals,
        })
    }

    /// One request/response cycle per pass: read, expand, dispatch,
    /// report. Ends only through `exit` or end-of-input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            // Reset every pass: a foreground child may have switched the
            // disposition to default in its own image, and the interpreter
            // itself must never die to an interrupt.
            self.signals.ignore_interrupts();

            match self.reader.read_command(&self.signals)? {
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => {
                    self.jobs.terminate_all();
                    break;
                }
                ReadOutcome::Line(cmd) => {
                    if cmd.is_empty() || cmd.is_comment() {
                        continue;
                    }
                    match self.dispatch(&cmd)? {
                        Flow::Exit => break,
                        Flow::Continue => {
                            // Every command, built-in or external, is
                            // followed by one reap scan.
                            self.jobs.reap_finished()?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
