use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::Command;

use crate::core::state::{LastStatus, ShellState};
use crate::input::ParsedCommand;
use crate::process::jobs::JobTable;
use crate::process::signal::SignalCoordinator;
use crate::process::ProcessError;

/// A staged stdin/stdout swap, prepared entirely before fork. The child
/// runs between fork and exec, where allocation is off-limits, so paths
/// and diagnostics are baked into buffers up front.
struct Redirect {
    path: CString,
    target_fd: libc::c_int,
    open_flags: libc::c_int,
    mode: libc::c_uint,
    open_failure: Vec<u8>,
    dup_failure: Vec<u8>,
}

impl Redirect {
    fn stdin_from(path: &str) -> io::Result<Self> {
        Ok(Self {
            path: CString::new(path).map_err(|_| io::ErrorKind::InvalidInput)?,
            target_fd: libc::STDIN_FILENO,
            open_flags: libc::O_RDONLY,
            mode: 0,
            open_failure: format!("cannot open {} for input\n", path).into_bytes(),
            dup_failure: format!("could not redirect {}\n", path).into_bytes(),
        })
    }

    fn stdout_to(path: &str) -> io::Result<Self> {
        Ok(Self {
            path: CString::new(path).map_err(|_| io::ErrorKind::InvalidInput)?,
            target_fd: libc::STDOUT_FILENO,
            open_flags: libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            mode: 0o640,
            open_failure: format!("cannot open {} for output\n", path).into_bytes(),
            dup_failure: format!("could not redirect {}\n", path).into_bytes(),
        })
    }

    /// Child side. Only async-signal-safe calls: open, dup2, close, and on
    /// failure write + _exit, which abandons this child alone.
    fn apply(&self) {
        unsafe {
            let fd = libc::open(self.path.as_ptr(), self.open_flags, self.mode);
            if fd == -1 {
                abort_child(&self.open_failure);
            }
            if libc::dup2(fd, self.target_fd) == -1 {
                abort_child(&self.dup_failure);
            }
            libc::close(fd);
        }
    }
}

/// Everything the child mutates before replacing its image.
struct ChildSetup {
    reset_interrupt: bool,
    input: Option<Redirect>,
    output: Option<Redirect>,
}

fn abort_child(message: &[u8]) -> ! {
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            message.as_ptr() as *const libc::c_void,
            message.len(),
        );
        libc::_exit(1)
    }
}

pub struct ProcessLauncher;

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Spawns one child for an external command and settles its
    /// disposition: block on it in the foreground, or record it as a
    /// background job. Trailing `&` is overridden while foreground-only
    /// mode is active.
    pub fn launch(
        &self,
        cmd: &ParsedCommand,
        state: &mut ShellState,
        jobs: &mut JobTable,
        signals: &SignalCoordinator,
    ) -> Result<(), ProcessError> {
        let program = match cmd.name() {
            Some(name) => name.to_string(),
            None => return Ok(()),
        };
        let run_background = cmd.background && !signals.foreground_only();

        let setup = ChildSetup {
            // Only the foreground child becomes interruptible again;
            // background children keep inheriting SIG_IGN.
            reset_interrupt: !run_background,
            input: cmd
                .input_path
                .as_deref()
                .map(Redirect::stdin_from)
                .transpose()?,
            output: cmd
                .output_path
                .as_deref()
                .map(Redirect::stdout_to)
                .transpose()?,
        };

        let mut command = Command::new(&program);
        command.args(&cmd.args[1..]);
        unsafe {
            command.pre_exec(move || {
                if setup.reset_interrupt {
                    libc::signal(libc::SIGINT, libc::SIG_DFL);
                }
                if let Some(redirect) = &setup.input {
                    redirect.apply();
                }
                if let Some(redirect) = &setup.output {
                    redirect.apply();
                }
                Ok(())
            });
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err)
                if err.kind() == io::ErrorKind::NotFound
                    || err.kind() == io::ErrorKind::PermissionDenied =>
            {
                println!("{}: no such file or directory", program);
                io::stdout().flush()?;
                state.set_last_status(LastStatus::Exited(1));
                return Ok(());
            }
            // No child came to exist; nothing to recover.
            Err(err) => return Err(ProcessError::Spawn(err)),
        };

        let pid = child.id() as libc::pid_t;
        if run_background {
            // Single non-blocking probe; a fresh child normally reports
            // nothing yet. The reap scan picks it up later.
            let mut status: libc::c_int = 0;
            unsafe {
                libc::waitpid(pid, &mut status, libc::WNOHANG);
            }
            jobs.insert(pid);
            println!("background pid is {}", pid);
            io::stdout().flush()?;
        } else {
            let status = child.wait()?;
            if let Some(signal) = status.signal() {
                println!("terminated by signal {}", signal);
                io::stdout().flush()?;
                state.set_last_status(LastStatus::Signaled(signal));
            } else {
                state.set_last_status(LastStatus::Exited(status.code().unwrap_or(1)));
            }
        }
        Ok(())
    }
}
