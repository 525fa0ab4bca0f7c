use std::io::{self, Write};

/// Upper bound on simultaneously tracked background children.
pub const MAX_JOBS: usize = 200;

/// Bounded list of unreaped background child pids. Only the launcher
/// appends; slots disappear when a child is reaped or bulk-terminated.
pub struct JobTable {
    pids: Vec<libc::pid_t>,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self {
            pids: Vec::with_capacity(MAX_JOBS),
        }
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    pub fn contains(&self, pid: libc::pid_t) -> bool {
        self.pids.contains(&pid)
    }

    /// Records a background child. Returns false when the table is full;
    /// the caller must not block either way.
    pub fn insert(&mut self, pid: libc::pid_t) -> bool {
        if self.pids.len() >= MAX_JOBS {
            return false;
        }
        self.pids.push(pid);
        true
    }

    /// One non-blocking poll per tracked pid, reporting and dropping every
    /// child that has terminated. Never stalls the prompt.
    pub fn reap_finished(&mut self) -> io::Result<()> {
        self.pids.retain(|&pid| {
            let mut status: libc::c_int = 0;
            let reaped = unsafe { libc::waitpid(pid, &mut status, libc::WNOHANG) };
            if reaped == 0 {
                // Still running.
                return true;
            }
            if reaped == pid {
                if libc::WIFEXITED(status) {
                    println!(
                        "background pid {} is done: exit value {}",
                        pid,
                        libc::WEXITSTATUS(status)
                    );
                } else {
                    println!(
                        "background pid {} is done: terminated by signal {}",
                        pid,
                        libc::WTERMSIG(status)
                    );
                }
            }
            // reaped == -1: already collected elsewhere; drop the stale slot.
            false
        });
        io::stdout().flush()
    }

    /// Best-effort termination signal to every tracked pid at exit. A kill
    /// failing on an already-dead child is not an error, and nothing waits
    /// for confirmation.
    pub fn terminate_all(&mut self) {
        for &pid in &self.pids {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
        self.pids.clear();
    }
}
