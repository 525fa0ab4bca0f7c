use std::sync::atomic::{AtomicBool, Ordering};

use crate::process::ProcessError;

// Written from the handler, read from the main flow. Lock-free atomics are
// the only shared state safe in both contexts.
static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);
static READ_INTERRUPTED: AtomicBool = AtomicBool::new(false);

const ENTER_NOTICE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_NOTICE: &[u8] = b"\nExiting foreground-only mode\n";

// Async-signal-safe: an atomic toggle and one write(2) of a preformatted
// literal. No buffered I/O, no allocation.
extern "C" fn handle_stop_signal(_: libc::c_int) {
    let was_background_allowed = !FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let notice = if was_background_allowed {
        ENTER_NOTICE
    } else {
        EXIT_NOTICE
    };
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            notice.as_ptr() as *const libc::c_void,
            notice.len(),
        );
    }
    READ_INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Owns the process-wide foreground-only and interrupted-read flags and the
/// two signal dispositions the interpreter manages.
pub struct SignalCoordinator;

impl Default for SignalCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Installs the stop-signal handler once, for the whole process
    /// lifetime. `SA_RESTART` is deliberately left out so a blocked line
    /// read aborts with `EINTR` instead of silently resuming.
    pub fn install_stop_handler(&self) -> Result<(), ProcessError> {
        unsafe {
            let mut action: libc::sigaction = std::mem::zeroed();
            action.sa_sigaction = handle_stop_signal as libc::sighandler_t;
            libc::sigfillset(&mut action.sa_mask);
            action.sa_flags = 0;
            if libc::sigaction(libc::SIGTSTP, &action, std::ptr::null_mut()) != 0 {
                return Err(ProcessError::Signal(std::io::Error::last_os_error()));
            }
        }
        Ok(())
    }

    /// The interpreter itself ignores the interrupt signal; reinstalled at
    /// the top of every loop pass. Foreground children switch back to the
    /// default disposition after fork.
    pub fn ignore_interrupts(&self) {
        unsafe {
            libc::signal(libc::SIGINT, libc::SIG_IGN);
        }
    }

    pub fn foreground_only(&self) -> bool {
        FOREGROUND_ONLY.load(Ordering::SeqCst)
    }

    /// Consumes the interrupted-read flag: true at most once per stop
    /// signal delivery.
    pub fn take_read_interrupted(&self) -> bool {
        READ_INTERRUPTED.swap(false, Ordering::SeqCst)
    }
}

// The foreground-only flag is process-global; tests that toggle it or make
// decisions based on it must hold this lock so the harness's parallel
// threads cannot interleave a toggle with a launch.
#[cfg(test)]
pub(crate) static FOREGROUND_MODE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_toggles_mode_and_flags_the_read() {
        let _mode = FOREGROUND_MODE_LOCK
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let signals = SignalCoordinator::new();
        signals.install_stop_handler().unwrap();
        signals.take_read_interrupted();

        let before = signals.foreground_only();
        // raise() delivers synchronously to this thread.
        unsafe { libc::raise(libc::SIGTSTP) };
        assert_eq!(signals.foreground_only(), !before);
        assert!(signals.take_read_interrupted());
        assert!(!signals.take_read_interrupted());

        unsafe { libc::raise(libc::SIGTSTP) };
        assert_eq!(signals.foreground_only(), before);
        assert!(signals.take_read_interrupted());
    }
}
