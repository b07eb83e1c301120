use std::fmt;
use std::io;

use libc::{c_int, WEXITSTATUS, WIFEXITED, WIFSIGNALED, WNOHANG, WTERMSIG};

use super::ProcessId;

/// Passed to [`wait`] to collect any child instead of a specific one.
pub const ANY_CHILD: ProcessId = -1;

/// How a child process finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl Default for ExitOutcome {
    fn default() -> Self {
        ExitOutcome::Exited(0)
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exit value {}", code),
            ExitOutcome::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

/// Error values returned when [`wait`] fails.
#[derive(Debug)]
pub enum WaitError {
    // No children were in a waitable state.
    //
    // This is only returned if the [`WaitOptions::no_hang`] option is used.
    NotReady,
    Io(io::Error),
}

/// Options to configure how [`wait`] waits for children.
pub struct WaitOptions {
    flags: c_int,
}

impl WaitOptions {
    /// Only wait for terminated children.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Return immediately if no child has exited.
    pub const fn no_hang(mut self) -> Self {
        self.flags |= WNOHANG;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The raw status of a waited child.
#[derive(Clone, Copy)]
pub struct WaitStatus {
    status: c_int,
}

impl WaitStatus {
    pub const fn did_exit(&self) -> bool {
        WIFEXITED(self.status)
    }

    pub const fn was_signaled(&self) -> bool {
        WIFSIGNALED(self.status)
    }

    /// Collapse the status into an [`ExitOutcome`]. Returns `None` for stop/continue reports,
    /// which are never requested here.
    pub fn outcome(&self) -> Option<ExitOutcome> {
        if self.did_exit() {
            Some(ExitOutcome::Exited(WEXITSTATUS(self.status)))
        } else if self.was_signaled() {
            Some(ExitOutcome::Signaled(WTERMSIG(self.status)))
        } else {
            None
        }
    }
}

impl fmt::Debug for WaitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            Some(outcome) => write!(f, "WaitStatus({})", outcome),
            None => write!(f, "WaitStatus(raw {:#x})", self.status),
        }
    }
}

/// Wait for a child to change state.
///
/// Blocks until the child named by `pid` (or any child, with [`ANY_CHILD`]) terminates, unless
/// [`WaitOptions::no_hang`] is set. An interrupted call surfaces as an `Io` error of kind
/// `Interrupted`; retrying is the caller's decision.
pub fn wait(pid: ProcessId, options: WaitOptions) -> Result<(ProcessId, WaitStatus), WaitError> {
    let mut status: c_int = 0;

    // SAFETY: `status` is a valid, writable c_int for the duration of the call.
    let pid = unsafe { libc::waitpid(pid, &mut status, options.flags) };
    if pid == -1 {
        return Err(WaitError::Io(io::Error::last_os_error()));
    }

    if pid == 0 && options.flags & WNOHANG != 0 {
        return Err(WaitError::NotReady);
    }

    Ok((pid, WaitStatus { status }))
}

/// Block until `pid` terminates, retrying when a signal handler interrupts the wait.
pub fn wait_for(pid: ProcessId) -> io::Result<ExitOutcome> {
    loop {
        match wait(pid, WaitOptions::new()) {
            Ok((_, status)) => {
                if let Some(outcome) = status.outcome() {
                    return Ok(outcome);
                }
            }
            Err(WaitError::Io(err)) if err.kind() == io::ErrorKind::Interrupted => {
                log::debug!("wait for {} interrupted, retrying", pid);
            }
            Err(WaitError::Io(err)) => return Err(err),
            Err(WaitError::NotReady) => {}
        }
    }
}
