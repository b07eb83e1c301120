use std::fmt;
use std::io;

pub mod executor;
pub mod reaper;
pub mod signal;
pub mod wait;

pub use executor::{Launch, ProcessExecutor};
pub use reaper::{BackgroundJobs, Finished};
pub use signal::SignalManager;
pub use wait::ExitOutcome;

pub type ProcessId = libc::pid_t;

#[derive(Debug)]
pub enum ProcessError {
    /// No child could be created.
    Fork(io::Error),
    /// Waiting on a foreground child failed for a reason other than an interruption.
    Wait(io::Error),
    /// An argument or redirection path that cannot be passed to the kernel.
    InvalidArgument(String),
    SignalError(io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(e) => write!(f, "fork: {}", e),
            ProcessError::Wait(e) => write!(f, "wait: {}", e),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "invalid argument (contains NUL byte): {:?}", arg)
            }
            ProcessError::SignalError(e) => write!(f, "signal setup: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
