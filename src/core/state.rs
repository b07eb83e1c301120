use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::process::ExitOutcome;

/// Process-wide interpreter state, alive for the whole session.
pub struct ShellState {
    /// Written only by the SIGTSTP handler.
    foreground_only: Arc<AtomicBool>,
    last_status: ExitOutcome,
    shell_pid: u32,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        ShellState {
            foreground_only: Arc::new(AtomicBool::new(false)),
            last_status: ExitOutcome::default(),
            shell_pid: std::process::id(),
        }
    }

    /// Handle to the mode flag for the signal handler.
    pub fn mode_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.foreground_only)
    }

    pub fn foreground_only(&self) -> bool {
        self.foreground_only.load(Ordering::SeqCst)
    }

    pub fn last_status(&self) -> ExitOutcome {
        self.last_status
    }

    pub fn shell_pid(&self) -> u32 {
        self.shell_pid
    }

    /// Record how the most recent foreground child finished.
    pub fn record_foreground(&mut self, outcome: ExitOutcome) {
        self.last_status = outcome;
    }
}
