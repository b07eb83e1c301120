use std::collections::BTreeSet;
use std::fmt;
use std::io;

use super::wait::{wait, ExitOutcome, WaitError, WaitOptions, ANY_CHILD};
use super::ProcessId;

/// A background child collected by [`BackgroundJobs::reap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    pub pid: ProcessId,
    pub outcome: ExitOutcome,
}

impl fmt::Display for Finished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "background pid {} is done: {}", self.pid, self.outcome)
    }
}

/// Process ids of children launched without waiting.
///
/// Only used to terminate leftovers on exit; completion is discovered by polling for any child.
#[derive(Debug, Default)]
pub struct BackgroundJobs {
    running: BTreeSet<ProcessId>,
}

impl BackgroundJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, pid: ProcessId) {
        self.running.insert(pid);
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Collect every child that has already terminated, without blocking.
    pub fn reap(&mut self) -> Vec<Finished> {
        let mut finished = Vec::new();

        loop {
            match wait(ANY_CHILD, WaitOptions::new().no_hang()) {
                Ok((pid, status)) => {
                    if let Some(outcome) = status.outcome() {
                        self.running.remove(&pid);
                        log::debug!("reaped {}: {}", pid, outcome);
                        finished.push(Finished { pid, outcome });
                    }
                }
                Err(WaitError::NotReady) => break,
                Err(WaitError::Io(err)) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(WaitError::Io(err)) => {
                    if err.raw_os_error() != Some(libc::ECHILD) {
                        log::warn!("polling for finished jobs failed: {}", err);
                    }
                    break;
                }
            }
        }

        finished
    }

    /// Send SIGTERM to every child still tracked. Children that already exited are skipped.
    pub fn terminate_all(&mut self) {
        for pid in std::mem::take(&mut self.running) {
            // SAFETY: `kill` has no memory-safety preconditions.
            if unsafe { libc::kill(pid, libc::SIGTERM) } == -1 {
                let err = io::Error::last_os_error();
                if err.raw_os_error() != Some(libc::ESRCH) {
                    log::warn!("cannot terminate background pid {}: {}", pid, err);
                }
            } else {
                log::debug!("sent SIGTERM to background pid {}", pid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;
    use crate::process::executor::{Launch, ProcessExecutor};

    fn launch_background(line: &str) -> ProcessId {
        let command = parse(line, false).unwrap();
        match ProcessExecutor::new().launch(&command, false).unwrap() {
            Launch::Background(pid) => pid,
            other => panic!("expected a background launch, got {:?}", other),
        }
    }

    #[test]
    fn nothing_to_reap_returns_immediately() {
        let _guard = crate::test_support::serial();
        let mut jobs = BackgroundJobs::new();
        assert!(jobs.reap().is_empty());
        assert!(jobs.is_empty());
    }

    #[test]
    fn running_children_are_not_reported() {
        let _guard = crate::test_support::serial();
        let mut jobs = BackgroundJobs::new();
        let pid = launch_background("sleep 5 &");
        jobs.track(pid);

        assert!(jobs.reap().is_empty());
        assert_eq!(jobs.len(), 1);

        jobs.terminate_all();
        assert!(jobs.is_empty());

        let outcome = crate::process::wait::wait_for(pid).unwrap();
        assert_eq!(outcome, ExitOutcome::Signaled(libc::SIGTERM));
    }

    #[test]
    fn reports_exit_value_and_signal() {
        let _guard = crate::test_support::serial();
        let mut jobs = BackgroundJobs::new();
        let ok = launch_background("true &");
        let failed = launch_background("false &");
        jobs.track(ok);
        jobs.track(failed);

        let mut finished = crate::test_support::reap_until_empty(&mut jobs);
        finished.sort_by_key(|f| f.pid);
        let mut expected = vec![
            Finished {
                pid: ok,
                outcome: ExitOutcome::Exited(0),
            },
            Finished {
                pid: failed,
                outcome: ExitOutcome::Exited(1),
            },
        ];
        expected.sort_by_key(|f| f.pid);
        pretty_assertions::assert_eq!(finished, expected);
    }

    #[test]
    fn finished_display_matches_report_format() {
        let done = Finished {
            pid: 4567,
            outcome: ExitOutcome::Exited(0),
        };
        assert_eq!(done.to_string(), "background pid 4567 is done: exit value 0");

        let killed = Finished {
            pid: 12,
            outcome: ExitOutcome::Signaled(15),
        };
        assert_eq!(
            killed.to_string(),
            "background pid 12 is done: terminated by signal 15"
        );
    }
}
