//! Signal dispositions for the shell and for the children it forks.
//!
//! The shell ignores SIGINT and uses SIGTSTP to toggle foreground-only mode. Everything that runs
//! inside the SIGTSTP handler or in a freshly forked child is restricted to async-signal-safe
//! calls: atomics, `sigaction` and raw `write`.

use std::io;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::c_int;
use signal_hook::consts::{SIGINT, SIGPIPE, SIGTSTP};
use signal_hook::SigId;

use super::ProcessError;
use crate::input::PROMPT;

pub const ENTER_FOREGROUND_ONLY: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
pub const EXIT_FOREGROUND_ONLY: &[u8] = b"\nExiting foreground-only mode\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Default,
    Ignore,
}

/// Set the disposition of `signal` with a plain `sigaction` call.
///
/// Safe to call between `fork` and `exec`.
pub fn set_disposition(signal: c_int, disposition: Disposition) -> io::Result<()> {
    // SAFETY: an all-zero sigaction is a valid value; every field we rely on is set below.
    let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
    action.sa_sigaction = match disposition {
        Disposition::Default => libc::SIG_DFL,
        Disposition::Ignore => libc::SIG_IGN,
    };
    action.sa_flags = libc::SA_RESTART;

    // SAFETY: both pointers are valid for the duration of the calls; the old action is not read.
    let res = unsafe {
        libc::sigemptyset(&mut action.sa_mask);
        libc::sigaction(signal, &action, ptr::null_mut())
    };
    if res == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Write `bytes` to `fd` without touching Rust's buffered streams.
pub(crate) fn write_raw(fd: c_int, bytes: &[u8]) {
    // SAFETY: the buffer is valid for `bytes.len()` bytes. A short or failed write is dropped;
    // there is nothing safe left to do about it here.
    unsafe {
        libc::write(fd, bytes.as_ptr().cast(), bytes.len());
    }
}

/// Body of the SIGTSTP handler: flip the mode flag and announce the new mode.
pub(crate) fn toggle_foreground_only(mode: &AtomicBool) {
    let was_on = mode.fetch_xor(true, Ordering::SeqCst);
    let banner = if was_on {
        EXIT_FOREGROUND_ONLY
    } else {
        ENTER_FOREGROUND_ONLY
    };
    write_raw(libc::STDOUT_FILENO, banner);
    write_raw(libc::STDOUT_FILENO, PROMPT.as_bytes());
}

/// Apply the child-side signal rules right after `fork`.
///
/// SIGPIPE goes back to its default action, undoing the ignore the Rust runtime set up for the
/// shell. SIGTSTP is always ignored. SIGINT goes back to its default action only for children that the
/// shell treats as foreground; background children inherit the shell's ignored SIGINT.
pub(crate) fn prepare_child(foreground: bool) {
    let _ = set_disposition(SIGPIPE, Disposition::Default);
    let _ = set_disposition(SIGTSTP, Disposition::Ignore);
    if foreground {
        let _ = set_disposition(SIGINT, Disposition::Default);
    }
}

/// Owns the shell's signal setup. Dropping it removes the SIGTSTP handler.
pub struct SignalManager {
    toggle: SigId,
}

impl SignalManager {
    /// Ignore SIGINT and route SIGTSTP to the foreground-only toggle.
    ///
    /// `mode` is the only state the handler touches and the handler is its only writer.
    pub fn install(mode: Arc<AtomicBool>) -> Result<Self, ProcessError> {
        set_disposition(SIGINT, Disposition::Ignore).map_err(ProcessError::SignalError)?;

        // SAFETY: the handler only performs an atomic read-modify-write and raw `write` calls,
        // all of which are async-signal-safe.
        let toggle = unsafe {
            signal_hook::low_level::register(SIGTSTP, move || toggle_foreground_only(&mode))
        }
        .map_err(ProcessError::SignalError)?;

        log::debug!("SIGINT ignored, SIGTSTP toggles foreground-only mode");
        Ok(SignalManager { toggle })
    }
}

impl Drop for SignalManager {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.toggle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_mode_both_ways() {
        let mode = AtomicBool::new(false);

        toggle_foreground_only(&mode);
        assert!(mode.load(Ordering::SeqCst));

        toggle_foreground_only(&mode);
        assert!(!mode.load(Ordering::SeqCst));
    }

    #[test]
    fn banners_are_single_lines() {
        for banner in [ENTER_FOREGROUND_ONLY, EXIT_FOREGROUND_ONLY] {
            let text = std::str::from_utf8(banner).unwrap_or_default();
            assert_eq!(text.trim().lines().count(), 1);
            assert!(text.ends_with('\n'));
        }
    }

    #[test]
    fn ignoring_and_restoring_a_signal() {
        let _guard = crate::test_support::serial();

        // SIGUSR2 is unused by the test harness.
        set_disposition(libc::SIGUSR2, Disposition::Ignore).unwrap();
        // SAFETY: querying the current action only.
        let current = unsafe {
            let mut old: libc::sigaction = std::mem::zeroed();
            libc::sigaction(libc::SIGUSR2, ptr::null(), &mut old);
            old.sa_sigaction
        };
        assert_eq!(current, libc::SIG_IGN);

        set_disposition(libc::SIGUSR2, Disposition::Default).unwrap();
    }
}
