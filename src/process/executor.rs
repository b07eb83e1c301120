use std::ffi::CString;
use std::io::{self, Write};

use libc::{c_char, c_int};

use super::signal::{self, write_raw};
use super::wait::{wait_for, ExitOutcome};
use super::{ProcessError, ProcessId};
use crate::core::parser::Command;

/// What the parent observed after launching a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The child was waited for and finished this way.
    Foreground(ExitOutcome),
    /// The child keeps running; its outcome is collected later by the reaper.
    Background(ProcessId),
}

/// A redirection prepared for use after `fork`.
struct Redirect {
    path: CString,
    flags: c_int,
    failure: Vec<u8>,
}

impl Redirect {
    fn input(path: &str) -> Result<Self, ProcessError> {
        Ok(Redirect {
            path: to_cstring(path)?,
            flags: libc::O_RDONLY,
            failure: format!("cannot open {} for input\n", path).into_bytes(),
        })
    }

    fn output(path: &str) -> Result<Self, ProcessError> {
        Ok(Redirect {
            path: to_cstring(path)?,
            flags: libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            failure: format!("cannot open {} for output\n", path).into_bytes(),
        })
    }

    /// Open the file and make it `target`. Runs in the child only; exits the child on failure.
    fn bind(&self, target: c_int) {
        // SAFETY: `path` is a valid NUL-terminated string; `open`, `dup2` and `fcntl` are
        // async-signal-safe.
        unsafe {
            let fd = libc::open(self.path.as_ptr(), self.flags, 0o644 as libc::c_uint);
            if fd == -1 {
                write_raw(libc::STDERR_FILENO, &self.failure);
                libc::_exit(1);
            }
            // `open` may hand back `target` itself when that stream was closed.
            if fd != target {
                if libc::dup2(fd, target) == -1 {
                    write_raw(libc::STDERR_FILENO, &self.failure);
                    libc::_exit(1);
                }
                libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC);
            }
        }
    }
}

/// Everything the child needs, allocated before `fork`.
///
/// `argv_ptrs` points into the heap buffers owned by `argv` and ends with a null pointer.
struct ChildImage {
    argv: Vec<CString>,
    argv_ptrs: Vec<*const c_char>,
    input: Option<Redirect>,
    output: Option<Redirect>,
    not_found: Vec<u8>,
}

impl ChildImage {
    fn prepare(command: &Command) -> Result<Self, ProcessError> {
        let argv = command
            .arguments()
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let argv_ptrs = argv
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(std::ptr::null()))
            .collect();

        Ok(ChildImage {
            argv,
            argv_ptrs,
            input: command.input().map(Redirect::input).transpose()?,
            output: command.output().map(Redirect::output).transpose()?,
            not_found: format!("{}: command not found\n", command.program()).into_bytes(),
        })
    }

    /// Child side of the fork: signals, redirections, then program replacement.
    fn exec(&self, foreground: bool) -> ! {
        signal::prepare_child(foreground);

        if let Some(input) = &self.input {
            input.bind(libc::STDIN_FILENO);
        }
        if let Some(output) = &self.output {
            output.bind(libc::STDOUT_FILENO);
        }

        // SAFETY: `argv_ptrs` is a null-terminated array of valid C strings kept alive by `argv`.
        unsafe {
            libc::execvp(self.argv[0].as_ptr(), self.argv_ptrs.as_ptr());
        }

        write_raw(libc::STDERR_FILENO, &self.not_found);
        // SAFETY: terminating the child without running the parent's atexit handlers.
        unsafe { libc::_exit(1) }
    }
}

fn to_cstring(value: &str) -> Result<CString, ProcessError> {
    CString::new(value).map_err(|_| ProcessError::InvalidArgument(value.to_string()))
}

#[derive(Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        ProcessExecutor
    }

    /// Fork, set up and exec `command`.
    ///
    /// The child runs in the foreground when the command was not marked background or when
    /// `foreground_only` is set; the parent then blocks until it terminates.
    pub fn launch(&self, command: &Command, foreground_only: bool) -> Result<Launch, ProcessError> {
        let image = ChildImage::prepare(command)?;
        let foreground = !command.is_background() || foreground_only;

        // Pending output would otherwise interleave with the child's.
        let _ = io::stdout().flush();

        // SAFETY: the child only calls async-signal-safe functions on memory allocated above
        // before it execs or exits.
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(ProcessError::Fork(io::Error::last_os_error())),
            0 => image.exec(foreground),
            pid => {
                log::debug!(
                    "spawned {} as {} ({})",
                    command.program(),
                    pid,
                    if foreground { "foreground" } else { "background" }
                );
                if foreground {
                    let outcome = wait_for(pid).map_err(ProcessError::Wait)?;
                    log::debug!("foreground {} finished: {}", pid, outcome);
                    Ok(Launch::Foreground(outcome))
                } else {
                    Ok(Launch::Background(pid))
                }
            }
        }
    }
}
