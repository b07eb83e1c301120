use std::collections::BTreeMap;
use std::path::PathBuf;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::core::ShellState;

#[derive(Debug)]
pub enum CommandError {
    HomeDirNotFound,
    ChangeDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::HomeDirNotFound => write!(f, "cd: home directory not found"),
            CommandError::ChangeDirectory { path, source } => {
                write!(f, "cd: {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ChangeDirectory { source, .. } => Some(source),
            CommandError::HomeDirNotFound => None,
        }
    }
}

/// What the interpreter loop does after a built-in returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A command handled inside the shell process.
///
/// Built-ins see the shell state read-only: they never change the last foreground status.
pub trait Builtin {
    fn execute(&self, args: &[String], state: &ShellState) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum BuiltinType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl Builtin for BuiltinType {
    fn execute(&self, args: &[String], state: &ShellState) -> Result<Flow, CommandError> {
        match self {
            BuiltinType::Cd(cmd) => cmd.execute(args, state),
            BuiltinType::Exit(cmd) => cmd.execute(args, state),
            BuiltinType::Status(cmd) => cmd.execute(args, state),
        }
    }
}

/// Name table for the reserved built-in commands.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, BuiltinType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", BuiltinType::Cd(CdCommand::new()));
        commands.insert("exit", BuiltinType::Exit(ExitCommand::new()));
        commands.insert("status", BuiltinType::Status(StatusCommand::new()));
        Builtins { commands }
    }

    /// Run `name` if it is a built-in; `None` means it must be executed externally.
    pub fn dispatch(
        &self,
        name: &str,
        args: &[String],
        state: &ShellState,
    ) -> Option<Result<Flow, CommandError>> {
        self.commands
            .get(name)
            .map(|cmd| cmd.execute(args, state))
    }

    #[cfg(test)]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ExitOutcome;

    #[test]
    fn builtin_command_detection() {
        let builtins = Builtins::new();

        assert!(builtins.is_builtin("cd"));
        assert!(builtins.is_builtin("exit"));
        assert!(builtins.is_builtin("status"));
        assert!(!builtins.is_builtin("echo"));
        assert!(!builtins.is_builtin("Exit"));
        assert!(!builtins.is_builtin(""));
    }

    #[test]
    fn dispatch_skips_external_commands() {
        let builtins = Builtins::new();
        let state = ShellState::new();
        assert!(builtins.dispatch("ls", &[], &state).is_none());
    }

    #[test]
    fn exit_stops_the_loop() {
        let builtins = Builtins::new();
        let state = ShellState::new();
        assert!(matches!(
            builtins.dispatch("exit", &[], &state),
            Some(Ok(Flow::Exit))
        ));
    }

    #[test]
    fn status_does_not_touch_state() {
        let builtins = Builtins::new();
        let mut state = ShellState::new();
        state.record_foreground(ExitOutcome::Exited(3));

        assert!(matches!(
            builtins.dispatch("status", &[], &state),
            Some(Ok(Flow::Continue))
        ));
        assert_eq!(state.last_status(), ExitOutcome::Exited(3));
    }

    #[test]
    fn command_error_display() {
        let errors = vec![
            CommandError::HomeDirNotFound,
            CommandError::ChangeDirectory {
                path: PathBuf::from("/missing"),
                source: std::io::Error::from_raw_os_error(libc::ENOENT),
            },
        ];

        for error in errors {
            assert!(error.to_string().starts_with("cd: "));
        }
    }
}
