use super::{Builtin, CommandError, Flow};
use crate::core::ShellState;

/// Ends the session. Background jobs are terminated by the loop before the process exits.
#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for ExitCommand {
    fn execute(&self, _args: &[String], _state: &ShellState) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_command() {
        let cmd = ExitCommand::new();
        let state = ShellState::new();
        assert_eq!(cmd.execute(&[], &state).unwrap(), Flow::Exit);
        assert_eq!(
            cmd.execute(&["3".to_string()], &state).unwrap(),
            Flow::Exit
        );
    }
}
