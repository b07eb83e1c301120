use super::{Builtin, CommandError, Flow};
use crate::core::ShellState;

#[derive(Clone, Default)]
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }

    /// `exit value N` or `terminated by signal N` for the last foreground command.
    pub fn report(state: &ShellState) -> String {
        state.last_status().to_string()
    }
}

impl Builtin for StatusCommand {
    fn execute(&self, _args: &[String], state: &ShellState) -> Result<Flow, CommandError> {
        println!("{}", Self::report(state));
        Ok(Flow::Continue)
    }
}
