use crate::core::commands::Flow;
use crate::core::expand::expand_pid;
use crate::core::parser;
use crate::error::ShellError;
use crate::process::{ExitOutcome, Launch};

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let expanded = expand_pid(line, self.state.shell_pid());

        // One read of the mode governs both the redirection defaults and the wait decision.
        let foreground_only = self.state.foreground_only();
        let command = parser::parse(&expanded, foreground_only)?;

        if let Some(result) = self
            .builtins
            .dispatch(command.program(), command.args(), &self.state)
        {
            return Ok(result?);
        }

        match self.executor.launch(&command, foreground_only)? {
            Launch::Foreground(outcome) => {
                if let ExitOutcome::Signaled(_) = outcome {
                    println!("{}", outcome);
                }
                self.state.record_foreground(outcome);
            }
            Launch::Background(pid) => {
                println!("background pid is {}", pid);
                self.jobs.track(pid);
            }
        }

        Ok(Flow::Continue)
    }
}
