use crate::core::commands::CommandError;
use crate::core::parser::ParseError;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    Parse(ParseError),
    Command(CommandError),
    ProcessError(ProcessError),
    FlagError(String),
}

impl ShellError {
    /// Errors after which the interpreter loop cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::ProcessError(ProcessError::Fork(_)))
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ParseError> for ShellError {
    fn from(err: ParseError) -> Self {
        ShellError::Parse(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::Command(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::Parse(e) => write!(f, "{}", e),
            ShellError::Command(e) => write!(f, "{}", e),
            ShellError::ProcessError(e) => write!(f, "{}", e),
            ShellError::FlagError(msg) => write!(f, "flag error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fork_failure_is_fatal() {
        let fork = ShellError::from(ProcessError::Fork(std::io::Error::from_raw_os_error(
            libc::EAGAIN,
        )));
        assert!(fork.is_fatal());

        let parse = ShellError::from(ParseError::EmptyCommand);
        assert!(!parse.is_fatal());

        let wait = ShellError::from(ProcessError::Wait(std::io::Error::from_raw_os_error(
            libc::ECHILD,
        )));
        assert!(!wait.is_fatal());
    }

    #[test]
    fn parse_errors_display_without_prefix() {
        let err = ShellError::from(ParseError::MissingRedirectTarget('<'));
        assert_eq!(err.to_string(), "malformed redirection: `<` needs a path");
    }
}
