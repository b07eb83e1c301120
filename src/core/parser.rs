use std::fmt;

/// Trailing token that sends a command to the background.
pub const BACKGROUND_MARKER: &str = "&";
pub const INPUT_REDIRECT: &str = "<";
pub const OUTPUT_REDIRECT: &str = ">";
/// Where background commands read from and write to unless redirected explicitly.
pub const NULL_DEVICE: &str = "/dev/null";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing left to run once the background marker is removed.
    EmptyCommand,
    /// A redirection operator was the last token.
    MissingRedirectTarget(char),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyCommand => write!(f, "syntax error: missing command"),
            ParseError::MissingRedirectTarget(op) => {
                write!(f, "malformed redirection: `{}` needs a path", op)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Program name followed by its arguments; never empty.
    arguments: Vec<String>,
    input: Option<String>,
    output: Option<String>,
    background: bool,
}

impl Command {
    pub fn program(&self) -> &str {
        &self.arguments[0]
    }

    /// The full argument vector, program name included.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        &self.arguments[1..]
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn is_background(&self) -> bool {
        self.background
    }
}

/// Parse an already expanded line into a [`Command`].
///
/// `foreground_only` is the mode in effect right now: outside of it, a background command gets
/// [`NULL_DEVICE`] for whichever of its streams was not redirected.
pub fn parse(line: &str, foreground_only: bool) -> Result<Command, ParseError> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();

    let background = tokens.last() == Some(&BACKGROUND_MARKER);
    if background {
        tokens.pop();
    }

    let mut tokens = tokens.into_iter();
    let program = tokens.next().ok_or(ParseError::EmptyCommand)?;

    let mut arguments = vec![program.to_string()];
    let mut input = None;
    let mut output = None;

    while let Some(token) = tokens.next() {
        match token {
            INPUT_REDIRECT => {
                let path = tokens.next().ok_or(ParseError::MissingRedirectTarget('<'))?;
                input = Some(path.to_string());
            }
            OUTPUT_REDIRECT => {
                let path = tokens.next().ok_or(ParseError::MissingRedirectTarget('>'))?;
                output = Some(path.to_string());
            }
            _ => arguments.push(token.to_string()),
        }
    }

    if background && !foreground_only {
        input.get_or_insert_with(|| NULL_DEVICE.to_string());
        output.get_or_insert_with(|| NULL_DEVICE.to_string());
    }

    Ok(Command {
        arguments,
        input,
        output,
        background,
    })
}
