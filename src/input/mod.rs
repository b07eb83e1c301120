mod helper;

use std::io::{self, BufRead, IsTerminal, Write};

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

pub use helper::LineHelper;

use crate::error::ShellError;

/// Printed before every read.
pub const PROMPT: &str = ": ";

/// Source of input lines: a line editor on a terminal, plain reads otherwise.
pub enum LineReader {
    Interactive(Box<Editor<LineHelper, DefaultHistory>>),
    Piped(io::Stdin),
}

impl LineReader {
    pub fn new() -> Result<Self, ShellError> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            log::debug!("stdin is not a terminal, reading lines directly");
            return Ok(LineReader::Piped(stdin));
        }

        let mut editor = Editor::<LineHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(LineHelper::new()));
        Ok(LineReader::Interactive(Box::new(editor)))
    }

    /// Prompt and read one line without its terminator. `None` means end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, ShellError> {
        match self {
            LineReader::Interactive(editor) => match editor.readline(PROMPT) {
                Ok(line) => {
                    if !is_ignorable(&line) {
                        if let Err(e) = editor.add_history_entry(line.as_str()) {
                            log::warn!("couldn't add to history: {}", e);
                        }
                    }
                    Ok(Some(line))
                }
                Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
                Err(ReadlineError::Eof) => Ok(None),
                Err(e) => Err(e.into()),
            },
            LineReader::Piped(stdin) => {
                let mut stdout = io::stdout();
                stdout.write_all(PROMPT.as_bytes())?;
                stdout.flush()?;

                // Bytes that are not UTF-8 are replaced rather than ending the session.
                let mut raw = Vec::new();
                if stdin.lock().read_until(b'\n', &mut raw)? == 0 {
                    return Ok(None);
                }
                let line = String::from_utf8_lossy(&raw);
                Ok(Some(strip_line_ending(&line).to_string()))
            }
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Blank lines and comments are skipped without running anything.
pub fn is_ignorable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}
