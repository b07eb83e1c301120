use inksac::prelude::*;

use crate::core::expand::PID_MARKER;
use crate::core::parser::{BACKGROUND_MARKER, INPUT_REDIRECT, OUTPUT_REDIRECT};

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Colour the line being edited. Whitespace is preserved exactly so the cursor stays put.
    pub fn highlight_line(&self, input: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) || input.trim().is_empty() {
            return input.to_string();
        }

        if input.starts_with('#') {
            return self.highlight_hint(input);
        }

        let mut seen_command = false;
        input
            .split(' ')
            .map(|word| {
                if word.is_empty() {
                    return String::new();
                }
                if !seen_command {
                    seen_command = true;
                    let command_style = Style::builder()
                        .foreground(Color::Cyan)
                        .bold()
                        .build();
                    return word.style(command_style).to_string();
                }
                match word {
                    INPUT_REDIRECT | OUTPUT_REDIRECT | BACKGROUND_MARKER => {
                        let operator_style = Style::builder()
                            .foreground(Color::Yellow)
                            .bold()
                            .build();
                        word.style(operator_style).to_string()
                    }
                    w if w.contains(PID_MARKER) => {
                        let variable_style = Style::builder()
                            .foreground(Color::Green)
                            .build();
                        w.style(variable_style).to_string()
                    }
                    w => w.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> SyntaxHighlighter {
        SyntaxHighlighter {
            color_support: ColorSupport::NoColor,
        }
    }

    #[test]
    fn no_color_leaves_line_untouched() {
        let line = "cat  < in   > out &";
        assert_eq!(plain().highlight_line(line), line);
        assert_eq!(plain().highlight_hint("# note"), "# note");
    }

    #[test]
    fn highlighting_keeps_words_and_spacing() {
        let highlighter = SyntaxHighlighter::new();
        let line = "echo  $$ > out &";
        let highlighted = highlighter.highlight_line(line);
        for word in ["echo", "$$", ">", "out", "&"] {
            assert!(highlighted.contains(word));
        }
        assert!(highlighted.len() >= line.len());
    }
}
