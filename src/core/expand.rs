use std::borrow::Cow;

/// Expands to the shell's own process id.
pub const PID_MARKER: &str = "$$";

/// Replace every `$$` in `input` with `pid`.
///
/// Matches are found left to right without overlap, and substituted text is never scanned
/// again. Input without a marker is returned as is.
pub fn expand_pid(input: &str, pid: u32) -> Cow<'_, str> {
    if !input.contains(PID_MARKER) {
        return Cow::Borrowed(input);
    }

    let pid = pid.to_string();
    let mut result = String::with_capacity(input.len() + pid.len());
    let mut rest = input;

    while let Some(pos) = rest.find(PID_MARKER) {
        result.push_str(&rest[..pos]);
        result.push_str(&pid);
        rest = &rest[pos + PID_MARKER.len()..];
    }
    result.push_str(rest);

    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_marker_is_borrowed() {
        let expanded = expand_pid("ls -la", 4567);
        assert!(matches!(expanded, Cow::Borrowed("ls -la")));
    }

    #[test]
    fn single_marker() {
        assert_eq!(expand_pid("echo $$", 4567), "echo 4567");
    }

    #[test]
    fn markers_anywhere() {
        assert_eq!(
            expand_pid("$$ a$$b $$$$", 12),
            "12 a12b 1212"
        );
    }

    #[test]
    fn odd_dollar_run_leaves_remainder() {
        assert_eq!(expand_pid("$$$", 7), "7$");
        assert_eq!(expand_pid("$", 7), "$");
    }

    #[test]
    fn expansion_is_stable_once_markers_are_gone() {
        let once = expand_pid("kill $$ && echo $$", 99).into_owned();
        let twice = expand_pid(&once, 99).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        // A lone `$` before the marker must not pair with the substituted text.
        assert_eq!(expand_pid("$$$$$", 1), "11$");
    }
}
