use std::env;
use std::path::PathBuf;

use super::{Builtin, CommandError, Flow};
use crate::core::ShellState;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// `$HOME`, falling back to the platform's idea of the home directory.
    fn home_dir() -> Result<PathBuf, CommandError> {
        match env::var_os("HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => dirs::home_dir().ok_or(CommandError::HomeDirNotFound),
        }
    }
}

impl Builtin for CdCommand {
    fn execute(&self, args: &[String], _state: &ShellState) -> Result<Flow, CommandError> {
        let target = match args.first() {
            Some(path) => PathBuf::from(path),
            None => Self::home_dir()?,
        };

        env::set_current_dir(&target).map_err(|source| CommandError::ChangeDirectory {
            path: target.clone(),
            source,
        })?;
        log::debug!("working directory is now {}", target.display());
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cd_home_and_back() {
        let _guard = crate::test_support::serial();
        let cmd = CdCommand::new();
        let state = ShellState::new();
        let start = env::current_dir().unwrap();

        let temp_dir = env::temp_dir().canonicalize().unwrap();
        cmd.execute(&[temp_dir.to_str().unwrap().to_string()], &state)
            .unwrap();
        assert_eq!(env::current_dir().unwrap(), temp_dir);

        if let Ok(home) = CdCommand::home_dir() {
            if home.is_dir() {
                cmd.execute(&[], &state).unwrap();
                assert_eq!(
                    env::current_dir().unwrap(),
                    home.canonicalize().unwrap()
                );
            }
        }

        env::set_current_dir(start).unwrap();
    }

    #[test]
    fn test_cd_invalid() {
        let _guard = crate::test_support::serial();
        let cmd = CdCommand::new();
        let state = ShellState::new();
        let start = env::current_dir().unwrap();

        let result = cmd.execute(&["/nonexistent/vena/path".to_string()], &state);
        assert!(matches!(
            result,
            Err(CommandError::ChangeDirectory { ref path, .. }) if path == &PathBuf::from("/nonexistent/vena/path")
        ));
        assert_eq!(env::current_dir().unwrap(), start);
    }
}
