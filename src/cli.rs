//! Command-line argument parsing for the simulator
//!
//! Supports:
//! - Replaying a YAML session script (or the built-in demo session)
//! - Restoring and saving the panel state through a state file
//! - Text or JSON-lines event output

use clap::Parser;
use std::path::PathBuf;

/// Replay touch and nested-scroll sessions against a bottom sheet
#[derive(Parser, Debug)]
#[command(
    name = "tabsheet",
    version,
    about = "Replay touch and nested-scroll sessions against a bottom sheet"
)]
pub struct CliArgs {
    /// Session script to replay (YAML); the demo session runs when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Where the panel state is restored from and saved to
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Ignore any saved panel state
    #[arg(long)]
    pub fresh: bool,

    /// Print listener events as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Where the session comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    Demo,
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    JsonLines,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub session: SessionSource,
    /// State file to read and write; `None` disables persistence
    pub state_file: Option<PathBuf>,
    /// Skip restoring from `state_file`
    pub fresh: bool,
    pub output: OutputFormat,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    ///
    /// Without `--state-file` the default `~/.config/tabsheet/state.json` is used.
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let session = match self.script {
            Some(path) if path.is_dir() => {
                return Err(format!("{} is a directory, expected a script", path.display()))
            }
            Some(path) => SessionSource::File(path),
            None => SessionSource::Demo,
        };

        let state_file = self.state_file.or_else(crate::config_paths::state_file);

        Ok(StartupConfig {
            session,
            state_file,
            fresh: self.fresh,
            output: if self.json {
                OutputFormat::JsonLines
            } else {
                OutputFormat::Text
            },
        })
    }
}

impl StartupConfig {
    /// Whether a saved state should be restored before replaying
    pub fn should_restore(&self) -> bool {
        !self.fresh && self.state_file.as_ref().is_some_and(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(script: Option<&str>) -> CliArgs {
        CliArgs {
            script: script.map(PathBuf::from),
            state_file: Some(PathBuf::from("/nonexistent/state.json")),
            fresh: false,
            json: false,
        }
    }

    #[test]
    fn test_no_script_runs_demo() {
        let config = args(None).into_config().unwrap();
        assert_eq!(config.session, SessionSource::Demo);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_script_path() {
        let config = args(Some("session.yaml")).into_config().unwrap();
        assert_eq!(
            config.session,
            SessionSource::File(PathBuf::from("session.yaml"))
        );
    }

    #[test]
    fn test_directory_script_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = args(dir.path().to_str()).into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_state_file_not_restored() {
        let config = args(None).into_config().unwrap();
        assert!(!config.should_restore());
    }

    #[test]
    fn test_fresh_skips_restore() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut cli = args(None);
        cli.state_file = Some(file.path().to_path_buf());
        assert!(cli.into_config().unwrap().should_restore());

        let mut cli = args(None);
        cli.state_file = Some(file.path().to_path_buf());
        cli.fresh = true;
        assert!(!cli.into_config().unwrap().should_restore());
    }

    #[test]
    fn test_json_flag() {
        let mut cli = args(None);
        cli.json = true;
        assert_eq!(cli.into_config().unwrap().output, OutputFormat::JsonLines);
    }
}
