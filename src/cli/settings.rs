//! Runtime settings read from the environment.
//!
//! No configuration file is read. Every setting has a default and can be overridden
//! with a `SITE_MENU_*` variable.

use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming the package-script runner.
pub const RUNNER_ENV: &str = "SITE_MENU_RUNNER";
/// Environment variable naming a directory for log files.
pub const LOG_DIR_ENV: &str = "SITE_MENU_LOG_DIR";

/// Runner used when `SITE_MENU_RUNNER` is unset or empty.
pub const DEFAULT_RUNNER: &str = "npm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Executable used for `run <script>` and `install` (e.g. `npm`, `pnpm`).
    pub runner: String,
    /// When set, logs are written to a rolling file here instead of stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            runner: DEFAULT_RUNNER.to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the runner contains whitespace, since it is
    /// spliced into a shell command as a single word.
    pub fn from_env() -> Result<Self> {
        let runner = non_empty_var(RUNNER_ENV).unwrap_or_else(|| DEFAULT_RUNNER.to_string());
        if runner.chars().any(char::is_whitespace) {
            return Err(AppError::Config(format!(
                "{} must be a single executable name, got {:?}",
                RUNNER_ENV, runner
            )));
        }

        let log_dir = non_empty_var(LOG_DIR_ENV).map(PathBuf::from);

        let settings = Self { runner, log_dir };
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}

/// Reads `key`, treating unset, non-unicode and blank values alike.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(RUNNER_ENV);
        env::remove_var(LOG_DIR_ENV);
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear_env();
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn blank_values_fall_back_to_defaults() {
        clear_env();
        env::set_var(RUNNER_ENV, "   ");
        env::set_var(LOG_DIR_ENV, "");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.runner, DEFAULT_RUNNER);
        assert!(settings.log_dir.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn overrides_are_read() {
        clear_env();
        env::set_var(RUNNER_ENV, "pnpm");
        env::set_var(LOG_DIR_ENV, "/tmp/site-menu-logs");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.runner, "pnpm");
        assert_eq!(settings.log_dir, Some(PathBuf::from("/tmp/site-menu-logs")));
        clear_env();
    }

    #[test]
    #[serial]
    fn runner_with_whitespace_is_rejected() {
        clear_env();
        env::set_var(RUNNER_ENV, "npm --silent");
        match Settings::from_env() {
            Err(AppError::Config(msg)) => assert!(msg.contains(RUNNER_ENV)),
            other => panic!("expected Config error, got {:?}", other),
        }
        clear_env();
    }
}
