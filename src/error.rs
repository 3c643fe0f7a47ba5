//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.
//!
//! Failures of the commands launched from the menu are *not* errors here; the runner
//! reports them as a `CommandOutcome` value.

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Error related to standard I/O operations (terminal reads/writes, log directory).
    #[error("I/O Error: {0}")]
    Io(Arc<io::Error>),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Prompt Error: {0}")]
    Prompt(Arc<dialoguer::Error>),

    /// Invalid value in one of the `SITE_MENU_*` environment variables.
    #[error("Configuration Error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns `true` when the error is the user pressing Ctrl+C at a prompt.
    ///
    /// Prompts read keys in raw mode, so the interrupt surfaces as an
    /// `io::ErrorKind::Interrupted` read error instead of a signal.
    pub fn is_interrupt(&self) -> bool {
        match self {
            AppError::Io(e) => e.kind() == io::ErrorKind::Interrupted,
            AppError::Prompt(e) => match e.as_ref() {
                dialoguer::Error::IO(io_err) => io_err.kind() == io::ErrorKind::Interrupted,
            },
            AppError::Config(_) => false,
        }
    }
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(Arc::new(err))
    }
}
