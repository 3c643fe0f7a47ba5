//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the argument parser (no operational flags), the interactive menu loop,
//! terminal prompts and environment-driven settings.

mod commands;
mod prompt;
mod settings;

pub use commands::*;
pub use prompt::*;
pub use settings::*;
