//! Provides execution of external commands through the host shell.
//!
//! Exactly one child process runs at a time; the caller waits for it.

mod runner;

pub use runner::*;
