//! Defines the data structures used throughout the application.
//!
//! The menu is static: a fixed table of sections and options, plus the platform
//! classification that picks between the two flavours of the file-opening commands.

mod menu;

pub use menu::*;
