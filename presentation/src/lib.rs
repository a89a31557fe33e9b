//! Presentation layer for chainrun
//!
//! This crate contains the CLI definition, output formatters and the
//! interactive terminal front-end.

pub mod cli;
pub mod output;
pub mod terminal;

// Re-export commonly used types
pub use cli::commands::{Cli, ListFormat};
pub use output::console::ConsoleFormatter;
pub use terminal::{TerminalFrontend, spawn_stdin_reader};
