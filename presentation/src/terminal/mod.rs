//! Interactive terminal front-end
//!
//! - [`command`]: parsing of typed lines
//! - [`control`]: one parameter control rendered as text
//! - [`frontend`]: the [`Frontend`](chainrun_application::Frontend) implementation
//! - [`input`]: background stdin reader

pub mod command;
pub mod control;
pub mod frontend;
pub mod input;

pub use command::{TerminalCommand, parse_command};
pub use control::TerminalControl;
pub use frontend::TerminalFrontend;
pub use input::{spawn_line_reader, spawn_stdin_reader};
