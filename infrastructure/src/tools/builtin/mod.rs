//! Built-in tools
//!
//! | Tool | Shows |
//! |------|-------|
//! | `headless` | a headless tool: progress and a message, no page |
//! | `keep-ui-open` | re-enqueueing itself with a `tool_data` handoff |
//! | `auto-advance` | confirm vs. auto-advance (`-auto`, `-close` follow) |
//! | `string-ui` | every string control kind |
//! | `run-command` | streaming a command with optional regex progress |

pub mod auto_advance;
pub mod headless;
pub mod keep_ui_open;
mod provider;
pub mod run_command;
pub mod string_ui;

#[cfg(test)]
pub(crate) mod testing;

pub use provider::{BUILTIN_PRIORITY, BuiltinProvider};

/// Collection every built-in tool belongs to.
pub const COLLECTION: &str = "Examples";
