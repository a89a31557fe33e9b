//! Tool traits
//!
//! [`Tool`] is what plugin authors implement. [`ToolInterface`] is the
//! callback surface a running tool talks to; it is the same for interactive
//! and headless front-ends.

use super::entities::{CommandSpec, ToolData, ToolDescriptor};
use crate::parameter::ParameterSet;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exit code reported for a command the user aborted.
pub const EXIT_ABORTED: i32 = -1;

/// Exit code reported when a command could not be started.
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// Which pipe a line of process output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => f.write_str("stdout"),
            OutputStream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Per-line hook installed while a command runs.
///
/// Called for every line after it has been written to the console. Tools use
/// it to parse progress out of a command's output.
pub trait OutputHandler {
    fn on_line(&mut self, stream: OutputStream, line: &str, ui: &mut dyn ToolInterface);
}

impl<F> OutputHandler for F
where
    F: FnMut(OutputStream, &str, &mut dyn ToolInterface),
{
    fn on_line(&mut self, stream: OutputStream, line: &str, ui: &mut dyn ToolInterface) {
        self(stream, line, ui)
    }
}

/// Handler that ignores every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOutputHandler;

impl OutputHandler for NoOutputHandler {
    fn on_line(&mut self, _stream: OutputStream, _line: &str, _ui: &mut dyn ToolInterface) {}
}

/// Callbacks available to a tool while it executes.
#[async_trait(?Send)]
pub trait ToolInterface {
    // ==================== Progress ====================

    fn progress_start(&mut self);

    /// `fraction` is clamped to `0.0..=1.0`.
    fn progress_update(&mut self, message: &str, fraction: f64);

    fn progress_end(&mut self);

    // ==================== Dialogs ====================
    // These block the tool until the user acknowledges them.

    async fn message(&mut self, text: &str);

    async fn warning(&mut self, text: &str);

    async fn error(&mut self, text: &str);

    async fn ask(&mut self, text: &str) -> bool;

    // ==================== Console ====================

    fn write_stdout(&mut self, text: &str);

    fn write_stderr(&mut self, text: &str);

    // ==================== Chain ====================

    /// Data shared by every tool in the chain.
    fn tool_data(&self) -> &ToolData;

    fn tool_data_mut(&mut self) -> &mut ToolData;

    /// Enqueue a tool after the last one in the chain.
    fn add_tool(&mut self, descriptor: ToolDescriptor);

    // ==================== Processes ====================

    /// Run a command, streaming its output to the console.
    ///
    /// Returns the exit code, [`EXIT_ABORTED`] if the user aborted it, or
    /// [`EXIT_SPAWN_FAILED`] if it could not be started.
    async fn run_command(&mut self, command: &CommandSpec) -> i32 {
        self.run_command_with(command, &mut NoOutputHandler).await
    }

    /// Like [`run_command`](Self::run_command), calling `handler` for each line.
    async fn run_command_with(
        &mut self,
        command: &CommandSpec,
        handler: &mut dyn OutputHandler,
    ) -> i32;
}

/// A unit of work with typed parameters.
#[async_trait(?Send)]
pub trait Tool {
    fn parameters(&self) -> &ParameterSet;

    fn parameters_mut(&mut self) -> &mut ParameterSet;

    /// Do the work. `0` means success; anything else halts the chain.
    async fn execute(&mut self, ui: &mut dyn ToolInterface) -> i32;
}
