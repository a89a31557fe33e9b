//! Process runner port
//!
//! The execution interface spawns external commands through
//! [`ProcessRunnerPort`] and drains them line by line:
//!
//! ```text
//! spawn(CommandSpec) ──▶ RunningProcess
//!                           │ next_output() ─▶ Some(OutputLine) ... None (both pipes closed)
//!                           │ terminate()   ─▶ SIGTERM, then kill
//!                           └ wait()        ─▶ exit code
//! ```

use async_trait::async_trait;
use chainrun_domain::{CommandSpec, OutputStream};
use thiserror::Error;

/// One line of process output, without its trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            text: text.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("Process I/O error: {0}")]
    Io(String),
}

/// A spawned child process.
#[async_trait(?Send)]
pub trait RunningProcess {
    /// OS process id, if still known.
    fn id(&self) -> Option<u32>;

    /// Next line from stdout or stderr, in arrival order.
    ///
    /// Returns `None` once both pipes are closed. Must be cancel-safe: a
    /// dropped call never loses a line.
    async fn next_output(&mut self) -> Option<OutputLine>;

    /// Wait for exit. A process killed by a signal reports a non-zero code.
    async fn wait(&mut self) -> Result<i32, ProcessError>;

    /// Ask the process to stop (SIGTERM where available), then kill it.
    async fn terminate(&mut self);
}

/// Port for starting external commands.
pub trait ProcessRunnerPort: Send + Sync {
    fn spawn(&self, command: &CommandSpec) -> Result<Box<dyn RunningProcess>, ProcessError>;
}
