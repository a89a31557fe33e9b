//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised while assembling a run (registry lookups, launch
/// arguments, chain start). Per-parameter validation failures have their own
/// type, [`ParameterValidationError`](crate::parameter::ParameterValidationError).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool chain is empty")]
    ChainEmpty,

    #[error("Tool {0} not found.")]
    ToolNotFound(String),

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Unknown parameter '{parameter}' for tool '{tool}'")]
    UnknownParameter { tool: String, parameter: String },

    #[error("Invalid argument '{0}': expected param=value")]
    InvalidArgument(String),
}

impl DomainError {
    /// Process exit code used when this error aborts startup.
    ///
    /// An empty chain is reported as a distinct exit condition (2); every
    /// other startup failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DomainError::ChainEmpty => 2,
            _ => 1,
        }
    }
}
