//! Domain layer for chainrun
//!
//! This crate contains the core types of the tool-chain engine. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Parameter
//!
//! A typed, named, validated value cell with three change notifiers (value,
//! choices, options). `validate` is the single acceptance authority.
//!
//! ## Tool / ToolChain
//!
//! - **ToolDescriptor**: registration record with a factory
//! - **Tool**: an instance owning its parameters, created fresh per visit
//! - **ToolChain**: ordered, growing queue with shared invocation data

pub mod core;
pub mod parameter;
pub mod tool;

// Re-export commonly used types
pub use core::error::DomainError;
pub use parameter::{
    DataType, FileExists, FnValidator, FolderExists, NotEmpty, Notifier, ParamValue, Parameter,
    ParameterOptions, ParameterSet, ParameterValidationError, SubscriptionId, Validator,
};
pub use tool::{
    CommandSpec, EXIT_ABORTED, EXIT_SPAWN_FAILED, NoOutputHandler, OutputHandler, OutputStream,
    ProviderError, Tool, ToolChain, ToolData, ToolDescriptor, ToolInterface, ToolProvider,
    command_to_string, parse_launch_arguments,
};
