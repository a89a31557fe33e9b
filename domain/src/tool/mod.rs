//! Tool domain module
//!
//! Tools are the units of work the engine sequences. Each tool is
//! registered as a [`ToolDescriptor`] (name, help, flags, factory) and
//! instantiated fresh every time the [`ToolChain`] reaches it.
//!
//! ```text
//! ┌────────────────┐  instantiate  ┌────────────────┐  execute  ┌──────────┐
//! │ ToolDescriptor │──────────────▶│ Box<dyn Tool>  │──────────▶│ exit code│
//! │ (registry)     │  + ToolData   │ (ParameterSet) │           │ 0 / != 0 │
//! └────────────────┘               └────────────────┘           └──────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolDescriptor`]: registration record with `headless`/`auto_advance` flags
//! - [`Tool`]: the trait plugin authors implement
//! - [`ToolInterface`]: callbacks (progress, dialogs, console, chain, commands)
//! - [`ToolChain`]: ordered queue + shared [`ToolData`] + cursor
//! - [`ToolProvider`]: a source of descriptors for the registry

pub mod chain;
pub mod entities;
pub mod launch;
pub mod provider;
pub mod traits;

pub use chain::ToolChain;
pub use entities::{CommandSpec, ToolData, ToolDescriptor, command_to_string};
pub use launch::parse_launch_arguments;
pub use provider::{ProviderError, ToolProvider};
pub use traits::{
    EXIT_ABORTED, EXIT_SPAWN_FAILED, NoOutputHandler, OutputHandler, OutputStream, Tool,
    ToolInterface,
};
