//! Application layer for chainrun
//!
//! This crate contains the execution interface, the parameter binding
//! protocol, port definitions and application configuration.
//! It depends only on the domain layer.

pub mod binding;
pub mod config;
pub mod console;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use binding::{BindingAdapter, BindingError, BindingSet, ControlKind, control_kind_for};
pub use config::{ConsoleConfig, InterfaceConfig};
pub use console::ConsoleBuffer;
pub use ports::{
    frontend::{ChainPosition, Control, Frontend, SharedControl, ToolPage, UserEvent},
    geometry_store::{GeometryStore, InMemoryGeometryStore, StateStoreError, WindowGeometry},
    process::{OutputLine, ProcessError, ProcessRunnerPort, RunningProcess},
};
pub use use_cases::execution_interface::{
    CLOSE_WHILE_RUNNING, EngineError, ExecutionInterface, InterfaceState, PROCESS_TERMINATED,
    RunOutcome, ToolContext,
};
