//! Infrastructure layer for chainrun
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, configuration file loading, and the
//! tool registry with its built-in tools.

pub mod config;
pub mod process;
pub mod state;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, ConfigSources, FileConfig};
pub use process::TokioProcessRunner;
pub use state::TomlGeometryStore;
pub use tools::{BuiltinProvider, ToolRegistry};
