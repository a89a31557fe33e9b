//! Tool registry and built-in tools
//!
//! Tools are organized into providers:
//! - `builtin`: the example tools that ship with chainrun - always available
//!
//! The [`ToolRegistry`] merges every provider's tools once at startup.

pub mod builtin;

mod registry;

pub use builtin::BuiltinProvider;
pub use registry::ToolRegistry;
