//! Built-in tool provider
//!
//! Supplies the example tools that ship with chainrun. Any other provider
//! can override one of them by registering a tool with the same name.

use chainrun_domain::{ProviderError, ToolDescriptor, ToolProvider};

use super::{auto_advance, headless, keep_ui_open, run_command, string_ui};

/// Priority for the built-in provider (lowest, used as fallback)
pub const BUILTIN_PRIORITY: i32 = -100;

/// Built-in tool provider
#[derive(Debug, Clone, Default)]
pub struct BuiltinProvider;

impl BuiltinProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ToolProvider for BuiltinProvider {
    fn id(&self) -> &str {
        "builtin"
    }

    fn display_name(&self) -> &str {
        "Built-in Tools"
    }

    fn priority(&self) -> i32 {
        BUILTIN_PRIORITY
    }

    fn discover_tools(&self) -> Result<Vec<ToolDescriptor>, ProviderError> {
        Ok(vec![
            headless::descriptor(),
            keep_ui_open::descriptor(),
            auto_advance::descriptor(),
            string_ui::descriptor(),
            run_command::descriptor(),
        ])
    }
}
