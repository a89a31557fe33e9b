//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`InterfaceConfig`] once merged.

mod console;
mod interface;
mod state;

pub use console::FileConsoleConfig;
pub use interface::FileInterfaceConfig;
pub use state::FileStateConfig;

use chainrun_application::{ConsoleConfig, InterfaceConfig};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Window and dialog settings
    pub interface: FileInterfaceConfig,
    /// Output console settings
    pub console: FileConsoleConfig,
    /// Persisted state location
    pub state: FileStateConfig,
}

impl FileConfig {
    /// Check the merged configuration, returning a message per problem.
    ///
    /// Problems are never fatal; the offending value falls back to its
    /// default in [`to_interface_config`](Self::to_interface_config).
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.interface.title.trim().is_empty() {
            issues.push("interface.title: empty, using the default title".to_string());
        }
        if self.console.line_limit == 0 {
            issues.push(format!(
                "console.line_limit: must be at least 1, using {}",
                ConsoleConfig::default().line_limit
            ));
        }

        issues
    }

    /// Convert to the settings the execution interface runs with.
    pub fn to_interface_config(&self) -> InterfaceConfig {
        let defaults = InterfaceConfig::default();
        let title = if self.interface.title.trim().is_empty() {
            defaults.title
        } else {
            self.interface.title.clone()
        };
        InterfaceConfig::default()
            .with_title(title)
            .with_console(self.console.to_console_config())
    }
}
