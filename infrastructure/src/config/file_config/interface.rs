//! Interface configuration from TOML (`[interface]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInterfaceConfig {
    /// Application title, shown after the tool name in the window title
    pub title: String,
}

impl Default for FileInterfaceConfig {
    fn default() -> Self {
        Self {
            title: "chainrun".to_string(),
        }
    }
}
