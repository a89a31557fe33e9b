//! Console configuration from TOML (`[console]` section)

use chainrun_application::ConsoleConfig;
use serde::{Deserialize, Serialize};

/// Raw console configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsoleConfig {
    /// Lines kept before the oldest is dropped
    pub line_limit: usize,
    pub word_wrap: bool,
    pub auto_scroll: bool,
    /// Color name for stdout lines
    pub color_stdout: String,
    /// Color name for stderr lines
    pub color_stderr: String,
}

impl Default for FileConsoleConfig {
    fn default() -> Self {
        let defaults = ConsoleConfig::default();
        Self {
            line_limit: defaults.line_limit,
            word_wrap: defaults.word_wrap,
            auto_scroll: defaults.auto_scroll,
            color_stdout: defaults.color_stdout,
            color_stderr: defaults.color_stderr,
        }
    }
}

impl FileConsoleConfig {
    pub fn to_console_config(&self) -> ConsoleConfig {
        let defaults = ConsoleConfig::default();
        ConsoleConfig {
            line_limit: if self.line_limit == 0 {
                defaults.line_limit
            } else {
                self.line_limit
            },
            word_wrap: self.word_wrap,
            auto_scroll: self.auto_scroll,
            color_stdout: self.color_stdout.clone(),
            color_stderr: self.color_stderr.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_str = r#"
[console]
word_wrap = true
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.console.word_wrap);
        assert_eq!(config.console.line_limit, 1000);
        assert_eq!(config.console.color_stderr, "red");
    }
}
