//! Application-level configuration.
//!
//! These are the resolved settings the execution interface runs with.
//! Loading them from files and the environment is the infrastructure
//! layer's job (`ConfigLoader`).

/// Settings for the tool window and its dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceConfig {
    /// Application title, used as the window title suffix and dialog title.
    pub title: String,
    pub console: ConsoleConfig,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            title: "chainrun".to_string(),
            console: ConsoleConfig::default(),
        }
    }
}

impl InterfaceConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_console(mut self, console: ConsoleConfig) -> Self {
        self.console = console;
        self
    }

    /// `"<tool> - <title>"`
    pub fn window_title(&self, tool_name: &str) -> String {
        format!("{} - {}", tool_name, self.title)
    }
}

/// Console pane settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Maximum number of lines kept; older lines are dropped first.
    pub line_limit: usize,
    pub word_wrap: bool,
    pub auto_scroll: bool,
    /// Color name for stdout lines (e.g. "white")
    pub color_stdout: String,
    /// Color name for stderr lines (e.g. "red")
    pub color_stderr: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            line_limit: 1000,
            word_wrap: false,
            auto_scroll: true,
            color_stdout: "white".to_string(),
            color_stderr: "red".to_string(),
        }
    }
}
