//! Tool domain entities

use super::traits::Tool;
use crate::parameter::{ParamValue, ParameterValidationError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Data shared by every tool in a chain (`key → value`).
///
/// Seeded from launch arguments; tools read it and write handoff values
/// into it for their successors.
pub type ToolData = BTreeMap<String, ParamValue>;

type ToolFactory = Arc<dyn Fn() -> Box<dyn Tool> + Send + Sync>;

/// Registration record for a tool ("tool class").
///
/// Cheap to clone; instances are produced on demand by the factory.
#[derive(Clone)]
pub struct ToolDescriptor {
    /// Unique name across the registry (e.g., "run-command")
    pub name: String,
    /// One-paragraph help text shown next to the parameters
    pub help: String,
    /// Grouping used for listings and the persisted geometry key
    pub collection: String,
    /// Optional icon path or name
    pub custom_icon: Option<String>,
    headless: bool,
    auto_advance: bool,
    factory: ToolFactory,
}

impl ToolDescriptor {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Tool> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            help: String::new(),
            collection: String::new(),
            custom_icon: None,
            headless: false,
            auto_advance: false,
            factory: Arc::new(factory),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_custom_icon(mut self, icon: impl Into<String>) -> Self {
        self.custom_icon = Some(icon.into());
        self
    }

    /// Headless tools are executed without ever being shown.
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Auto-advance tools move on after success without a confirm gesture.
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    pub fn auto_advances(&self) -> bool {
        self.auto_advance
    }

    /// Key under which this tool's window geometry is persisted.
    pub fn geometry_key(&self) -> String {
        format!("{}::{}", self.collection, self.name)
    }

    /// Create a fresh instance and seed its parameters from `data`.
    ///
    /// Values in `data` that the tool rejects are returned alongside the
    /// instance; the parameter keeps its default in that case.
    pub fn instantiate(&self, data: &ToolData) -> (Box<dyn Tool>, Vec<ParameterValidationError>) {
        let mut tool = (self.factory)();
        let rejected = tool.parameters_mut().seed(data);
        (tool, rejected)
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("collection", &self.collection)
            .field("headless", &self.headless)
            .field("auto_advance", &self.auto_advance)
            .finish_non_exhaustive()
    }
}

/// An external command to run through the process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Run `command` through the platform shell.
    pub fn shell(command: impl Into<String>) -> Self {
        if cfg!(windows) {
            Self::new("cmd").arg("/C").arg(command)
        } else {
            Self::new("sh").arg("-c").arg(command)
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Shell-quoted rendering for logs and the console.
    pub fn to_command_string(&self) -> String {
        command_to_string(std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_string())
    }
}

/// Join words into a single POSIX-shell-quoted command line.
pub fn command_to_string<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words.into_iter().map(quote_word).collect::<Vec<_>>().join(" ")
}

fn quote_word(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}
