//! Open mapping of UI hints attached to a parameter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const OPTION_UI: &str = "ui";
pub const OPTION_MINIMUM: &str = "minimum";
pub const OPTION_MAXIMUM: &str = "maximum";
pub const OPTION_ENABLED: &str = "enabled";
pub const OPTION_VISIBLE: &str = "visible";
pub const OPTION_REQUIRED: &str = "required";

/// UI hints for a parameter (`ui`, `minimum`, `maximum`, `enabled`,
/// `visible`, ...).
///
/// Unknown keys are kept as-is so front-ends can read their own hints
/// (e.g. `accept` filters for file dialogs, `ticks` for sliders).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterOptions {
    entries: BTreeMap<String, Value>,
}

impl ParameterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Control style hint, e.g. `"password"` or `"file-open"`.
    pub fn ui(&self) -> Option<&str> {
        self.get(OPTION_UI).and_then(|v| v.as_str())
    }

    pub fn minimum(&self) -> Option<f64> {
        self.get(OPTION_MINIMUM).and_then(|v| v.as_f64())
    }

    pub fn maximum(&self) -> Option<f64> {
        self.get(OPTION_MAXIMUM).and_then(|v| v.as_f64())
    }

    pub fn enabled(&self) -> bool {
        self.flag(OPTION_ENABLED, true)
    }

    pub fn visible(&self) -> bool {
        self.flag(OPTION_VISIBLE, true)
    }

    pub fn required(&self) -> bool {
        self.flag(OPTION_REQUIRED, false)
    }

    /// Read a boolean hint, falling back to `default` when absent or not a bool.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }
}
