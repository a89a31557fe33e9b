//! Terminal rendition of a parameter control.

use chainrun_application::{Control, ControlKind};
use chainrun_domain::{ParamValue, Parameter};
use colored::Colorize;

/// A control shown as one line of text.
///
/// Static details (caption, choices, range) are captured when the control
/// is created; the binding rebuilds the control when they change.
#[derive(Debug, Clone)]
pub struct TerminalControl {
    name: String,
    kind: ControlKind,
    description: String,
    choices: Vec<String>,
    range: Option<(f64, f64)>,
    value: Option<ParamValue>,
    enabled: bool,
    visible: bool,
    error: Option<String>,
    changed: bool,
}

impl TerminalControl {
    pub fn new(parameter: &Parameter, kind: ControlKind) -> Self {
        let options = parameter.options();
        let range = match (options.minimum(), options.maximum()) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        };
        Self {
            name: parameter.name().to_string(),
            kind,
            description: parameter.description().to_string(),
            choices: parameter
                .choices()
                .map(|c| c.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
            range,
            value: None,
            enabled: true,
            visible: true,
            error: None,
            changed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether anything changed since the last [`take_changed`](Self::take_changed).
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    fn display_value(&self) -> String {
        match (&self.value, self.kind) {
            (None, _) => String::new(),
            (Some(v), ControlKind::Password) => "*".repeat(v.to_string().chars().count()),
            (Some(ParamValue::Bool(b)), ControlKind::CheckBox | ControlKind::Button) => {
                let mark = if *b { "[x]" } else { "[ ]" };
                mark.to_string()
            }
            (Some(v), _) => v.to_string(),
        }
    }

    /// The line shown on the tool page.
    pub fn render(&self) -> String {
        if self.kind.is_read_only() {
            return self.display_value();
        }

        let mut line = if self.kind.shows_caption() {
            format!("{} = {}", self.name.bold(), self.display_value())
        } else {
            format!("{} {}", self.display_value(), self.name.bold())
        };

        if !self.choices.is_empty() {
            line.push_str(&format!("  ({})", self.choices.join(" | ")).dimmed().to_string());
        }
        if let Some((min, max)) = self.range {
            line.push_str(&format!("  [{}..{}]", min, max).dimmed().to_string());
        }
        line.push_str(&format!("  <{}>", self.kind).dimmed().to_string());
        if !self.enabled {
            line.push_str(&"  (disabled)".dimmed().to_string());
        }
        if !self.description.is_empty() {
            line.push_str(&format!("\n      {}", self.description.dimmed()));
        }
        if let Some(error) = &self.error {
            line.push_str(&format!("\n      {} {}", "!".red().bold(), error.red()));
        }
        line
    }

    /// Feedback line after a change: the error, or the accepted value.
    pub fn feedback(&self) -> String {
        match &self.error {
            Some(error) => format!("{} {}", "x".red(), error),
            None => format!("{} {} = {}", "v".green(), self.name, self.display_value()),
        }
    }
}

impl Control for TerminalControl {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn value(&self) -> Option<ParamValue> {
        self.value.clone()
    }

    fn set_value(&mut self, value: Option<&ParamValue>) {
        self.value = value.cloned();
        self.changed = true;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_error(&mut self, error: Option<&str>) {
        if self.error.as_deref() != error {
            self.changed = true;
        }
        self.error = error.map(str::to_string);
    }
}
