//! Front-end port
//!
//! The execution interface drives a [`Frontend`] and reads user gestures
//! back from it as [`UserEvent`]s.
//!
//! ```text
//!            ExecutionInterface
//!        ┌──────────┴───────────┐
//!  tool_loaded / create_control  │ next_event()
//!  progress_* / dialogs / console│
//!        ▼                       │
//!   ┌──────────────────────────────────┐
//!   │ Frontend (terminal, test script) │
//!   └──────────────────────────────────┘
//! ```
//!
//! Controls never call back into the engine. A user edit reaches the engine
//! only as [`UserEvent::Edit`], so programmatic control updates can't loop.

use crate::binding::kind::ControlKind;
use crate::ports::geometry_store::WindowGeometry;
use crate::ports::process::OutputLine;
use crate::use_cases::execution_interface::InterfaceState;
use async_trait::async_trait;
use chainrun_domain::{ParamValue, Parameter, ToolDescriptor};
use std::cell::RefCell;
use std::rc::Rc;

/// A gesture from the user.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// The user changed a control's value.
    Edit { parameter: String, value: ParamValue },
    /// Run the current tool, or confirm moving on after it succeeded.
    Next,
    /// Close the window.
    Close,
    /// Abort the running process without closing.
    Abort,
}

/// Where the current tool sits in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainPosition {
    pub index: usize,
    pub count: usize,
}

impl ChainPosition {
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.count
    }

    /// Label for the execute button: "Run" on the last tool, "Next" otherwise.
    pub fn action_label(&self) -> &'static str {
        if self.is_last() { "Run" } else { "Next" }
    }
}

/// What the front-end needs to show a tool page.
#[derive(Debug, Clone)]
pub struct ToolPage<'a> {
    pub tool: &'a ToolDescriptor,
    pub window_title: String,
    pub position: ChainPosition,
}

/// One interactive control owned by the front-end.
pub trait Control {
    fn kind(&self) -> ControlKind;

    /// The value currently shown, if any.
    fn value(&self) -> Option<ParamValue>;

    /// Programmatic update; never produces a [`UserEvent`].
    fn set_value(&mut self, value: Option<&ParamValue>);

    fn set_enabled(&mut self, enabled: bool);

    fn set_visible(&mut self, visible: bool);

    /// Show (or clear, with `None`) the inline validation error.
    fn set_error(&mut self, error: Option<&str>);
}

pub type SharedControl = Rc<RefCell<dyn Control>>;

#[async_trait(?Send)]
pub trait Frontend {
    // ==================== Tool page ====================

    fn tool_loaded(&mut self, page: &ToolPage<'_>);

    /// Create the control for `parameter`. Called once per bind.
    fn create_control(&mut self, parameter: &Parameter, kind: ControlKind) -> SharedControl;

    /// Drop the control bound to `parameter`.
    fn discard_control(&mut self, parameter: &str);

    fn tool_closed(&mut self, tool: &ToolDescriptor);

    /// The chain grew while the current tool was shown.
    fn position_changed(&mut self, _position: ChainPosition) {}

    fn state_changed(&mut self, _state: &InterfaceState) {}

    /// Disable the parameter controls and execute button while a tool runs.
    fn set_input_enabled(&mut self, enabled: bool);

    // ==================== Events ====================

    /// Next user gesture, or `None` once no more input will arrive.
    ///
    /// Must be cancel-safe: the engine races it against process output.
    async fn next_event(&mut self) -> Option<UserEvent>;

    // ==================== Geometry ====================

    fn restore_geometry(&mut self, _geometry: WindowGeometry) {}

    fn geometry(&self) -> Option<WindowGeometry> {
        None
    }

    // ==================== Progress ====================

    fn progress_start(&mut self);

    fn progress_update(&mut self, message: &str, fraction: f64);

    fn progress_end(&mut self);

    // ==================== Dialogs ====================

    async fn message(&mut self, text: &str);

    async fn warning(&mut self, text: &str);

    async fn error(&mut self, text: &str);

    async fn ask(&mut self, text: &str) -> bool;

    // ==================== Console ====================

    fn show_console(&mut self);

    fn write_console(&mut self, line: &OutputLine);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_label() {
        assert_eq!(ChainPosition { index: 0, count: 2 }.action_label(), "Next");
        assert_eq!(ChainPosition { index: 1, count: 2 }.action_label(), "Run");
        assert_eq!(ChainPosition { index: 0, count: 1 }.action_label(), "Run");
    }
}
