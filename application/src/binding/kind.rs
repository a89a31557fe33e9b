//! Control kind selection
//!
//! Which control a parameter gets depends only on its data type, its `ui`
//! option and whether it has choices.
//!
//! | Data type | `ui` / choices                 | Control          |
//! |-----------|--------------------------------|------------------|
//! | int       | choices                        | ComboBox         |
//! | int       | `slider`                       | Slider           |
//! | int       | -                              | SpinBox          |
//! | bool      | `button`                       | Button           |
//! | bool      | -                              | CheckBox         |
//! | float     | `slider`                       | Slider           |
//! | float     | -                              | DoubleSpinBox    |
//! | string    | choices                        | ComboBox         |
//! | string    | `password`, `multi-line`, ...  | matching kind    |
//! | string    | -                              | LineEdit         |
//! | list      | choices                        | CheckList        |
//! | list      | -                              | ListEdit         |

use chainrun_domain::{DataType, Parameter};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    SpinBox,
    Slider,
    ComboBox,
    CheckBox,
    Button,
    DoubleSpinBox,
    LineEdit,
    Password,
    MultiLine,
    Label,
    Markdown,
    FolderSelect,
    FileOpen,
    FileSave,
    ListEdit,
    CheckList,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::SpinBox => "spin-box",
            ControlKind::Slider => "slider",
            ControlKind::ComboBox => "combo-box",
            ControlKind::CheckBox => "check-box",
            ControlKind::Button => "button",
            ControlKind::DoubleSpinBox => "double-spin-box",
            ControlKind::LineEdit => "line-edit",
            ControlKind::Password => "password",
            ControlKind::MultiLine => "multi-line",
            ControlKind::Label => "label",
            ControlKind::Markdown => "markdown",
            ControlKind::FolderSelect => "folder-select",
            ControlKind::FileOpen => "file-open",
            ControlKind::FileSave => "file-save",
            ControlKind::ListEdit => "list-edit",
            ControlKind::CheckList => "check-list",
        }
    }

    /// Display-only controls never produce user edits.
    pub fn is_read_only(&self) -> bool {
        matches!(self, ControlKind::Label | ControlKind::Markdown)
    }

    /// Whether the caption next to the control should be shown.
    pub fn shows_caption(&self) -> bool {
        !matches!(
            self,
            ControlKind::Label | ControlKind::Markdown | ControlKind::Button
        )
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the control kind for a parameter shape.
pub fn control_kind(data_type: DataType, ui: Option<&str>, has_choices: bool) -> ControlKind {
    match data_type {
        DataType::Int => match (has_choices, ui) {
            (true, _) => ControlKind::ComboBox,
            (false, Some("slider")) => ControlKind::Slider,
            (false, _) => ControlKind::SpinBox,
        },
        DataType::Bool => match ui {
            Some("button") => ControlKind::Button,
            _ => ControlKind::CheckBox,
        },
        DataType::Float => match ui {
            Some("slider") => ControlKind::Slider,
            _ => ControlKind::DoubleSpinBox,
        },
        DataType::String => match (has_choices, ui) {
            (true, _) => ControlKind::ComboBox,
            (false, Some("password")) => ControlKind::Password,
            (false, Some("multi-line")) => ControlKind::MultiLine,
            (false, Some("label")) => ControlKind::Label,
            (false, Some("markdown")) => ControlKind::Markdown,
            (false, Some("folder-select")) => ControlKind::FolderSelect,
            (false, Some("file-open")) => ControlKind::FileOpen,
            (false, Some("file-save")) => ControlKind::FileSave,
            (false, _) => ControlKind::LineEdit,
        },
        DataType::List => match has_choices {
            true => ControlKind::CheckList,
            false => ControlKind::ListEdit,
        },
    }
}

/// [`control_kind`] for a concrete parameter.
pub fn control_kind_for(parameter: &Parameter) -> ControlKind {
    control_kind(
        parameter.data_type(),
        parameter.options().ui(),
        parameter.choices().is_some(),
    )
}
