//! `string-ui`: one parameter per string control kind.

use async_trait::async_trait;
use chainrun_domain::{
    FileExists, FolderExists, Parameter, ParameterSet, Tool, ToolDescriptor, ToolInterface,
};

pub const NAME: &str = "string-ui";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(NAME, || Box::new(StringUiTool::new()))
        .with_help(
            "The ui options for string parameters:\n\n\
             * folder-select\n* file-open\n* file-save\n* multi-line\n\
             * label\n* markdown\n* password\n",
        )
        .with_collection(super::COLLECTION)
}

pub struct StringUiTool {
    params: ParameterSet,
}

impl StringUiTool {
    pub fn new() -> Self {
        let params = ParameterSet::new()
            .with(Parameter::string("plain_string"))
            .with(Parameter::string("choice_string").with_choices(["apple", "banana", "cantaloupe"]))
            .with(
                Parameter::string("folder_select")
                    .with_ui("folder-select")
                    .with_validator(FolderExists),
            )
            .with(
                Parameter::string("file_open")
                    .with_ui("file-open")
                    .with_option("accept", vec!["Text Files *.txt", "Images *.png;*.jpg;"])
                    .with_validator(FileExists),
            )
            .with(
                Parameter::string("file_save")
                    .with_ui("file-save")
                    .with_option("accept", vec!["Text Files *.txt", "All Files *.*"]),
            )
            .with(Parameter::string("multi_line").with_ui("multi-line"))
            .with(
                Parameter::string("label")
                    .with_ui("label")
                    .with_value("Labels support <a href=\"https://www.w3.org/html/\">HTML</a> with clickable links"),
            )
            .with(Parameter::string("markdown").with_ui("markdown").with_value(
                "Strings _also_ support [Markdown](https://daringfireball.net/projects/markdown/).\n\n\
                 Captions are **automatically** hidden when using the `label` or `markdown` ui.",
            ))
            .with(Parameter::string("password").with_ui("password"));
        Self { params }
    }
}

impl Default for StringUiTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Tool for StringUiTool {
    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    async fn execute(&mut self, _ui: &mut dyn ToolInterface) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_optional_paths_pass_validation() {
        let tool = StringUiTool::new();
        assert_eq!(tool.parameters().len(), 9);
        assert!(tool.parameters().validate_all().is_ok());
    }

    #[test]
    fn test_choice_outside_list_is_rejected() {
        let tool = StringUiTool::new();
        let param = tool.parameters().get("choice_string").unwrap();
        assert!(param.validate("banana").is_ok());
        assert!(param.validate("durian").is_err());
    }

    #[test]
    fn test_missing_folder_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let tool = StringUiTool::new();
        let param = tool.parameters().get("folder_select").unwrap();

        assert!(param.validate(dir.path().to_string_lossy().to_string()).is_ok());
        let missing = dir.path().join("missing").to_string_lossy().to_string();
        assert!(param.validate(missing).is_err());
    }
}
