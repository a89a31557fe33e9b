//! `run-command`: stream an external command into the console.
//!
//! With `shell` on, the command line goes to `sh -c`. Otherwise it is split
//! on whitespace and the program is located with `which` first, so a missing
//! binary is reported before anything is spawned.
//!
//! `progress_pattern` is a regex applied to every output line. A named
//! group `percent` (or else the first group) is read as 0-100 and fed to
//! the progress bar.

use async_trait::async_trait;
use chainrun_domain::{
    CommandSpec, FnValidator, FolderExists, NotEmpty, OutputStream, ParamValue, Parameter,
    ParameterSet, Tool, ToolDescriptor, ToolInterface,
};
use regex::Regex;
use tracing::debug;

pub const NAME: &str = "run-command";

const COMMAND: &str = "command";
const SHELL: &str = "shell";
const WORKING_DIR: &str = "working_dir";
const PROGRESS_PATTERN: &str = "progress_pattern";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(NAME, || Box::new(RunCommandTool::new()))
        .with_help(
            "Run a command and stream its output to the console. An optional regex \
             with a `percent` group turns matching output lines into progress.",
        )
        .with_collection(super::COLLECTION)
}

fn check_pattern(value: &ParamValue) -> Result<(), String> {
    match value.as_str() {
        Some("") | None => Ok(()),
        Some(pattern) => Regex::new(pattern).map(|_| ()).map_err(|e| e.to_string()),
    }
}

pub struct RunCommandTool {
    params: ParameterSet,
}

impl RunCommandTool {
    pub fn new() -> Self {
        let params = ParameterSet::new()
            .with(
                Parameter::string(COMMAND)
                    .with_option("required", true)
                    .with_validator(NotEmpty)
                    .with_description("Command line to run"),
            )
            .with(
                Parameter::bool(SHELL)
                    .with_default(true)
                    .with_description("Run through the system shell"),
            )
            .with(
                Parameter::string(WORKING_DIR)
                    .with_ui("folder-select")
                    .with_validator(FolderExists),
            )
            .with(
                Parameter::string(PROGRESS_PATTERN)
                    .with_validator(FnValidator::new("regex", check_pattern))
                    .with_description("Regex with a `percent` group, e.g. (?P<percent>\\d+)%"),
            );
        Self { params }
    }

    fn build_command(&self) -> Result<CommandSpec, String> {
        let line = self.params.string(COMMAND).unwrap_or_default().trim();
        let mut spec = if self.params.bool(SHELL).unwrap_or(true) {
            CommandSpec::shell(line)
        } else {
            let mut words = line.split_whitespace();
            let program = words.next().ok_or_else(|| "command is empty".to_string())?;
            let path = which::which(program).map_err(|_| format!("{} binary not found", program))?;
            CommandSpec::new(path.to_string_lossy()).args(words)
        };

        if let Some(dir) = self.params.string(WORKING_DIR)
            && !dir.is_empty()
        {
            spec = spec.current_dir(dir);
        }
        Ok(spec)
    }

    fn progress_regex(&self) -> Option<Regex> {
        let pattern = self.params.string(PROGRESS_PATTERN)?;
        if pattern.is_empty() {
            return None;
        }
        Regex::new(pattern).ok()
    }
}

impl Default for RunCommandTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent (0-100) captured from `line`, as a fraction.
fn parse_progress(regex: &Regex, line: &str) -> Option<f64> {
    let captures = regex.captures(line)?;
    let text = captures
        .name("percent")
        .or_else(|| captures.get(1))?
        .as_str();
    let percent: f64 = text.trim().parse().ok()?;
    Some((percent / 100.0).clamp(0.0, 1.0))
}

#[async_trait(?Send)]
impl Tool for RunCommandTool {
    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    async fn execute(&mut self, ui: &mut dyn ToolInterface) -> i32 {
        let command = match self.build_command() {
            Ok(command) => command,
            Err(reason) => {
                ui.error(&reason).await;
                return 1;
            }
        };
        debug!("run-command: {}", command.to_command_string());
        ui.write_stdout(&format!("$ {}", command.to_command_string()));

        let Some(regex) = self.progress_regex() else {
            return ui.run_command(&command).await;
        };

        ui.progress_start();
        let mut on_line = |_stream: OutputStream, line: &str, ui: &mut dyn ToolInterface| {
            if let Some(fraction) = parse_progress(&regex, line) {
                ui.progress_update(&format!("{:.0}%", fraction * 100.0), fraction);
            }
        };
        let code = ui.run_command_with(&command, &mut on_line).await;
        ui.progress_end();
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::RecordingInterface;

    fn tool_with(values: &[(&str, ParamValue)]) -> RunCommandTool {
        let mut tool = RunCommandTool::new();
        for (name, value) in values {
            tool.parameters_mut()
                .get_mut(name)
                .unwrap()
                .try_set_value(value.clone())
                .unwrap();
        }
        tool
    }

    #[test]
    fn test_command_is_required() {
        let tool = RunCommandTool::new();
        assert!(tool.parameters().validate_all().is_err());

        let tool = tool_with(&[(COMMAND, "echo hi".into())]);
        assert!(tool.parameters().validate_all().is_ok());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let tool = RunCommandTool::new();
        let param = tool.parameters().get(PROGRESS_PATTERN).unwrap();
        assert!(param.validate("(unclosed").is_err());
        assert!(param.validate("(?P<percent>\\d+)%").is_ok());
    }

    #[test]
    fn test_parse_progress() {
        let named = Regex::new(r"frame (?P<percent>\d+(\.\d+)?)%").unwrap();
        assert_eq!(parse_progress(&named, "frame 50%"), Some(0.5));
        assert_eq!(parse_progress(&named, "frame 250%"), Some(1.0));
        assert_eq!(parse_progress(&named, "no match"), None);

        let positional = Regex::new(r"^(\d+)/100$").unwrap();
        assert_eq!(parse_progress(&positional, "25/100"), Some(0.25));
    }

    #[tokio::test]
    async fn test_shell_command_streams_progress() {
        let mut tool = tool_with(&[
            (COMMAND, "./encode --fast".into()),
            (PROGRESS_PATTERN, r"(?P<percent>\d+)%".into()),
        ]);
        let mut ui = RecordingInterface {
            command_output: vec![
                (OutputStream::Stdout, "10%".to_string()),
                (OutputStream::Stderr, "warning: slow disk".to_string()),
                (OutputStream::Stdout, "100%".to_string()),
            ],
            ..RecordingInterface::default()
        };

        assert_eq!(tool.execute(&mut ui).await, 0);

        assert_eq!(ui.commands.len(), 1);
        assert_eq!(ui.commands[0], CommandSpec::shell("./encode --fast"));
        assert_eq!(ui.with_prefix("progress:"), vec!["start", "10%:0.10", "100%:1.00", "end"]);
        assert_eq!(ui.with_prefix("stdout:$ ").len(), 1);
    }

    #[tokio::test]
    async fn test_exit_code_is_returned() {
        let mut tool = tool_with(&[(COMMAND, "false".into())]);
        let mut ui = RecordingInterface {
            command_code: 2,
            ..RecordingInterface::default()
        };
        assert_eq!(tool.execute(&mut ui).await, 2);
        assert!(ui.with_prefix("progress:").is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_without_shell() {
        let mut tool = tool_with(&[
            (COMMAND, "chainrun-no-such-binary --help".into()),
            (SHELL, false.into()),
        ]);
        let mut ui = RecordingInterface::default();

        assert_eq!(tool.execute(&mut ui).await, 1);
        assert_eq!(
            ui.with_prefix("error:"),
            vec!["chainrun-no-such-binary binary not found"]
        );
        assert!(ui.commands.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_program_resolved_with_which() {
        let mut tool = tool_with(&[(COMMAND, "sh -c true".into()), (SHELL, false.into())]);
        let mut ui = RecordingInterface::default();

        assert_eq!(tool.execute(&mut ui).await, 0);
        let spec = &ui.commands[0];
        assert!(spec.program.ends_with("/sh"));
        assert_eq!(spec.args, vec!["-c", "true"]);
    }
}
