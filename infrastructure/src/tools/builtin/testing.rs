//! Recording [`ToolInterface`] for built-in tool tests.

use async_trait::async_trait;
use chainrun_domain::{
    CommandSpec, OutputHandler, OutputStream, ToolData, ToolDescriptor, ToolInterface,
};

#[derive(Default)]
pub struct RecordingInterface {
    pub calls: Vec<String>,
    pub data: ToolData,
    pub added: Vec<ToolDescriptor>,
    pub commands: Vec<CommandSpec>,
    /// Lines every command "prints", and its exit code.
    pub command_output: Vec<(OutputStream, String)>,
    pub command_code: i32,
}

impl RecordingInterface {
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| c.strip_prefix(prefix).map(str::to_string))
            .collect()
    }
}

#[async_trait(?Send)]
impl ToolInterface for RecordingInterface {
    fn progress_start(&mut self) {
        self.calls.push("progress:start".to_string());
    }

    fn progress_update(&mut self, message: &str, fraction: f64) {
        self.calls.push(format!("progress:{}:{:.2}", message, fraction));
    }

    fn progress_end(&mut self) {
        self.calls.push("progress:end".to_string());
    }

    async fn message(&mut self, text: &str) {
        self.calls.push(format!("message:{}", text));
    }

    async fn warning(&mut self, text: &str) {
        self.calls.push(format!("warning:{}", text));
    }

    async fn error(&mut self, text: &str) {
        self.calls.push(format!("error:{}", text));
    }

    async fn ask(&mut self, text: &str) -> bool {
        self.calls.push(format!("ask:{}", text));
        false
    }

    fn write_stdout(&mut self, text: &str) {
        self.calls.push(format!("stdout:{}", text));
    }

    fn write_stderr(&mut self, text: &str) {
        self.calls.push(format!("stderr:{}", text));
    }

    fn tool_data(&self) -> &ToolData {
        &self.data
    }

    fn tool_data_mut(&mut self) -> &mut ToolData {
        &mut self.data
    }

    fn add_tool(&mut self, descriptor: ToolDescriptor) {
        self.calls.push(format!("add:{}", descriptor.name));
        self.added.push(descriptor);
    }

    async fn run_command_with(
        &mut self,
        command: &CommandSpec,
        handler: &mut dyn OutputHandler,
    ) -> i32 {
        self.commands.push(command.clone());
        for (stream, line) in self.command_output.clone() {
            handler.on_line(stream, &line, self);
        }
        self.command_code
    }
}
