//! The callback surface handed to a running tool.
//!
//! [`ToolContext`] borrows the interface's parts for the duration of one
//! `execute` call. While a command runs it races three sources:
//!
//! ```text
//!   tokio::select! {
//!       abort token cancelled   → terminate the process
//!       frontend.next_event()   → Close asks first, Abort terminates
//!       process.next_output()   → console + output handler
//!   }
//! ```
//!
//! The select is the only suspension point while a command runs.

use crate::console::ConsoleBuffer;
use crate::ports::frontend::{ChainPosition, Frontend, UserEvent};
use crate::ports::process::{OutputLine, ProcessRunnerPort};
use async_trait::async_trait;
use chainrun_domain::{
    CommandSpec, EXIT_ABORTED, EXIT_SPAWN_FAILED, OutputHandler, OutputStream, ToolChain,
    ToolData, ToolDescriptor, ToolInterface,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const CLOSE_WHILE_RUNNING: &str = "A process is currently running.\nDo you want to kill it?";
pub const PROCESS_TERMINATED: &str = "The Process has been terminated.";

pub struct ToolContext<'a> {
    frontend: &'a mut dyn Frontend,
    chain: &'a mut ToolChain,
    runner: &'a dyn ProcessRunnerPort,
    console: &'a mut ConsoleBuffer,
    input_closed: &'a mut bool,
    abort: CancellationToken,
    aborted: bool,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        frontend: &'a mut dyn Frontend,
        chain: &'a mut ToolChain,
        runner: &'a dyn ProcessRunnerPort,
        console: &'a mut ConsoleBuffer,
        input_closed: &'a mut bool,
        abort: CancellationToken,
    ) -> Self {
        Self {
            frontend,
            chain,
            runner,
            console,
            input_closed,
            abort,
            aborted: false,
        }
    }

    /// Whether the user aborted a command during this execution.
    pub fn was_aborted(&self) -> bool {
        self.aborted
    }

    fn write(&mut self, stream: OutputStream, text: &str) {
        let lines = self.console.write(stream, text);
        if lines.is_empty() {
            return;
        }
        if self.console.reveal() {
            self.frontend.show_console();
        }
        for line in &lines {
            self.frontend.write_console(line);
        }
    }

    fn emit_line(&mut self, line: &OutputLine) {
        self.console.push(line.clone());
        if self.console.reveal() {
            self.frontend.show_console();
        }
        self.frontend.write_console(line);
    }

    fn position(&self) -> ChainPosition {
        ChainPosition {
            index: self.chain.current_tool_index().unwrap_or(0),
            count: self.chain.tool_count(),
        }
    }
}

#[async_trait(?Send)]
impl ToolInterface for ToolContext<'_> {
    fn progress_start(&mut self) {
        self.frontend.progress_start();
    }

    fn progress_update(&mut self, message: &str, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.frontend.progress_update(message, fraction);
    }

    fn progress_end(&mut self) {
        self.frontend.progress_end();
    }

    async fn message(&mut self, text: &str) {
        self.frontend.message(text).await;
    }

    async fn warning(&mut self, text: &str) {
        self.frontend.warning(text).await;
    }

    async fn error(&mut self, text: &str) {
        self.frontend.error(text).await;
    }

    async fn ask(&mut self, text: &str) -> bool {
        self.frontend.ask(text).await
    }

    fn write_stdout(&mut self, text: &str) {
        self.write(OutputStream::Stdout, text);
    }

    fn write_stderr(&mut self, text: &str) {
        self.write(OutputStream::Stderr, text);
    }

    fn tool_data(&self) -> &ToolData {
        self.chain.tool_data()
    }

    fn tool_data_mut(&mut self) -> &mut ToolData {
        self.chain.tool_data_mut()
    }

    fn add_tool(&mut self, descriptor: ToolDescriptor) {
        debug!("Enqueued tool: {}", descriptor.name);
        self.chain.add_tool(descriptor);
        let position = self.position();
        self.frontend.position_changed(position);
    }

    async fn run_command_with(
        &mut self,
        command: &CommandSpec,
        handler: &mut dyn OutputHandler,
    ) -> i32 {
        info!("Running command: {}", command);
        let mut process = match self.runner.spawn(command) {
            Ok(process) => process,
            Err(e) => {
                warn!("{}", e);
                self.write_stderr(&e.to_string());
                return EXIT_SPAWN_FAILED;
            }
        };

        let mut terminated = false;
        loop {
            tokio::select! {
                biased;
                _ = self.abort.cancelled(), if !terminated => {
                    debug!("Abort requested, terminating process");
                    process.terminate().await;
                    terminated = true;
                    self.frontend.warning(PROCESS_TERMINATED).await;
                }
                event = self.frontend.next_event(), if !*self.input_closed => {
                    match event {
                        None => *self.input_closed = true,
                        Some(UserEvent::Close) => {
                            if self.frontend.ask(CLOSE_WHILE_RUNNING).await {
                                process.terminate().await;
                                terminated = true;
                                self.frontend.warning(PROCESS_TERMINATED).await;
                            }
                        }
                        Some(UserEvent::Abort) => {
                            process.terminate().await;
                            terminated = true;
                            self.frontend.warning(PROCESS_TERMINATED).await;
                        }
                        Some(other) => debug!("Ignoring {:?} while a process is running", other),
                    }
                }
                line = process.next_output() => match line {
                    Some(line) => {
                        self.emit_line(&line);
                        handler.on_line(line.stream, &line.text, self);
                    }
                    None => break,
                },
            }
        }

        let code = match process.wait().await {
            Ok(code) => code,
            Err(e) => {
                warn!("{}", e);
                self.write_stderr(&e.to_string());
                EXIT_SPAWN_FAILED
            }
        };

        if terminated {
            self.aborted = true;
            info!("Command aborted: {}", command.program);
            EXIT_ABORTED
        } else {
            debug!("Command exited with {}", code);
            code
        }
    }
}
