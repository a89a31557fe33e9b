//! Line-oriented terminal front-end
//!
//! Renders one tool page at a time and turns typed lines into
//! [`UserEvent`]s.
//!
//! ```text
//! ━━ run-command - chainrun ━━ (1/2)
//! Runs a shell command and streams its output.
//!   command = make test  <line-edit>
//!   [x] shell
//! run-command [next]>
//! ```
//!
//! Progress goes to an indicatif bar; everything printed while the bar is
//! visible is routed through [`ProgressBar::suspend`] so lines never tear.

use crate::terminal::command::{HELP, TerminalCommand, parse_command};
use crate::terminal::control::TerminalControl;
use async_trait::async_trait;
use chainrun_application::{
    ChainPosition, ConsoleConfig, ControlKind, Frontend, InterfaceState, OutputLine,
    SharedControl, ToolPage, UserEvent, WindowGeometry,
};
use chainrun_domain::{OutputStream, Parameter, ToolDescriptor};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Resolution of the progress bar; fractions are scaled to this length.
const PROGRESS_STEPS: u64 = 1000;

/// Header of the page currently shown.
#[derive(Debug, Clone)]
struct PageHeader {
    tool: String,
    title: String,
    help: String,
    position: ChainPosition,
}

pub struct TerminalFrontend {
    input: mpsc::UnboundedReceiver<String>,
    out: Box<dyn Write>,
    console: ConsoleConfig,
    progress_bar: bool,
    confirm_dialogs: bool,

    page: Option<PageHeader>,
    controls: Vec<Rc<RefCell<TerminalControl>>>,
    state: InterfaceState,
    input_enabled: bool,
    needs_render: bool,
    prompted: bool,
    console_shown: bool,
    progress: Option<ProgressBar>,
    geometry: Option<WindowGeometry>,
}

impl TerminalFrontend {
    pub fn new(
        input: mpsc::UnboundedReceiver<String>,
        out: Box<dyn Write>,
        console: ConsoleConfig,
    ) -> Self {
        Self {
            input,
            out,
            console,
            progress_bar: true,
            confirm_dialogs: true,
            page: None,
            controls: Vec::new(),
            state: InterfaceState::Idle,
            input_enabled: false,
            needs_render: false,
            prompted: false,
            console_shown: false,
            progress: None,
            geometry: None,
        }
    }

    /// Draw progress with an indicatif bar (off: progress is not shown).
    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }

    /// Wait for Enter after message, warning and error dialogs.
    pub fn with_confirm_dialogs(mut self, confirm: bool) -> Self {
        self.confirm_dialogs = confirm;
        self
    }

    fn progress_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {percent:>3}% {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    /// Print `text` above the progress bar, if any.
    fn emit(&mut self, text: &str) {
        let out = &mut self.out;
        let write = |out: &mut Box<dyn Write>| {
            if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
                warn!("Failed to write to terminal: {}", e);
            }
        };
        match &self.progress {
            Some(bar) => bar.suspend(|| write(out)),
            None => write(out),
        }
    }

    fn prompt(&mut self) {
        let Some(page) = &self.page else {
            return;
        };
        let hint = match self.state {
            InterfaceState::Advancing => "continue",
            _ => page.position.action_label(),
        };
        let text = format!("{} [{}]> ", page.tool.bold(), hint.to_lowercase());
        if let Err(e) = write!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn render_page(&mut self) {
        self.needs_render = false;
        let Some(page) = self.page.clone() else {
            return;
        };

        let mut lines = vec![format!(
            "{} {} {} {}",
            "━━".cyan(),
            page.title.bold(),
            "━━".cyan(),
            format!("({}/{})", page.position.index + 1, page.position.count).dimmed()
        )];
        if !page.help.is_empty() {
            lines.push(page.help.clone());
        }
        for control in &self.controls {
            let mut control = control.borrow_mut();
            control.take_changed();
            if control.is_visible() {
                for (i, line) in control.render().lines().enumerate() {
                    let indent = if i == 0 { "  " } else { "" };
                    lines.push(format!("{}{}", indent, line));
                }
            }
        }
        lines.push(
            format!(
                "Type name=value to edit, 'run' to {}, 'help' for commands.",
                page.position.action_label().to_lowercase()
            )
            .dimmed()
            .to_string(),
        );
        self.emit(&lines.join("\n"));
    }

    /// Report controls that changed since the last render.
    fn flush_feedback(&mut self) {
        let feedback: Vec<String> = self
            .controls
            .iter()
            .filter_map(|control| {
                let mut control = control.borrow_mut();
                (control.take_changed() && control.is_visible()).then(|| control.feedback())
            })
            .collect();
        for line in feedback {
            self.emit(&format!("  {}", line));
        }
    }

    async fn read_line(&mut self) -> Option<String> {
        let line = self.input.recv().await;
        if line.is_none() {
            debug!("Terminal input closed");
        }
        line
    }

    async fn dialog(&mut self, marker: colored::ColoredString, text: &str) {
        let mut lines = text.lines();
        let first = lines.next().unwrap_or_default();
        let mut rendered = format!("{} {}", marker, first);
        for line in lines {
            rendered.push_str(&format!("\n  {}", line));
        }
        self.emit(&rendered);

        if self.confirm_dialogs {
            self.emit(&"  (press Enter)".dimmed().to_string());
            self.read_line().await;
        }
        self.prompted = false;
    }
}

#[async_trait(?Send)]
impl Frontend for TerminalFrontend {
    fn tool_loaded(&mut self, page: &ToolPage<'_>) {
        self.page = Some(PageHeader {
            tool: page.tool.name.clone(),
            title: page.window_title.clone(),
            help: page.tool.help.clone(),
            position: page.position,
        });
        self.controls.clear();
        self.needs_render = true;
        self.prompted = false;
    }

    fn create_control(&mut self, parameter: &Parameter, kind: ControlKind) -> SharedControl {
        let control = Rc::new(RefCell::new(TerminalControl::new(parameter, kind)));
        match self
            .controls
            .iter()
            .position(|c| c.borrow().name() == parameter.name())
        {
            Some(index) => self.controls[index] = Rc::clone(&control),
            None => self.controls.push(Rc::clone(&control)),
        }
        control
    }

    fn discard_control(&mut self, parameter: &str) {
        self.controls.retain(|c| c.borrow().name() != parameter);
    }

    fn tool_closed(&mut self, tool: &ToolDescriptor) {
        debug!("Closed tool page: {}", tool.name);
        self.controls.clear();
        self.page = None;
        self.prompted = false;
    }

    fn position_changed(&mut self, position: ChainPosition) {
        if let Some(page) = &mut self.page {
            page.position = position;
        }
        self.emit(
            &format!("{} {} tool(s) in the chain", "+".cyan(), position.count)
                .dimmed()
                .to_string(),
        );
    }

    fn state_changed(&mut self, state: &InterfaceState) {
        self.state = state.clone();
        self.prompted = false;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        if enabled && self.needs_render {
            self.render_page();
        }
    }

    async fn next_event(&mut self) -> Option<UserEvent> {
        // Only synchronous work happens before `recv`, so a dropped call
        // loses nothing.
        loop {
            if self.needs_render {
                self.render_page();
            } else {
                self.flush_feedback();
            }
            if self.input_enabled && !self.prompted {
                self.prompt();
                self.prompted = true;
            }

            let line = self.input.recv().await?;
            self.prompted = false;

            match parse_command(&line) {
                TerminalCommand::Event(event @ (UserEvent::Close | UserEvent::Abort)) => {
                    return Some(event);
                }
                TerminalCommand::Event(event) if self.input_enabled => return Some(event),
                TerminalCommand::Event(_) => {
                    self.emit(&"A tool is running; type 'abort' to stop it.".yellow().to_string());
                }
                TerminalCommand::Show => self.needs_render = true,
                TerminalCommand::Help => self.emit(HELP),
                TerminalCommand::Unknown(text) => {
                    self.emit(&format!("Unknown command: {} (type 'help')", text).yellow().to_string());
                }
            }
        }
    }

    fn restore_geometry(&mut self, geometry: WindowGeometry) {
        debug!("Remembering geometry {:?}", geometry);
        self.geometry = Some(geometry);
    }

    fn geometry(&self) -> Option<WindowGeometry> {
        match crossterm::terminal::size() {
            Ok((columns, rows)) => Some(WindowGeometry {
                position: self.geometry.map(|g| g.position).unwrap_or((0, 0)),
                size: (u32::from(columns), u32::from(rows)),
            }),
            Err(_) => self.geometry,
        }
    }

    fn progress_start(&mut self) {
        if !self.progress_bar {
            return;
        }
        let bar = ProgressBar::new(PROGRESS_STEPS);
        bar.set_style(Self::progress_style());
        if let Some(previous) = self.progress.replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn progress_update(&mut self, message: &str, fraction: f64) {
        if let Some(bar) = &self.progress {
            bar.set_position((fraction * PROGRESS_STEPS as f64).round() as u64);
            bar.set_message(message.to_string());
        }
    }

    fn progress_end(&mut self) {
        if let Some(bar) = self.progress.take() {
            bar.finish_and_clear();
        }
    }

    async fn message(&mut self, text: &str) {
        self.dialog("i".blue().bold(), text).await;
    }

    async fn warning(&mut self, text: &str) {
        self.dialog("!".yellow().bold(), text).await;
    }

    async fn error(&mut self, text: &str) {
        self.dialog("x".red().bold(), text).await;
    }

    async fn ask(&mut self, text: &str) -> bool {
        self.emit(&format!("{} {} {}", "?".cyan().bold(), text, "[y/N]".dimmed()));
        self.prompted = false;
        match self.read_line().await {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn show_console(&mut self) {
        if !self.console_shown {
            self.console_shown = true;
            self.emit(&"── output ──".dimmed().to_string());
        }
    }

    fn write_console(&mut self, line: &OutputLine) {
        let color = match line.stream {
            OutputStream::Stdout => self.console.color_stdout.as_str(),
            OutputStream::Stderr => self.console.color_stderr.as_str(),
        };
        let text = line.text.color(color).to_string();
        self.emit(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrun_application::{
        Control, ExecutionInterface, InMemoryGeometryStore, InterfaceConfig, ProcessError,
        ProcessRunnerPort, RunOutcome, RunningProcess, control_kind_for,
    };
    use chainrun_domain::{CommandSpec, ParamValue, ParameterSet, Tool, ToolChain, ToolInterface};
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn frontend(lines: &[&str]) -> (TerminalFrontend, SharedBuffer) {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(line.to_string()).unwrap();
        }
        drop(tx);
        let buffer = SharedBuffer::default();
        let frontend = TerminalFrontend::new(rx, Box::new(buffer.clone()), ConsoleConfig::default())
            .with_progress_bar(false)
            .with_confirm_dialogs(false);
        (frontend, buffer)
    }

    fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new("resize", || unreachable!()).with_help("Resize images.")
    }

    fn load(frontend: &mut TerminalFrontend, tool: &ToolDescriptor, parameter: &Parameter) -> SharedControl {
        frontend.tool_loaded(&ToolPage {
            tool,
            window_title: "resize - chainrun".to_string(),
            position: ChainPosition { index: 0, count: 2 },
        });
        let control = frontend.create_control(parameter, control_kind_for(parameter));
        control.borrow_mut().set_value(Some(&ParamValue::Int(50)));
        frontend.set_input_enabled(true);
        control
    }

    #[tokio::test]
    async fn test_page_render_and_edit_event() {
        let (mut frontend, out) = frontend(&["width=640", "run"]);
        let tool = descriptor();
        let _control = load(&mut frontend, &tool, &Parameter::int("width"));

        let text = out.text();
        assert!(text.contains("resize - chainrun"));
        assert!(text.contains("Resize images."));
        assert!(text.contains("= 50"));

        assert_eq!(
            frontend.next_event().await,
            Some(UserEvent::Edit {
                parameter: "width".to_string(),
                value: ParamValue::from("640"),
            })
        );
        assert_eq!(frontend.next_event().await, Some(UserEvent::Next));
        assert_eq!(frontend.next_event().await, None);
    }

    #[tokio::test]
    async fn test_edit_feedback_is_printed() {
        let (mut frontend, out) = frontend(&["close"]);
        let tool = descriptor();
        let control = load(&mut frontend, &tool, &Parameter::int("width"));

        control.borrow_mut().set_error(Some("width: 'abc' is not an integer"));
        assert_eq!(frontend.next_event().await, Some(UserEvent::Close));
        assert!(out.text().contains("is not an integer"));
    }

    #[tokio::test]
    async fn test_input_disabled_passes_only_close_and_abort() {
        let (mut frontend, out) = frontend(&["run", "width=3", "abort"]);
        let tool = descriptor();
        load(&mut frontend, &tool, &Parameter::int("width"));
        frontend.set_input_enabled(false);

        assert_eq!(frontend.next_event().await, Some(UserEvent::Abort));
        assert!(out.text().contains("A tool is running"));
    }

    #[tokio::test]
    async fn test_help_and_unknown_commands() {
        let (mut frontend, out) = frontend(&["help", "frobnicate", "q"]);
        let tool = descriptor();
        load(&mut frontend, &tool, &Parameter::int("width"));

        assert_eq!(frontend.next_event().await, Some(UserEvent::Close));
        let text = out.text();
        assert!(text.contains("Commands:"));
        assert!(text.contains("Unknown command: frobnicate"));
    }

    #[tokio::test]
    async fn test_ask() {
        let (mut frontend, out) = frontend(&["y", "no"]);
        assert!(frontend.ask("Kill it?").await);
        assert!(!frontend.ask("Kill it?").await);
        assert!(!frontend.ask("Kill it?").await);
        assert!(out.text().contains("Kill it?"));
    }

    #[tokio::test]
    async fn test_dialog_waits_for_enter() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(String::new()).unwrap();
        tx.send("close".to_string()).unwrap();
        let buffer = SharedBuffer::default();
        let mut frontend = TerminalFrontend::new(rx, Box::new(buffer.clone()), ConsoleConfig::default())
            .with_progress_bar(false);

        frontend.error("resize failed with exit code 2").await;
        assert!(buffer.text().contains("press Enter"));
        // The empty line was consumed by the dialog.
        assert_eq!(frontend.input.recv().await.as_deref(), Some("close"));
    }

    #[test]
    fn test_console_lines_and_header() {
        let (mut frontend, out) = frontend(&[]);
        frontend.show_console();
        frontend.show_console();
        frontend.write_console(&OutputLine::stdout("compiling"));
        frontend.write_console(&OutputLine::stderr("warning: unused"));

        let text = out.text();
        assert_eq!(text.matches("── output ──").count(), 1);
        assert!(text.contains("compiling"));
        assert!(text.contains("warning: unused"));
    }

    #[test]
    fn test_controls_replaced_and_discarded() {
        let (mut frontend, _) = frontend(&[]);
        let tool = descriptor();
        let parameter = Parameter::string("fruit").with_choices(["a", "b"]);
        load(&mut frontend, &tool, &parameter);
        frontend.create_control(&parameter, ControlKind::ComboBox);
        assert_eq!(frontend.controls.len(), 1);

        frontend.discard_control("fruit");
        assert!(frontend.controls.is_empty());
    }

    #[test]
    fn test_progress_without_bar_is_noop() {
        let (mut frontend, out) = frontend(&[]);
        frontend.progress_start();
        frontend.progress_update("Working...", 0.5);
        frontend.progress_end();
        assert!(frontend.progress.is_none());
        assert!(out.text().is_empty());
    }

    struct Succeeds {
        params: ParameterSet,
    }

    #[async_trait(?Send)]
    impl Tool for Succeeds {
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

    struct NoProcesses;

    impl ProcessRunnerPort for NoProcesses {
        fn spawn(&self, command: &CommandSpec) -> Result<Box<dyn RunningProcess>, ProcessError> {
            Err(ProcessError::Spawn {
                program: command.program.clone(),
                reason: "not available in tests".to_string(),
            })
        }
    }

    fn succeeding(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, || {
            Box::new(Succeeds {
                params: ParameterSet::new().with(Parameter::int("n").with_default(1)),
            })
        })
    }

    #[tokio::test]
    async fn test_chain_advances_after_confirm_at_the_prompt() {
        // Run a, confirm, run b.
        let (frontend, out) = frontend(&["run", "run", "run"]);
        let mut chain = ToolChain::new();
        chain.add_tool(succeeding("a"));
        chain.add_tool(succeeding("b"));
        let mut interface = ExecutionInterface::new(
            Box::new(frontend),
            Arc::new(NoProcesses),
            Box::new(InMemoryGeometryStore::new()),
            InterfaceConfig::default(),
            chain,
        );

        let outcome = interface.run().await.unwrap();

        assert_eq!(outcome, RunOutcome::Success);
        assert_eq!(interface.chain().current_tool_index(), Some(1));
        let text = out.text();
        assert!(text.contains("a - chainrun"));
        assert!(text.contains("b - chainrun"));
        assert!(text.contains("[continue]"));
        assert!(!text.contains("A tool is running"));
    }
}
