//! In-memory front-end, controls and process runner for tests.

use crate::binding::kind::ControlKind;
use crate::ports::frontend::{ChainPosition, Control, Frontend, SharedControl, ToolPage, UserEvent};
use crate::ports::geometry_store::WindowGeometry;
use crate::ports::process::{OutputLine, ProcessError, ProcessRunnerPort, RunningProcess};
use crate::use_cases::execution_interface::InterfaceState;
use async_trait::async_trait;
use chainrun_domain::{CommandSpec, ParamValue, Parameter, ToolDescriptor};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct FakeControl {
    pub kind: ControlKind,
    pub value: Option<ParamValue>,
    pub enabled: bool,
    pub visible: bool,
    pub error: Option<String>,
    pub programmatic_writes: usize,
}

impl FakeControl {
    pub fn new(kind: ControlKind, initial: Option<ParamValue>) -> Self {
        Self {
            kind,
            value: initial,
            enabled: true,
            visible: true,
            error: None,
            programmatic_writes: 0,
        }
    }
}

impl Control for FakeControl {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn value(&self) -> Option<ParamValue> {
        self.value.clone()
    }

    fn set_value(&mut self, value: Option<&ParamValue>) {
        self.value = value.cloned();
        self.programmatic_writes += 1;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_error(&mut self, error: Option<&str>) {
        self.error = error.map(str::to_string);
    }
}

/// Everything the scripted front-end saw.
#[derive(Debug, Default)]
pub struct FrontendLog {
    pub calls: Vec<String>,
    pub controls: HashMap<String, Rc<RefCell<FakeControl>>>,
    pub created: Vec<String>,
    pub discarded: Vec<String>,
    pub pages: Vec<(String, String, &'static str)>,
    pub restored: Vec<WindowGeometry>,
}

impl FrontendLog {
    /// Names of loaded tools, in order.
    pub fn loads(&self) -> Vec<String> {
        self.with_prefix("load:")
    }

    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| c.strip_prefix(prefix).map(str::to_string))
            .collect()
    }

    pub fn control(&self, name: &str) -> Rc<RefCell<FakeControl>> {
        Rc::clone(&self.controls[name])
    }
}

/// Front-end that replays a fixed list of user events.
///
/// `Close` and `Abort` are always delivered. While the interface is
/// `Running` other events wait until the run is over. Outside a run, events
/// that arrive while input is disabled are dropped (and logged as
/// `ignored:`), the way a window with disabled controls swallows clicks.
/// Once the script is exhausted `next_event` returns `None`.
pub struct ScriptedFrontend {
    events: VecDeque<UserEvent>,
    answers: VecDeque<bool>,
    initial: HashMap<String, ParamValue>,
    geometry: Option<WindowGeometry>,
    state: InterfaceState,
    input_enabled: bool,
    log: Rc<RefCell<FrontendLog>>,
}

impl ScriptedFrontend {
    pub fn new(events: impl IntoIterator<Item = UserEvent>) -> (Self, Rc<RefCell<FrontendLog>>) {
        let log = Rc::new(RefCell::new(FrontendLog::default()));
        let frontend = Self {
            events: events.into_iter().collect(),
            answers: VecDeque::new(),
            initial: HashMap::new(),
            geometry: None,
            state: InterfaceState::Idle,
            input_enabled: false,
            log: Rc::clone(&log),
        };
        (frontend, log)
    }

    /// Answers returned by `ask`, in order. Exhausted answers are `false`.
    pub fn with_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.answers = answers.into_iter().collect();
        self
    }

    /// Value a freshly created control starts with.
    pub fn with_initial_value(mut self, parameter: &str, value: impl Into<ParamValue>) -> Self {
        self.initial.insert(parameter.to_string(), value.into());
        self
    }

    pub fn with_geometry(mut self, geometry: WindowGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    fn record(&self, call: String) {
        self.log.borrow_mut().calls.push(call);
    }
}

#[async_trait(?Send)]
impl Frontend for ScriptedFrontend {
    fn tool_loaded(&mut self, page: &ToolPage<'_>) {
        self.record(format!("load:{}", page.tool.name));
        self.log.borrow_mut().pages.push((
            page.tool.name.clone(),
            page.window_title.clone(),
            page.position.action_label(),
        ));
    }

    fn create_control(&mut self, parameter: &Parameter, kind: ControlKind) -> SharedControl {
        let control = Rc::new(RefCell::new(FakeControl::new(
            kind,
            self.initial.get(parameter.name()).cloned(),
        )));
        let mut log = self.log.borrow_mut();
        log.created.push(parameter.name().to_string());
        log.controls
            .insert(parameter.name().to_string(), Rc::clone(&control));
        control
    }

    fn discard_control(&mut self, parameter: &str) {
        self.log.borrow_mut().discarded.push(parameter.to_string());
    }

    fn tool_closed(&mut self, tool: &ToolDescriptor) {
        self.record(format!("closed:{}", tool.name));
    }

    fn position_changed(&mut self, position: ChainPosition) {
        self.record(format!("position:{}/{}", position.index, position.count));
    }

    fn state_changed(&mut self, state: &InterfaceState) {
        self.state = state.clone();
        self.record(format!("state:{}", state.as_str()));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        self.record(format!("input:{}", enabled));
    }

    async fn next_event(&mut self) -> Option<UserEvent> {
        let running = self.state == InterfaceState::Running;
        loop {
            match self.events.front() {
                None => return None,
                Some(UserEvent::Close | UserEvent::Abort) => return self.events.pop_front(),
                Some(_) if running => return std::future::pending().await,
                Some(_) if !self.input_enabled => {
                    if let Some(event) = self.events.pop_front() {
                        self.record(format!("ignored:{:?}", event));
                    }
                }
                Some(_) => return self.events.pop_front(),
            }
        }
    }

    fn restore_geometry(&mut self, geometry: WindowGeometry) {
        self.log.borrow_mut().restored.push(geometry);
    }

    fn geometry(&self) -> Option<WindowGeometry> {
        self.geometry
    }

    fn progress_start(&mut self) {
        self.record("progress:start".to_string());
    }

    fn progress_update(&mut self, message: &str, fraction: f64) {
        self.record(format!("progress:{}:{:.2}", message, fraction));
    }

    fn progress_end(&mut self) {
        self.record("progress:end".to_string());
    }

    async fn message(&mut self, text: &str) {
        self.record(format!("message:{}", text));
    }

    async fn warning(&mut self, text: &str) {
        self.record(format!("warning:{}", text));
    }

    async fn error(&mut self, text: &str) {
        self.record(format!("error:{}", text));
    }

    async fn ask(&mut self, text: &str) -> bool {
        self.record(format!("ask:{}", text));
        self.answers.pop_front().unwrap_or(false)
    }

    fn show_console(&mut self) {
        self.record("console:show".to_string());
    }

    fn write_console(&mut self, line: &OutputLine) {
        self.record(format!("console:{}:{}", line.stream, line.text));
    }
}

/// What a fake process does once spawned.
#[derive(Debug, Clone, Default)]
pub struct FakeScript {
    pub lines: Vec<OutputLine>,
    pub code: i32,
    /// Keep running after the lines until terminated.
    pub hang: bool,
}

impl FakeScript {
    pub fn exits(code: i32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn hangs() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn with_line(mut self, line: OutputLine) -> Self {
        self.lines.push(line);
        self
    }
}

/// Runner that hands out scripted processes in order.
#[derive(Debug, Default)]
pub struct FakeRunner {
    scripts: Mutex<VecDeque<FakeScript>>,
    spawned: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    pub fn new(scripts: impl IntoIterator<Item = FakeScript>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            spawned: Arc::default(),
        }
    }

    pub fn spawned(&self) -> Vec<String> {
        self.spawned.lock().unwrap().clone()
    }
}

impl ProcessRunnerPort for FakeRunner {
    fn spawn(&self, command: &CommandSpec) -> Result<Box<dyn RunningProcess>, ProcessError> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ProcessError::Spawn {
                program: command.program.clone(),
                reason: "no such file or directory".to_string(),
            })?;
        self.spawned.lock().unwrap().push(command.to_command_string());
        Ok(Box::new(FakeProcess {
            lines: script.lines.into(),
            code: script.code,
            hang: script.hang,
            terminated: false,
        }))
    }
}

struct FakeProcess {
    lines: VecDeque<OutputLine>,
    code: i32,
    hang: bool,
    terminated: bool,
}

#[async_trait(?Send)]
impl RunningProcess for FakeProcess {
    fn id(&self) -> Option<u32> {
        None
    }

    async fn next_output(&mut self) -> Option<OutputLine> {
        if let Some(line) = self.lines.pop_front() {
            return Some(line);
        }
        if self.hang && !self.terminated {
            std::future::pending::<()>().await;
        }
        None
    }

    async fn wait(&mut self) -> Result<i32, ProcessError> {
        Ok(if self.terminated { 143 } else { self.code })
    }

    async fn terminate(&mut self) {
        self.terminated = true;
    }
}
