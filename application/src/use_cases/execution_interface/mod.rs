//! Execution interface use case
//!
//! Drives a [`ToolChain`] through a [`Frontend`]: loads the current tool,
//! binds its parameters, dispatches `execute`, interprets the exit code and
//! advances or halts.
//!
//! # Flow
//!
//! ```text
//! run()
//!   │ chain.start()            (empty → EngineError::ChainEmpty)
//!   ▼
//! ┌──────────── visit(tool) ────────────────────────────────────────┐
//! │ instantiate + seed from tool_data                               │
//! │ headless? ── yes ─────────────────────────────┐                 │
//! │   no: restore geometry, tool_loaded, bind     │                 │
//! │   Loaded: Edit → validate/store, Next ────────┤                 │
//! │                                               ▼                 │
//! │                    validate_all ─ err → one error dialog        │
//! │                         │ ok                                    │
//! │                    Running: execute(ToolContext) → code         │
//! │                         │                                       │
//! │                    Advancing: code != 0 → Terminated(Failed)    │
//! │                               no next  → Terminated(Success)    │
//! │                               confirm (unless auto-advance)     │
//! └─────────────────────────────────────────────────────────────────┘
//!   │ chain.advance()
//!   └──▶ visit(next tool)
//! ```
//!
//! # Threading
//!
//! Everything runs on one task. The interface and every `execute` share a
//! current-thread runtime; the only concurrent wait is the `select!` in
//! [`ToolContext`] and in [`ExecutionInterface::next_input`].

mod state;
mod tool_context;

pub use state::{InterfaceState, RunOutcome};
pub use tool_context::{CLOSE_WHILE_RUNNING, PROCESS_TERMINATED, ToolContext};

use crate::binding::BindingSet;
use crate::config::InterfaceConfig;
use crate::console::ConsoleBuffer;
use crate::ports::frontend::{ChainPosition, Frontend, ToolPage, UserEvent};
use crate::ports::geometry_store::GeometryStore;
use crate::ports::process::ProcessRunnerPort;
use chainrun_domain::{Tool, ToolChain, ToolDescriptor};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Tool chain is empty")]
    ChainEmpty,
}

impl EngineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ChainEmpty => 2,
        }
    }
}

/// What the user did while a tool page was waiting.
enum Input {
    User(UserEvent),
    /// The front-end will produce no more events.
    Closed,
    /// The abort token fired.
    Cancelled,
}

/// Result of visiting one tool.
enum Visit {
    Advance,
    Stop(RunOutcome),
}

pub struct ExecutionInterface {
    frontend: Box<dyn Frontend>,
    runner: Arc<dyn ProcessRunnerPort>,
    geometry: Box<dyn GeometryStore>,
    config: InterfaceConfig,
    chain: ToolChain,
    console: ConsoleBuffer,
    state: InterfaceState,
    auto_run: bool,
    input_closed: bool,
    abort: CancellationToken,
}

impl ExecutionInterface {
    pub fn new(
        frontend: Box<dyn Frontend>,
        runner: Arc<dyn ProcessRunnerPort>,
        geometry: Box<dyn GeometryStore>,
        config: InterfaceConfig,
        chain: ToolChain,
    ) -> Self {
        let console = ConsoleBuffer::new(config.console.line_limit);
        Self {
            frontend,
            runner,
            geometry,
            config,
            chain,
            console,
            state: InterfaceState::Idle,
            auto_run: false,
            input_closed: false,
            abort: CancellationToken::new(),
        }
    }

    /// Execute the first tool without waiting for the user.
    pub fn with_auto_run(mut self, auto_run: bool) -> Self {
        self.auto_run = auto_run;
        self
    }

    /// Use an externally owned abort token (e.g. cancelled on Ctrl+C).
    pub fn with_abort_token(mut self, token: CancellationToken) -> Self {
        self.abort = token;
        self
    }

    /// Token that aborts a running command and ends the run.
    pub fn abort_handle(&self) -> CancellationToken {
        self.abort.clone()
    }

    pub fn state(&self) -> &InterfaceState {
        &self.state
    }

    pub fn chain(&self) -> &ToolChain {
        &self.chain
    }

    pub fn console(&self) -> &ConsoleBuffer {
        &self.console
    }

    /// Run the chain to completion.
    pub async fn run(&mut self) -> Result<RunOutcome, EngineError> {
        let mut descriptor = match self.chain.start() {
            Ok(first) => first.clone(),
            Err(_) => return Err(EngineError::ChainEmpty),
        };
        info!(
            "Starting chain with {} tool(s), first: {}",
            self.chain.tool_count(),
            descriptor.name
        );

        let mut auto_run = self.auto_run;
        let outcome = loop {
            match self.visit(&descriptor, auto_run).await {
                Visit::Stop(outcome) => break outcome,
                Visit::Advance => {
                    auto_run = false;
                    match self.chain.advance() {
                        Some(next) => descriptor = next.clone(),
                        None => break RunOutcome::Success,
                    }
                }
            }
        };

        info!("Chain finished: {}", outcome);
        self.set_state(InterfaceState::Terminated(outcome.clone()));
        if let Err(e) = self.geometry.flush() {
            warn!("Failed to persist window geometry: {}", e);
        }
        Ok(outcome)
    }

    fn set_state(&mut self, next: InterfaceState) {
        if !self.state.can_transition_to(&next) {
            warn!("Unexpected transition {} -> {}", self.state, next);
        }
        debug!("State: {} -> {}", self.state, next);
        self.state = next;
        self.frontend.state_changed(&self.state);
    }

    fn position(&self) -> ChainPosition {
        ChainPosition {
            index: self.chain.current_tool_index().unwrap_or(0),
            count: self.chain.tool_count(),
        }
    }

    /// Load, run and leave one tool.
    async fn visit(&mut self, descriptor: &ToolDescriptor, auto_run: bool) -> Visit {
        let (mut tool, rejected) = descriptor.instantiate(self.chain.tool_data());
        if !rejected.is_empty() {
            let text = rejected
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            warn!("Ignored invalid values for {}: {}", descriptor.name, text);
            self.frontend.warning(&text).await;
        }

        if descriptor.is_headless() {
            info!("Running headless tool: {}", descriptor.name);
            return self.run_headless(descriptor, tool.as_mut()).await;
        }

        let key = descriptor.geometry_key();
        if let Some(geometry) = self.geometry.load(&key) {
            self.frontend.restore_geometry(geometry);
        }
        let page = ToolPage {
            tool: descriptor,
            window_title: self.config.window_title(&descriptor.name),
            position: self.position(),
        };
        info!("Loaded tool: {}", descriptor.name);
        self.frontend.tool_loaded(&page);
        let mut bindings = BindingSet::bind_all(tool.parameters_mut(), self.frontend.as_mut());
        self.set_state(InterfaceState::Loaded);
        self.frontend.set_input_enabled(true);

        let visit = self
            .interact(descriptor, tool.as_mut(), &mut bindings, auto_run)
            .await;

        bindings.unbind_all(tool.parameters(), self.frontend.as_mut());
        if let Some(geometry) = self.frontend.geometry() {
            self.geometry.save(&key, geometry);
        }
        if let Err(e) = self.geometry.flush() {
            warn!("Failed to persist window geometry: {}", e);
        }
        self.frontend.tool_closed(descriptor);
        visit
    }

    async fn run_headless(&mut self, descriptor: &ToolDescriptor, tool: &mut dyn Tool) -> Visit {
        if let Err(e) = tool.parameters().validate_all() {
            self.frontend.error(&e.to_string()).await;
            return Visit::Stop(RunOutcome::Failed {
                tool: descriptor.name.clone(),
                code: 1,
            });
        }
        match self.execute(descriptor, tool).await {
            Some(outcome) => Visit::Stop(outcome),
            None if self.chain.has_next() => Visit::Advance,
            None => Visit::Stop(RunOutcome::Success),
        }
    }

    /// The Loaded/Running/Advancing loop for a shown tool.
    async fn interact(
        &mut self,
        descriptor: &ToolDescriptor,
        tool: &mut dyn Tool,
        bindings: &mut BindingSet,
        mut run_now: bool,
    ) -> Visit {
        loop {
            let event = if run_now {
                run_now = false;
                Input::User(UserEvent::Next)
            } else {
                self.next_input().await
            };

            match event {
                Input::User(UserEvent::Edit { parameter, value }) => {
                    if let Err(e) = bindings.apply_user_edit(tool.parameters_mut(), &parameter, value) {
                        debug!("Edit rejected: {}", e);
                    }
                    bindings.rebuild_stale(tool.parameters_mut(), self.frontend.as_mut());
                }
                Input::User(UserEvent::Next) => {
                    if let Err(e) = tool.parameters().validate_all() {
                        info!("Validation failed for {}: {}", descriptor.name, e);
                        self.frontend.error(&e.to_string()).await;
                        continue;
                    }
                    let result = self.execute(descriptor, tool).await;
                    bindings.rebuild_stale(tool.parameters_mut(), self.frontend.as_mut());
                    if let Some(outcome) = result {
                        return Visit::Stop(outcome);
                    }
                    if !self.chain.has_next() {
                        return Visit::Stop(RunOutcome::Success);
                    }
                    if descriptor.auto_advances() {
                        return Visit::Advance;
                    }
                    return self.await_confirm().await;
                }
                Input::User(UserEvent::Abort) => debug!("Nothing to abort"),
                Input::User(UserEvent::Close) | Input::Closed | Input::Cancelled => {
                    return Visit::Stop(RunOutcome::Cancelled);
                }
            }
        }
    }

    /// Dispatch `execute`. Returns the outcome if the chain must stop.
    async fn execute(&mut self, descriptor: &ToolDescriptor, tool: &mut dyn Tool) -> Option<RunOutcome> {
        self.set_state(InterfaceState::Running);
        self.frontend.set_input_enabled(false);
        info!("Executing tool: {}", descriptor.name);

        let (code, aborted) = {
            let mut context = ToolContext::new(
                self.frontend.as_mut(),
                &mut self.chain,
                self.runner.as_ref(),
                &mut self.console,
                &mut self.input_closed,
                self.abort.clone(),
            );
            let code = tool.execute(&mut context).await;
            (code, context.was_aborted())
        };

        self.set_state(InterfaceState::Advancing);
        info!("{} returned {}", descriptor.name, code);

        if code == 0 {
            return None;
        }
        if aborted || self.abort.is_cancelled() {
            return Some(RunOutcome::Aborted {
                tool: descriptor.name.clone(),
            });
        }
        let outcome = RunOutcome::Failed {
            tool: descriptor.name.clone(),
            code,
        };
        self.frontend.error(&outcome.to_string()).await;
        Some(outcome)
    }

    /// Wait for Next (advance) or Close (stop) after a successful run.
    async fn await_confirm(&mut self) -> Visit {
        // The confirm gesture comes from the same controls `execute` disabled.
        self.frontend.set_input_enabled(true);
        loop {
            match self.next_input().await {
                Input::User(UserEvent::Next) => return Visit::Advance,
                Input::User(UserEvent::Close) | Input::Closed | Input::Cancelled => {
                    return Visit::Stop(RunOutcome::Cancelled);
                }
                Input::User(other) => debug!("Ignoring {:?} after a completed run", other),
            }
        }
    }

    async fn next_input(&mut self) -> Input {
        if self.input_closed {
            return if self.abort.is_cancelled() {
                Input::Cancelled
            } else {
                Input::Closed
            };
        }
        tokio::select! {
            biased;
            _ = self.abort.cancelled() => Input::Cancelled,
            event = self.frontend.next_event() => match event {
                Some(event) => Input::User(event),
                None => {
                    self.input_closed = true;
                    Input::Closed
                }
            },
        }
    }
}
