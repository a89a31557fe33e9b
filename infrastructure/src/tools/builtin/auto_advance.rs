//! `auto-advance` → `auto-advance-auto` → `auto-advance-close`
//!
//! Only the first stage is registered; each stage enqueues the next. The
//! first waits for Next after a successful run, the other two advance on
//! their own.

use async_trait::async_trait;
use chainrun_domain::{Parameter, ParameterSet, Tool, ToolDescriptor, ToolInterface};
use std::time::Duration;

pub const NAME: &str = "auto-advance";

const MESSAGE: &str = "message";
const STEPS: u32 = 100;
const STEP_DELAY: Duration = Duration::from_millis(10);

const HELP: &str = "After a successful run the default is to leave the tool disabled; \
    Next or Close moves on. Tools registered with `auto_advance` load the next tool \
    (or close the interface) by themselves.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Auto,
    Close,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => NAME,
            Stage::Auto => "auto-advance-auto",
            Stage::Close => "auto-advance-close",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Stage::Start => "This tool will not auto advance.",
            Stage::Auto => "This tool will automatically advance to the next tool.",
            Stage::Close => "This tool will automatically close the interface.",
        }
    }

    fn completion(self) -> &'static str {
        match self {
            Stage::Start => {
                "Execution is complete. After clicking 'OK' you will have to click the \
                 'Next' button to load the next tool."
            }
            Stage::Auto => {
                "Execution is complete. After clicking 'OK' the next tool will be \
                 automatically loaded."
            }
            Stage::Close => {
                "Execution is complete. After clicking 'OK' the interface will \
                 automatically close."
            }
        }
    }

    fn next(self) -> Option<Stage> {
        match self {
            Stage::Start => Some(Stage::Auto),
            Stage::Auto => Some(Stage::Close),
            Stage::Close => None,
        }
    }
}

pub fn descriptor() -> ToolDescriptor {
    stage_descriptor(Stage::Start)
}

pub fn stage_descriptor(stage: Stage) -> ToolDescriptor {
    ToolDescriptor::new(stage.name(), move || {
        Box::new(AutoAdvanceTool::new(stage, STEP_DELAY))
    })
    .with_help(HELP)
    .with_collection(super::COLLECTION)
    .with_auto_advance(stage != Stage::Start)
}

pub struct AutoAdvanceTool {
    stage: Stage,
    params: ParameterSet,
    step: Duration,
}

impl AutoAdvanceTool {
    pub fn new(stage: Stage, step: Duration) -> Self {
        let params = ParameterSet::new().with(
            Parameter::string(MESSAGE)
                .with_ui("label")
                .with_value(stage.label()),
        );
        Self {
            stage,
            params,
            step,
        }
    }
}

#[async_trait(?Send)]
impl Tool for AutoAdvanceTool {
    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    async fn execute(&mut self, ui: &mut dyn ToolInterface) -> i32 {
        ui.progress_start();
        for i in 0..STEPS {
            ui.progress_update(
                &format!("Iteration: {}/{}", i + 1, STEPS),
                f64::from(i + 1) / f64::from(STEPS),
            );
            tokio::time::sleep(self.step).await;
        }
        ui.progress_end();

        ui.message(self.stage.completion()).await;
        if let Some(next) = self.stage.next() {
            ui.add_tool(stage_descriptor(next));
        }
        0
    }
}
