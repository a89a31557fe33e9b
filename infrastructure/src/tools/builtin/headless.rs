//! `headless`: runs with no tool page, only progress and a message.

use async_trait::async_trait;
use chainrun_domain::{ParameterSet, Tool, ToolDescriptor, ToolInterface};
use std::time::Duration;

pub const NAME: &str = "headless";

const STEPS: u32 = 10;
const STEP_DELAY: Duration = Duration::from_millis(500);

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(NAME, || Box::new(HeadlessTool::new(STEP_DELAY)))
        .with_help(
            "A headless tool runs with no interface except a progress bar and message \
             dialogs. Register a tool with `headless` set to make it headless.",
        )
        .with_collection(super::COLLECTION)
        .with_headless(true)
}

pub struct HeadlessTool {
    params: ParameterSet,
    step: Duration,
}

impl HeadlessTool {
    pub fn new(step: Duration) -> Self {
        Self {
            params: ParameterSet::new(),
            step,
        }
    }
}

#[async_trait(?Send)]
impl Tool for HeadlessTool {
    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    async fn execute(&mut self, ui: &mut dyn ToolInterface) -> i32 {
        ui.progress_start();
        for i in 0..STEPS {
            ui.progress_update("Working...", f64::from(i + 1) / f64::from(STEPS));
            tokio::time::sleep(self.step).await;
        }
        ui.progress_end();

        ui.message("Complete").await;
        0
    }
}
