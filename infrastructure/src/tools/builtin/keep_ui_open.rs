//! `keep-ui-open`: re-enqueues itself until `iterations` is 0.
//!
//! The next instance is seeded through the chain's tool data, so the
//! slider keeps the last value.

use async_trait::async_trait;
use chainrun_domain::{ParamValue, Parameter, ParameterSet, Tool, ToolDescriptor, ToolInterface};
use std::time::Duration;

pub const NAME: &str = "keep-ui-open";

const ITERATIONS: &str = "iterations";
const STEP_DELAY: Duration = Duration::from_millis(50);

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(NAME, || Box::new(KeepUiOpenTool::new(STEP_DELAY)))
        .with_help(
            "An example of keeping the interface open. By default it closes after \
             the last tool finishes.",
        )
        .with_collection(super::COLLECTION)
}

pub struct KeepUiOpenTool {
    params: ParameterSet,
    step: Duration,
}

impl KeepUiOpenTool {
    pub fn new(step: Duration) -> Self {
        let params = ParameterSet::new().with(
            Parameter::int(ITERATIONS)
                .with_ui("slider")
                .with_option("ticks", 1)
                .with_minimum(0)
                .with_maximum(100)
                .with_default(50)
                .with_description(
                    "Pick a number between 1 and 100, or choose 0 to close the tool.",
                ),
        );
        Self { params, step }
    }
}

#[async_trait(?Send)]
impl Tool for KeepUiOpenTool {
    fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    async fn execute(&mut self, ui: &mut dyn ToolInterface) -> i32 {
        let iterations = self.params.int(ITERATIONS).unwrap_or(0);

        ui.progress_start();
        for i in 0..iterations {
            ui.progress_update(
                &format!("Iteration: {}/{}", i + 1, iterations),
                (i + 1) as f64 / iterations as f64,
            );
            tokio::time::sleep(self.step).await;
        }
        ui.progress_end();

        ui.message("Complete").await;

        if iterations > 0 {
            ui.add_tool(descriptor());
            ui.tool_data_mut()
                .insert(ITERATIONS.to_string(), ParamValue::Int(iterations));
        }
        0
    }
}
