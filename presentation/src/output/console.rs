//! Console output for tool listings and run results

use chainrun_application::RunOutcome;
use chainrun_domain::ToolDescriptor;
use colored::Colorize;
use serde::Serialize;

/// One tool as printed by `--list --format json`.
#[derive(Debug, Serialize)]
pub struct ToolListing<'a> {
    pub name: &'a str,
    pub collection: &'a str,
    pub help: &'a str,
    pub headless: bool,
    pub auto_advance: bool,
}

impl<'a> From<&'a ToolDescriptor> for ToolListing<'a> {
    fn from(tool: &'a ToolDescriptor) -> Self {
        Self {
            name: &tool.name,
            collection: &tool.collection,
            help: &tool.help,
            headless: tool.is_headless(),
            auto_advance: tool.auto_advances(),
        }
    }
}

/// Formats listings and results for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Tools grouped under their collection, in the order given.
    pub fn format_tool_list(tools: &[&ToolDescriptor]) -> String {
        let mut output = String::new();
        let mut current: Option<&str> = None;

        for tool in tools {
            if current != Some(tool.collection.as_str()) {
                if current.is_some() {
                    output.push('\n');
                }
                let heading = if tool.collection.is_empty() {
                    "(no collection)"
                } else {
                    tool.collection.as_str()
                };
                output.push_str(&format!("{}\n", heading.cyan().bold()));
                current = Some(tool.collection.as_str());
            }

            let mut flags = Vec::new();
            if tool.is_headless() {
                flags.push("headless");
            }
            if tool.auto_advances() {
                flags.push("auto-advance");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };

            output.push_str(&format!("  {}{}\n", tool.name.bold(), flags.dimmed()));
            if let Some(summary) = tool.help.lines().next()
                && !summary.trim().is_empty()
            {
                output.push_str(&format!("      {}\n", summary.trim()));
            }
        }

        if tools.is_empty() {
            output.push_str("No tools registered.\n");
        }
        output
    }

    /// Format as JSON
    pub fn format_tool_list_json(tools: &[&ToolDescriptor]) -> String {
        let listing: Vec<ToolListing<'_>> = tools.iter().map(|t| ToolListing::from(*t)).collect();
        serde_json::to_string_pretty(&listing).unwrap_or_else(|_| "[]".to_string())
    }

    /// One-line summary of how a run ended.
    pub fn format_outcome(outcome: &RunOutcome) -> String {
        match outcome {
            RunOutcome::Success => format!("{} Chain complete", "v".green()),
            RunOutcome::Cancelled => format!("{} Closed", "-".yellow()),
            RunOutcome::Aborted { tool } => format!("{} {} was aborted", "x".red(), tool),
            RunOutcome::Failed { .. } => format!("{} {}", "x".red(), outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chainrun_domain::{ParameterSet, Tool, ToolInterface};

    struct Noop(ParameterSet);

    #[async_trait(?Send)]
    impl Tool for Noop {
        fn parameters(&self) -> &ParameterSet {
            &self.0
        }

        fn parameters_mut(&mut self) -> &mut ParameterSet {
            &mut self.0
        }

        async fn execute(&mut self, _ui: &mut dyn ToolInterface) -> i32 {
            0
        }
    }

    fn tool(name: &str, collection: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, || Box::new(Noop(ParameterSet::new())))
            .with_collection(collection)
            .with_help("First line.\nSecond line.")
    }

    #[test]
    fn test_tool_list_groups_by_collection() {
        let a = tool("alpha", "Examples").with_headless(true);
        let b = tool("beta", "Examples");
        let c = tool("gamma", "Image");
        let text = ConsoleFormatter::format_tool_list(&[&a, &b, &c]);

        assert_eq!(text.matches("Examples").count(), 1);
        assert!(text.contains("Image"));
        assert!(text.contains("headless"));
        assert!(text.contains("First line."));
        assert!(!text.contains("Second line."));
    }

    #[test]
    fn test_empty_list() {
        assert!(ConsoleFormatter::format_tool_list(&[]).contains("No tools registered."));
    }

    #[test]
    fn test_tool_list_json() {
        let a = tool("alpha", "Examples").with_auto_advance(true);
        let json = ConsoleFormatter::format_tool_list_json(&[&a]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["name"], "alpha");
        assert_eq!(parsed[0]["collection"], "Examples");
        assert_eq!(parsed[0]["auto_advance"], true);
        assert_eq!(parsed[0]["headless"], false);
    }

    #[test]
    fn test_format_outcome() {
        let failed = RunOutcome::Failed {
            tool: "convert".to_string(),
            code: 2,
        };
        assert!(ConsoleFormatter::format_outcome(&failed).contains("convert failed with exit code 2"));
        assert!(ConsoleFormatter::format_outcome(&RunOutcome::Success).contains("Chain complete"));
    }
}
