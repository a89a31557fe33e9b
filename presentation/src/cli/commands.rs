//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for `--list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Grouped by collection, with help text
    Text,
    /// JSON array of tool records
    Json,
}

/// CLI arguments for chainrun
#[derive(Parser, Debug)]
#[command(name = "chainrun")]
#[command(author, version, about = "Run a chain of tools with typed, validated parameters")]
#[command(long_about = r#"
chainrun loads a tool, lets you edit its parameters, runs it, and moves on
to any tools it enqueued.

Parameters can be preset on the command line as param=value pairs. While a
tool page is shown, type `help` for the available commands.

Configuration files are loaded from (in priority order):
1. CHAINRUN_* environment variables
2. --config <path>     Explicit config file
3. ./chainrun.toml     Project-level config
4. ~/.config/chainrun/config.toml   Global config

Example:
  chainrun --list
  chainrun keep-ui-open iterations=10
  chainrun run-command command="make test" --auto-run
"#)]
pub struct Cli {
    /// Tool to launch
    pub tool: Option<String>,

    /// Initial parameter values for the tool
    #[arg(value_name = "PARAM=VALUE")]
    pub params: Vec<String>,

    /// Run the first tool immediately instead of waiting for `run`
    #[arg(long)]
    pub auto_run: bool,

    /// List registered tools and exit
    #[arg(short, long)]
    pub list: bool,

    /// Output format for --list
    #[arg(long, value_enum, default_value = "text")]
    pub format: ListFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not wait for Enter after messages
    #[arg(long)]
    pub no_confirm: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
