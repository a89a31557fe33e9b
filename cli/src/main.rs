//! CLI entrypoint for chainrun
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result};
use chainrun_application::{ExecutionInterface, GeometryStore, InMemoryGeometryStore};
use chainrun_infrastructure::{
    BuiltinProvider, ConfigLoader, ConfigSources, TokioProcessRunner, TomlGeometryStore,
    ToolRegistry,
};
use chainrun_presentation::{Cli, ConsoleFormatter, ListFormat, TerminalFrontend, spawn_stdin_reader};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Exit code for startup failures other than an empty chain.
const EXIT_STARTUP_FAILURE: i32 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref());

    let code = exit_code(run(cli));
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            EXIT_STARTUP_FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.show_config {
        for line in ConfigLoader::describe_sources(&ConfigSources::discover(cli.config.as_deref())) {
            println!("{}", line);
        }
        return Ok(0);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    // === Tool discovery ===
    let mut registry = ToolRegistry::new().register(BuiltinProvider);
    if let Err(e) = registry.discover() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        return Ok(e.exit_code());
    }

    if cli.list {
        let tools = registry.tools();
        let output = match cli.format {
            ListFormat::Text => ConsoleFormatter::format_tool_list(&tools),
            ListFormat::Json => ConsoleFormatter::format_tool_list_json(&tools),
        };
        println!("{}", output);
        return Ok(0);
    }

    let Some(tool) = cli.tool.as_deref() else {
        eprintln!("No tool given. Use --list to see the available tools.");
        return Ok(EXIT_STARTUP_FAILURE);
    };
    let chain = match registry.launch(tool, cli.params.as_slice()) {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return Ok(e.exit_code());
        }
    };

    // === Dependency Injection ===
    let interface_config = config.to_interface_config();
    let frontend = TerminalFrontend::new(
        spawn_stdin_reader(),
        Box::new(std::io::stdout()),
        interface_config.console.clone(),
    )
    .with_progress_bar(!cli.quiet)
    .with_confirm_dialogs(!cli.no_confirm);

    let geometry: Box<dyn GeometryStore> = match config.state.resolve_path() {
        Some(path) => {
            info!("Window state: {}", path.display());
            Box::new(TomlGeometryStore::open(path))
        }
        None => Box::new(InMemoryGeometryStore::default()),
    };

    let abort = CancellationToken::new();
    let mut interface = ExecutionInterface::new(
        Box::new(frontend),
        Arc::new(TokioProcessRunner::new()),
        geometry,
        interface_config,
        chain,
    )
    .with_auto_run(cli.auto_run)
    .with_abort_token(abort.clone());

    // Tools, dialogs and the process loop share one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let result = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, aborting");
                abort.cancel();
            }
        });
        interface.run().await
    });

    match result {
        Ok(outcome) => {
            println!("{}", ConsoleFormatter::format_outcome(&outcome));
            Ok(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            Ok(e.exit_code())
        }
    }
}
