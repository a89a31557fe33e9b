//! Tracing setup
//!
//! Logs go to stderr so they never interleave with the tool page on
//! stdout. `--log-file` adds a second, non-blocking layer without colors.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "CHAINRUN_LOG";

/// Filter for a `-v` count; `CHAINRUN_LOG` wins when set.
pub fn filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit or buffered file lines are lost.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter(verbose))
            .with(stderr)
            .init();
        return None;
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chainrun.log".to_string());
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("chainrun: failed to create log dir {}: {}", dir.display(), e);
    }

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(stderr)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Some(guard)
}
