//! Line input for the terminal front-end.
//!
//! Blocking reads happen on a dedicated thread so the engine's
//! current-thread runtime never stalls on stdin. Lines arrive through an
//! unbounded channel whose `recv` is cancel-safe.

use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Read stdin line by line on a background thread.
///
/// The receiver yields `None` once stdin reaches EOF.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
}

/// Read `reader` line by line on a background thread.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("line-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug!("Input closed: {}", e);
                        break;
                    }
                }
            }
            debug!("Input reader finished");
        });
    if let Err(e) = spawned {
        warn!("Failed to start input reader: {}", e);
    }
    rx
}
