//! Tokio-backed process runner
//!
//! Each spawned child gets two reader tasks, one per pipe, feeding a single
//! channel so lines arrive in the order they were read:
//!
//! ```text
//!  child stdout ──▶ reader task ─┐
//!                                ├──▶ mpsc ──▶ next_output()
//!  child stderr ──▶ reader task ─┘
//! ```
//!
//! The channel closes once both readers hit EOF, which is how
//! `next_output` reports the end of output.

use async_trait::async_trait;
use chainrun_application::{OutputLine, ProcessError, ProcessRunnerPort, RunningProcess};
use chainrun_domain::{CommandSpec, OutputStream};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// How long a terminated child gets to exit after SIGTERM before it is killed.
pub const TERMINATE_GRACE: Duration = Duration::from_secs(3);

/// Spawns commands as child processes of the engine.
#[derive(Debug, Clone)]
pub struct TokioProcessRunner {
    grace: Duration,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self {
            grace: TERMINATE_GRACE,
        }
    }

    /// Time between SIGTERM and kill on terminate.
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    fn build_command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        // Linux: request kernel to send SIGTERM to child when parent dies.
        // This catches cases where Drop doesn't run (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunnerPort for TokioProcessRunner {
    fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn RunningProcess>, ProcessError> {
        let mut child = Self::build_command(spec)
            .spawn()
            .map_err(|e| ProcessError::Spawn {
                program: spec.program.clone(),
                reason: e.to_string(),
            })?;
        debug!(pid = ?child.id(), program = %spec.program, "Spawned process");

        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(read_lines(stdout, OutputStream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(read_lines(stderr, OutputStream::Stderr, tx));
        }

        Ok(Box::new(TokioProcess {
            child,
            lines: rx,
            grace: self.grace,
        }))
    }
}

/// Forward every line of `pipe` until EOF.
///
/// Bytes are decoded lossily; a trailing `\r\n` or `\n` is stripped.
async fn read_lines<R>(pipe: R, stream: OutputStream, tx: mpsc::UnboundedSender<OutputLine>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                let text = String::from_utf8_lossy(&buf).into_owned();
                trace!(%stream, %text, "Process output");
                if tx.send(OutputLine { stream, text }).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(%stream, error = %e, "Failed to read process output");
                break;
            }
        }
    }
}

struct TokioProcess {
    child: Child,
    lines: mpsc::UnboundedReceiver<OutputLine>,
    grace: Duration,
}

#[async_trait(?Send)]
impl RunningProcess for TokioProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    async fn next_output(&mut self) -> Option<OutputLine> {
        self.lines.recv().await
    }

    async fn wait(&mut self) -> Result<i32, ProcessError> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|e| ProcessError::Io(e.to_string()))?;
        Ok(exit_code(status))
    }

    async fn terminate(&mut self) {
        #[cfg(unix)]
        if let Some(pid) = self.child.id() {
            debug!(pid, "Sending SIGTERM");
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
            }
            if tokio::time::timeout(self.grace, self.child.wait()).await.is_ok() {
                return;
            }
            warn!(pid, "Process ignored SIGTERM, killing");
        }

        if let Err(e) = self.child.kill().await {
            debug!(error = %e, "Kill failed (process already exited?)");
        }
    }
}

/// Exit code, or `128 + signal` for a child killed by a signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    async fn drain(process: &mut Box<dyn RunningProcess>) -> Vec<OutputLine> {
        let mut lines = Vec::new();
        while let Some(line) = process.next_output().await {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn test_streams_both_pipes_and_exit_code() {
        let runner = TokioProcessRunner::new();
        let mut process = runner
            .spawn(&CommandSpec::shell("echo one; echo two; echo oops >&2; exit 3"))
            .unwrap();

        let lines = drain(&mut process).await;
        let code = process.wait().await.unwrap();

        assert_eq!(code, 3);
        let stdout: Vec<_> = lines
            .iter()
            .filter(|l| l.stream == OutputStream::Stdout)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(stdout, vec!["one", "two"]);
        assert!(lines.contains(&OutputLine::stderr("oops")));
    }

    #[tokio::test]
    async fn test_strips_carriage_returns_and_keeps_last_partial_line() {
        let runner = TokioProcessRunner::new();
        let mut process = runner
            .spawn(&CommandSpec::shell("printf 'a\\r\\nb'"))
            .unwrap();

        let lines = drain(&mut process).await;

        assert_eq!(lines, vec![OutputLine::stdout("a"), OutputLine::stdout("b")]);
        assert_eq!(process.wait().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let runner = TokioProcessRunner::new();
        let result = runner.spawn(&CommandSpec::new("/definitely/not/a/program"));
        match result {
            Err(ProcessError::Spawn { program, .. }) => {
                assert_eq!(program, "/definitely/not/a/program")
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[tokio::test]
    async fn test_terminate_stops_long_running_process() {
        let runner = TokioProcessRunner::new().with_grace(Duration::from_secs(5));
        let mut process = runner.spawn(&CommandSpec::new("sleep").arg("30")).unwrap();
        assert!(process.id().is_some());

        process.terminate().await;
        let code = process.wait().await.unwrap();

        assert_eq!(code, 128 + libc::SIGTERM);
        assert!(drain(&mut process).await.is_empty());
    }

    #[tokio::test]
    async fn test_cwd_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let runner = TokioProcessRunner::new();
        let spec = CommandSpec::shell("pwd; echo $CHAINRUN_TEST_VALUE")
            .current_dir(dir.path())
            .env("CHAINRUN_TEST_VALUE", "42");
        let mut process = runner.spawn(&spec).unwrap();

        let lines = drain(&mut process).await;

        assert_eq!(lines.len(), 2);
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(
            std::path::Path::new(&lines[0].text).canonicalize().unwrap(),
            expected
        );
        assert_eq!(lines[1].text, "42");
    }
}
