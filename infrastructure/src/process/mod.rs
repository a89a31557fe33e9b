//! External command execution
//!
//! [`TokioProcessRunner`] implements the application's
//! [`ProcessRunnerPort`](chainrun_application::ProcessRunnerPort) on top of
//! `tokio::process`.

mod runner;

pub use runner::{TERMINATE_GRACE, TokioProcessRunner};
