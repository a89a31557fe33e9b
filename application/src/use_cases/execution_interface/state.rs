//! Execution interface state machine.
//!
//! ```text
//!  Idle ──run()──▶ Loaded ──Next / headless / auto-run──▶ Running
//!                    ▲                                       │ execute() returns
//!                    │                                       ▼
//!                    └──── next tool (after confirm) ──── Advancing ──▶ Terminated
//! ```
//!
//! Validation failures keep the interface in `Loaded`. A non-zero exit
//! code, an abort, or running out of tools ends in `Terminated`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InterfaceState {
    #[default]
    Idle,
    Loaded,
    Running,
    Advancing,
    Terminated(RunOutcome),
}

impl InterfaceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceState::Idle => "idle",
            InterfaceState::Loaded => "loaded",
            InterfaceState::Running => "running",
            InterfaceState::Advancing => "advancing",
            InterfaceState::Terminated(_) => "terminated",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InterfaceState::Terminated(_))
    }

    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(&self, next: &InterfaceState) -> bool {
        use InterfaceState::*;
        matches!(
            (self, next),
            (Idle, Loaded)
                | (Idle, Running)
                | (Idle, Terminated(_))
                | (Loaded, Running)
                | (Loaded, Terminated(_))
                | (Running, Advancing)
                | (Running, Terminated(_))
                | (Advancing, Loaded)
                | (Advancing, Running)
                | (Advancing, Terminated(_))
        )
    }
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceState::Terminated(outcome) => write!(f, "terminated ({})", outcome),
            other => f.write_str(other.as_str()),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every tool in the chain returned 0.
    Success,
    /// A tool returned a non-zero code, or its parameters were invalid and
    /// it could not be shown to fix them.
    Failed { tool: String, code: i32 },
    /// The user aborted a running process.
    Aborted { tool: String },
    /// The user closed the interface before the chain finished.
    Cancelled,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    /// Process exit code for the launcher.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success | RunOutcome::Cancelled => 0,
            RunOutcome::Failed { .. } | RunOutcome::Aborted { .. } => 1,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success => f.write_str("success"),
            RunOutcome::Failed { tool, code } => write!(f, "{} failed with exit code {}", tool, code),
            RunOutcome::Aborted { tool } => write!(f, "{} aborted", tool),
            RunOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use InterfaceState::*;
        assert!(Idle.can_transition_to(&Loaded));
        assert!(Loaded.can_transition_to(&Running));
        assert!(Running.can_transition_to(&Advancing));
        assert!(Advancing.can_transition_to(&Loaded));
        assert!(Advancing.can_transition_to(&Terminated(RunOutcome::Success)));
        assert!(!Terminated(RunOutcome::Success).can_transition_to(&Loaded));
        assert!(!Idle.can_transition_to(&Advancing));
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(RunOutcome::Success.exit_code(), 0);
        assert_eq!(RunOutcome::Cancelled.exit_code(), 0);
        assert_eq!(
            RunOutcome::Failed {
                tool: "c".into(),
                code: 3
            }
            .exit_code(),
            1
        );
        assert_eq!(RunOutcome::Aborted { tool: "c".into() }.exit_code(), 1);
    }

    #[test]
    fn test_display() {
        let outcome = RunOutcome::Failed {
            tool: "convert".into(),
            code: 2,
        };
        assert_eq!(outcome.to_string(), "convert failed with exit code 2");
        assert_eq!(
            InterfaceState::Terminated(RunOutcome::Success).to_string(),
            "terminated (success)"
        );
    }
}
