//! Tool provider abstraction
//!
//! A [`ToolProvider`] is a source of [`ToolDescriptor`]s. The registry
//! asks every provider once at startup and keeps the winners by priority.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                ToolRegistry                 │
//! │  (name → descriptor, read-only after load)  │
//! └─────────────────────────────────────────────┘
//!           │                       │
//!           ▼                       ▼
//!    ┌──────────────┐        ┌──────────────┐
//!    │   Builtin    │        │    Other     │
//!    │   Provider   │        │  providers   │
//!    └──────────────┘        └──────────────┘
//!    priority: -100          priority: 0 (default)
//! ```
//!
//! When two providers offer a tool with the same name, the one with the
//! higher priority wins.

use super::entities::ToolDescriptor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider cannot be used in this environment
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),
}

pub trait ToolProvider: Send + Sync {
    /// Unique identifier, e.g. "builtin"
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Priority for name conflicts (higher = preferred)
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this provider can be used right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Every tool this provider offers.
    fn discover_tools(&self) -> Result<Vec<ToolDescriptor>, ProviderError>;
}
