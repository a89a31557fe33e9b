//! Parameter ↔ control binding
//!
//! - [`kind`]: which control a parameter gets
//! - [`adapter`]: keeps one parameter and one control in sync
//! - [`set`]: all adapters of the currently loaded tool

pub mod adapter;
pub mod kind;
pub mod set;

pub use adapter::BindingAdapter;
pub use kind::{ControlKind, control_kind, control_kind_for};
pub use set::{BindingError, BindingSet};
