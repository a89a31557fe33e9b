//! Parameter domain module
//!
//! A [`Parameter`] is a typed, named, validated value cell. Tools expose an
//! ordered [`ParameterSet`]; front-ends bind each visible parameter to a
//! control and keep the two in sync through the parameter's notifiers.
//!
//! ```text
//!   raw input ──▶ DataType::coerce ──▶ choices ──▶ min/max ──▶ validators ──▶ accepted
//!                        │                │            │             │
//!                        └────────────────┴────────────┴─────────────┴──▶ ParameterValidationError
//! ```
//!
//! `validate` never writes the live value. Writes go through
//! [`Parameter::set_value`] (unchecked) or [`Parameter::try_set_value`].

pub mod entities;
pub mod notifier;
pub mod options;
pub mod validator;
pub mod value;

pub use entities::{Parameter, ParameterSet, ParameterValidationError};
pub use notifier::{Notifier, SubscriptionId};
pub use options::ParameterOptions;
pub use validator::{FileExists, FnValidator, FolderExists, NotEmpty, Validator};
pub use value::{DataType, ParamValue};
