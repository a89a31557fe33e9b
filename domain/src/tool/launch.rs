//! Launch argument parsing
//!
//! `chainrun <tool> key=value ...` seeds the chain's [`ToolData`]. Values
//! stay strings here; each tool coerces them to its parameter types when
//! it is instantiated.

use super::entities::ToolData;
use crate::core::error::DomainError;
use crate::parameter::ParamValue;

/// Parse `key=value` words into tool data. Later duplicates win.
pub fn parse_launch_arguments<S: AsRef<str>>(args: &[S]) -> Result<ToolData, DomainError> {
    let mut data = ToolData::new();
    for arg in args {
        let arg = arg.as_ref();
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| DomainError::InvalidArgument(arg.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::InvalidArgument(arg.to_string()));
        }
        data.insert(key.to_string(), ParamValue::from(value));
    }
    Ok(data)
}
