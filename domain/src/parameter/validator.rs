//! Parameter validators
//!
//! A parameter carries an ordered list of validators. Each one declares
//! which [`DataType`]s it understands; validators that don't apply to the
//! parameter's type are skipped. The first failing validator stops
//! validation and its reason becomes the error message.

use super::value::{DataType, ParamValue};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A single acceptance predicate over an already-coerced value.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Whether this validator should run for parameters of `data_type`.
    fn applies_to(&self, _data_type: DataType) -> bool {
        true
    }

    /// Accept or reject `value`, returning a human-readable reason on failure.
    fn check(&self, value: &ParamValue) -> Result<(), String>;
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn applies_to(&self, data_type: DataType) -> bool {
        (**self).applies_to(data_type)
    }

    fn check(&self, value: &ParamValue) -> Result<(), String> {
        (**self).check(value)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn applies_to(&self, data_type: DataType) -> bool {
        (**self).applies_to(data_type)
    }

    fn check(&self, value: &ParamValue) -> Result<(), String> {
        (**self).check(value)
    }
}

/// The path must name an existing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExists;

impl Validator for FileExists {
    fn applies_to(&self, data_type: DataType) -> bool {
        data_type == DataType::String
    }

    fn check(&self, value: &ParamValue) -> Result<(), String> {
        let path = value.as_str().unwrap_or_default();
        if Path::new(path).is_file() {
            Ok(())
        } else {
            Err(format!("file does not exist: {}", path))
        }
    }
}

/// The path must name an existing directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderExists;

impl Validator for FolderExists {
    fn applies_to(&self, data_type: DataType) -> bool {
        data_type == DataType::String
    }

    fn check(&self, value: &ParamValue) -> Result<(), String> {
        let path = value.as_str().unwrap_or_default();
        if Path::new(path).is_dir() {
            Ok(())
        } else {
            Err(format!("folder does not exist: {}", path))
        }
    }
}

/// Strings and lists must not be empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotEmpty;

impl Validator for NotEmpty {
    fn applies_to(&self, data_type: DataType) -> bool {
        matches!(data_type, DataType::String | DataType::List)
    }

    fn check(&self, value: &ParamValue) -> Result<(), String> {
        if value.is_empty() {
            Err("a value is required".to_string())
        } else {
            Ok(())
        }
    }
}

/// Ad-hoc validator built from a plain function.
#[derive(Clone)]
pub struct FnValidator {
    name: &'static str,
    check: fn(&ParamValue) -> Result<(), String>,
}

impl FnValidator {
    pub fn new(name: &'static str, check: fn(&ParamValue) -> Result<(), String>) -> Self {
        Self { name, check }
    }
}

impl fmt::Debug for FnValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").field("name", &self.name).finish()
    }
}

impl Validator for FnValidator {
    fn check(&self, value: &ParamValue) -> Result<(), String> {
        (self.check)(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("input.txt");
        std::fs::write(&file, "x").unwrap();

        let ok = ParamValue::from(file.to_string_lossy().to_string());
        assert!(FileExists.check(&ok).is_ok());

        let missing = ParamValue::from(dir.path().join("nope.txt").to_string_lossy().to_string());
        let err = FileExists.check(&missing).unwrap_err();
        assert!(err.contains("file does not exist"));

        // A directory is not a file
        let folder = ParamValue::from(dir.path().to_string_lossy().to_string());
        assert!(FileExists.check(&folder).is_err());
    }

    #[test]
    fn test_folder_exists() {
        let dir = tempfile::tempdir().unwrap();
        let folder = ParamValue::from(dir.path().to_string_lossy().to_string());
        assert!(FolderExists.check(&folder).is_ok());
        assert!(FolderExists.check(&ParamValue::from("/nonexistent/dir")).is_err());
    }

    #[test]
    fn test_applies_to() {
        assert!(FileExists.applies_to(DataType::String));
        assert!(!FileExists.applies_to(DataType::Int));
        assert!(NotEmpty.applies_to(DataType::List));
        assert!(!NotEmpty.applies_to(DataType::Bool));
    }

    #[test]
    fn test_fn_validator() {
        let even = FnValidator::new("even", |v| match v.as_int() {
            Some(i) if i % 2 == 0 => Ok(()),
            _ => Err("must be even".to_string()),
        });
        assert!(even.check(&ParamValue::Int(4)).is_ok());
        assert_eq!(even.check(&ParamValue::Int(3)), Err("must be even".to_string()));
        assert!(format!("{:?}", even).contains("even"));
    }
}
