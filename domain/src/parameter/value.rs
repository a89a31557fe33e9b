//! Parameter value objects
//!
//! [`DataType`] is the closed set of types a parameter can hold and
//! [`ParamValue`] is the tagged value itself. Coercion between the two is
//! deliberately lenient for strings (launch arguments and text controls
//! arrive as strings) and strict everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The data type a parameter is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Bool,
    Float,
    String,
    List,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Bool => "bool",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::List => "list",
        }
    }

    /// Convert `value` into this data type.
    ///
    /// Coercion is idempotent: coercing an already-coerced value returns it
    /// unchanged. On failure the error carries a short reason.
    pub fn coerce(&self, value: &ParamValue) -> Result<ParamValue, String> {
        match (self, value) {
            (DataType::Int, ParamValue::Int(i)) => Ok(ParamValue::Int(*i)),
            (DataType::Int, ParamValue::Float(f)) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Ok(ParamValue::Int(*f as i64))
                } else {
                    Err(format!("{} is not a whole number", f))
                }
            }
            (DataType::Int, ParamValue::Str(s)) => s
                .trim()
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| format!("'{}' is not an integer", s)),

            (DataType::Bool, ParamValue::Bool(b)) => Ok(ParamValue::Bool(*b)),
            (DataType::Bool, ParamValue::Int(0)) => Ok(ParamValue::Bool(false)),
            (DataType::Bool, ParamValue::Int(1)) => Ok(ParamValue::Bool(true)),
            (DataType::Bool, ParamValue::Str(s)) => parse_bool(s)
                .map(ParamValue::Bool)
                .ok_or_else(|| format!("'{}' is not a boolean", s)),

            (DataType::Float, ParamValue::Float(f)) => Ok(ParamValue::Float(*f)),
            (DataType::Float, ParamValue::Int(i)) => Ok(ParamValue::Float(*i as f64)),
            (DataType::Float, ParamValue::Str(s)) => s
                .trim()
                .parse::<f64>()
                .map(ParamValue::Float)
                .map_err(|_| format!("'{}' is not a number", s)),

            (DataType::String, ParamValue::List(_)) => {
                Err("a list cannot be used as a string".to_string())
            }
            (DataType::String, ParamValue::Str(s)) => Ok(ParamValue::Str(s.clone())),
            (DataType::String, scalar) => Ok(ParamValue::Str(scalar.to_string())),

            (DataType::List, ParamValue::List(items)) => Ok(ParamValue::List(items.clone())),
            (DataType::List, ParamValue::Str(s)) => Ok(ParamValue::List(
                s.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| ParamValue::Str(item.to_string()))
                    .collect(),
            )),
            (DataType::List, scalar) => Ok(ParamValue::List(vec![scalar.clone()])),

            (expected, other) => Err(format!(
                "expected {} value but received {}",
                expected,
                other.data_type()
            )),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A parameter value.
///
/// Serialized untagged so persisted values and invocation data read
/// naturally in TOML/JSON (`crf = 18`, `preset = "fast"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// The natural data type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            ParamValue::Bool(_) => DataType::Bool,
            ParamValue::Int(_) => DataType::Int,
            ParamValue::Float(_) => DataType::Float,
            ParamValue::Str(_) => DataType::String,
            ParamValue::List(_) => DataType::List,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view used for bounds checks; ints widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value is "empty" (empty string or list).
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.trim().is_empty(),
            ParamValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(value: Vec<ParamValue>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(ParamValue::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int_from_string() {
        assert_eq!(
            DataType::Int.coerce(&ParamValue::from(" 42 ")),
            Ok(ParamValue::Int(42))
        );
        assert!(DataType::Int.coerce(&ParamValue::from("forty")).is_err());
    }

    #[test]
    fn test_coerce_int_from_float() {
        assert_eq!(
            DataType::Int.coerce(&ParamValue::Float(3.0)),
            Ok(ParamValue::Int(3))
        );
        assert!(DataType::Int.coerce(&ParamValue::Float(3.5)).is_err());
    }

    #[test]
    fn test_coerce_bool_variants() {
        assert_eq!(
            DataType::Bool.coerce(&ParamValue::from("Yes")),
            Ok(ParamValue::Bool(true))
        );
        assert_eq!(
            DataType::Bool.coerce(&ParamValue::Int(0)),
            Ok(ParamValue::Bool(false))
        );
        assert!(DataType::Bool.coerce(&ParamValue::Int(7)).is_err());
    }

    #[test]
    fn test_coerce_float_widens_int() {
        assert_eq!(
            DataType::Float.coerce(&ParamValue::Int(2)),
            Ok(ParamValue::Float(2.0))
        );
    }

    #[test]
    fn test_coerce_string_from_scalar() {
        assert_eq!(
            DataType::String.coerce(&ParamValue::Int(5)),
            Ok(ParamValue::from("5"))
        );
        assert!(DataType::String.coerce(&ParamValue::from(vec!["a"])).is_err());
    }

    #[test]
    fn test_coerce_list_splits_strings() {
        assert_eq!(
            DataType::List.coerce(&ParamValue::from("a, b,,c")),
            Ok(ParamValue::from(vec!["a", "b", "c"]))
        );
        assert_eq!(
            DataType::List.coerce(&ParamValue::Int(1)),
            Ok(ParamValue::List(vec![ParamValue::Int(1)]))
        );
    }

    #[test]
    fn test_coerce_is_idempotent() {
        let samples = [
            (DataType::Int, ParamValue::from("12")),
            (DataType::Bool, ParamValue::from("off")),
            (DataType::Float, ParamValue::from("1.25")),
            (DataType::String, ParamValue::Float(0.5)),
            (DataType::List, ParamValue::from("x,y")),
        ];
        for (data_type, raw) in samples {
            let once = data_type.coerce(&raw).unwrap();
            let twice = data_type.coerce(&once).unwrap();
            assert_eq!(once, twice, "{} not idempotent", data_type);
        }
    }

    #[test]
    fn test_untagged_serde() {
        let value: ParamValue = serde_json::from_str("18").unwrap();
        assert_eq!(value, ParamValue::Int(18));
        let value: ParamValue = serde_json::from_str("\"fast\"").unwrap();
        assert_eq!(value, ParamValue::from("fast"));
        let value: ParamValue = serde_json::from_str("[true, 2]").unwrap();
        assert_eq!(
            value,
            ParamValue::List(vec![ParamValue::Bool(true), ParamValue::Int(2)])
        );
    }
}
